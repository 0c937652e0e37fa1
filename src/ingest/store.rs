// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! On-disk upload store
//!
//! Stored files are retained after the request completes; callers are
//! expected to prune the directory out of band. Normalized images get a
//! unique name per request so concurrent extractions cannot clobber each
//! other.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use thiserror::Error;
use uuid::Uuid;

/// JPEG quality used for normalized images forwarded to the engine
const JPEG_QUALITY: u8 = 95;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("upload store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),
}

/// A directory holding uploaded and normalized files
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Open the store, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Save a normalized image as JPEG under a unique per-request name and
    /// return its path.
    pub fn save_normalized(&self, image: &DynamicImage) -> Result<PathBuf, StoreError> {
        let path = self.root.join(format!("preview-{}.jpg", Uuid::new_v4()));

        let file = fs::File::create(&path)?;
        let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
        image.to_rgb8().write_with_encoder(encoder)?;

        Ok(path)
    }

    /// Store raw upload bytes under the client-supplied filename, reduced to
    /// its basename so it cannot escape the store directory. Returns the
    /// stored name.
    pub fn save_raw(&self, client_name: &str, bytes: &[u8]) -> Result<String, StoreError> {
        let name = Path::new(client_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty() && *n != "." && *n != "..")
            .ok_or_else(|| StoreError::InvalidFilename(client_name.to_string()))?;

        fs::write(self.root.join(name), bytes)?;
        Ok(name.to_string())
    }
}
