// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! Upload byte sniffing and image decoding

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Maximum accepted upload size (10MB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Errors produced while validating and decoding an upload
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Upload is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Upload is empty")]
    EmptyData,
}

/// What the magic bytes of an upload say it is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffedKind {
    Png,
    Jpeg,
    WebP,
    Gif,
    Bmp,
    Tiff,
    Pdf,
}

impl SniffedKind {
    /// The `image` crate format for raster kinds; `None` for PDF.
    pub fn image_format(self) -> Option<ImageFormat> {
        match self {
            SniffedKind::Png => Some(ImageFormat::Png),
            SniffedKind::Jpeg => Some(ImageFormat::Jpeg),
            SniffedKind::WebP => Some(ImageFormat::WebP),
            SniffedKind::Gif => Some(ImageFormat::Gif),
            SniffedKind::Bmp => Some(ImageFormat::Bmp),
            SniffedKind::Tiff => Some(ImageFormat::Tiff),
            SniffedKind::Pdf => None,
        }
    }
}

/// Identify an upload from its magic bytes.
///
/// Size and emptiness are checked here so every intake path shares the
/// same limits.
pub fn sniff_format(bytes: &[u8]) -> Result<SniffedKind, IntakeError> {
    if bytes.is_empty() {
        return Err(IntakeError::EmptyData);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(IntakeError::TooLarge(bytes.len(), MAX_UPLOAD_BYTES));
    }
    if bytes.len() < 4 {
        return Err(IntakeError::UnsupportedFormat);
    }

    match bytes {
        // PDF: %PDF
        [0x25, 0x50, 0x44, 0x46, ..] => Ok(SniffedKind::Pdf),

        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(SniffedKind::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(SniffedKind::Jpeg),

        // WebP: RIFF .... WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Ok(SniffedKind::WebP),

        // GIF: GIF87a or GIF89a
        [0x47, 0x49, 0x46, 0x38, x, ..] if *x == 0x37 || *x == 0x39 => Ok(SniffedKind::Gif),

        // BMP: BM
        [0x42, 0x4D, ..] => Ok(SniffedKind::Bmp),

        // TIFF: II (little-endian) or MM (big-endian)
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => Ok(SniffedKind::Tiff),

        _ => Err(IntakeError::UnsupportedFormat),
    }
}

/// Decode raw upload bytes into an image.
///
/// PDFs are rejected here; callers route them through the rasterizer first.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage, IntakeError> {
    let kind = sniff_format(bytes)?;
    let format = kind.image_format().ok_or(IntakeError::UnsupportedFormat)?;

    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| IntakeError::DecodeFailed(e.to_string()))
}
