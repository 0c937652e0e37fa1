// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! Upload intake: format sniffing, selection cropping, PDF rasterization,
//! and the on-disk upload store.

pub mod image_utils;
pub mod normalize;
pub mod pdf;
pub mod store;

pub use image_utils::{decode_image_bytes, sniff_format, IntakeError, SniffedKind, MAX_UPLOAD_BYTES};
pub use normalize::{normalize_selection, NormalizeError, Selection};
pub use pdf::{rasterize_pdf, PdfError};
pub use store::{StoreError, UploadStore};
