// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! PDF rasterization: render uploaded documents to RGB bitmaps via pdfium.
//!
//! pdfium is a blocking C++ library with thread-local state, so rendering
//! runs under `tokio::task::spawn_blocking` to keep the async workers free.
//! Pages render at their native point size (1pt = 1px, i.e. 72 DPI); there
//! is deliberately no DPI control on this path.

use image::DynamicImage;
use pdfium_render::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to open PDF: {0}")]
    Corrupt(String),

    #[error("failed to rasterize page {page}: {detail}")]
    Rasterize { page: usize, detail: String },

    #[error("internal rasterization error: {0}")]
    Internal(String),
}

/// Rasterize every page of a PDF into an RGB bitmap.
///
/// Returns the pages in document order. Callers decide how many pages
/// they actually forward.
pub async fn rasterize_pdf(bytes: Vec<u8>) -> Result<Vec<DynamicImage>, PdfError> {
    tokio::task::spawn_blocking(move || rasterize_blocking(&bytes))
        .await
        .map_err(|e| PdfError::Internal(format!("render task panicked: {}", e)))?
}

fn rasterize_blocking(bytes: &[u8]) -> Result<Vec<DynamicImage>, PdfError> {
    let pdfium = Pdfium::default();

    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| PdfError::Corrupt(format!("{:?}", e)))?;

    let pages = document.pages();
    let mut images = Vec::with_capacity(pages.len() as usize);

    for (idx, page) in pages.iter().enumerate() {
        // Native resolution: one pixel per PDF point
        let width = page.width().value.round().max(1.0) as i32;
        let height = page.height().value.round().max(1.0) as i32;

        let render_config = PdfRenderConfig::new()
            .set_target_width(width)
            .set_target_height(height);

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| PdfError::Rasterize {
                page: idx + 1,
                detail: format!("{:?}", e),
            })?;

        images.push(DynamicImage::ImageRgb8(bitmap.as_image().to_rgb8()));
    }

    Ok(images)
}
