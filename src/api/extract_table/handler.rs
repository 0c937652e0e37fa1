// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! Extract-table endpoint handler

use axum::extract::{Multipart, State};
use axum::Json;
use image::DynamicImage;
use tracing::{debug, info, warn};

use super::request::parse_selection;
use super::response::ExtractTableResponse;
use crate::api::errors::ApiError;
use crate::api::server::AppState;
use crate::engine::first_table;
use crate::ingest::{
    decode_image_bytes, normalize_selection, rasterize_pdf, sniff_format, PdfError, Selection,
    SniffedKind,
};

/// POST /extract-table - Extract the first table from an uploaded document
///
/// Accepts a multipart form:
/// - `file`: image (PNG, JPG, WebP, GIF, BMP, TIFF) or PDF (required)
/// - `selection`: JSON string `{x,y,width,height}` in source-image pixel
///   coordinates (optional)
///
/// With a selection the image is cropped with 20px padding, clamped to the
/// image bounds, and upscaled so its short side is at least 640px before it
/// reaches the recognition engine. PDFs are rasterized first; only page one
/// is analyzed.
///
/// # Errors
/// - 400: missing file, undecodable upload, bad selection, or no table found
/// - 500: engine or processing failure
/// - 503: recognition engine not configured
pub async fn extract_table_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractTableResponse>, ApiError> {
    let form = read_form(multipart).await?;

    let (filename, bytes) = form
        .file
        .ok_or_else(|| ApiError::InvalidRequest("No file provided".to_string()))?;
    if filename.is_empty() {
        return Err(ApiError::InvalidRequest("No file selected".to_string()));
    }

    let selection = form.selection.as_deref().map(parse_selection).transpose()?;

    debug!(
        "extract-table request: file={}, {} bytes, selection={:?}",
        filename,
        bytes.len(),
        selection
    );

    let response = run_extraction(&state, &bytes, selection).await?;
    Ok(Json(response))
}

/// Fields pulled out of the multipart form
#[derive(Debug, Default)]
struct ExtractForm {
    file: Option<(String, Vec<u8>)>,
    selection: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<ExtractForm, ApiError> {
    let mut form = ExtractForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::InvalidRequest(format!("failed to read file: {}", e)))?;
                form.file = Some((filename, bytes.to_vec()));
            }
            Some("selection") => {
                let text = field.text().await.map_err(|e| {
                    ApiError::InvalidRequest(format!("failed to read selection: {}", e))
                })?;
                form.selection = Some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Normalize the upload, run the engine, and flatten its result.
///
/// Split from the handler so tests can drive it without building a
/// multipart request.
pub(crate) async fn run_extraction(
    state: &AppState,
    bytes: &[u8],
    selection: Option<Selection>,
) -> Result<ExtractTableResponse, ApiError> {
    let engine = state.engine.read().await.clone().ok_or_else(|| {
        warn!("extract-table request with no engine configured");
        ApiError::ServiceUnavailable("Table recognition engine not available".to_string())
    })?;

    let image = decode_upload(bytes).await?;

    let image = match selection {
        Some(sel) => normalize_selection(&image, &sel)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?,
        None => image,
    };

    let path = state
        .store
        .save_normalized(&image)
        .map_err(|e| ApiError::InternalError(format!("failed to store image: {}", e)))?;

    let regions = engine.analyze(&path).await.map_err(|e| {
        warn!("table engine error: {}", e);
        ApiError::InternalError(format!("Table processing error: {}", e))
    })?;

    let table = first_table(&regions).ok_or_else(|| {
        warn!("no tables detected in image");
        ApiError::InvalidRequest("No tables detected in image".to_string())
    })?;

    info!("extracted table from {} region(s)", regions.len());

    Ok(ExtractTableResponse::new(table))
}

/// Decode the upload into a single image, rasterizing PDFs to page one.
async fn decode_upload(bytes: &[u8]) -> Result<DynamicImage, ApiError> {
    let kind = sniff_format(bytes).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    if kind != SniffedKind::Pdf {
        return decode_image_bytes(bytes).map_err(|e| ApiError::InvalidRequest(e.to_string()));
    }

    let pages = rasterize_pdf(bytes.to_vec()).await.map_err(|e| match e {
        PdfError::Corrupt(_) => ApiError::InvalidRequest(e.to_string()),
        _ => ApiError::InternalError(e.to_string()),
    })?;

    if pages.len() > 1 {
        warn!(
            "PDF has {} pages; only page 1 is analyzed",
            pages.len()
        );
    }

    pages
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::InvalidRequest("PDF has no pages".to_string()))
}
