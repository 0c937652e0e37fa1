// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! Upload endpoint handler

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::errors::ApiError;
use crate::api::server::AppState;

/// Response for a stored upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
}

/// POST /upload - Store an uploaded file under the upload directory
///
/// Accepts a multipart form with a `file` field and stores the bytes under
/// the client-supplied filename, reduced to its basename. Returns 400 when
/// the field is missing, the filename is empty, or the write fails.
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidRequest(format!("failed to read file: {}", e)))?;
            file = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| ApiError::InvalidRequest("No file part".to_string()))?;
    if filename.is_empty() {
        return Err(ApiError::InvalidRequest("No selected file".to_string()));
    }

    let stored = state.store.save_raw(&filename, &bytes).map_err(|e| {
        warn!("upload failed for {:?}: {}", filename, e);
        ApiError::InvalidRequest("File upload failed".to_string())
    })?;

    debug!("stored upload {} ({} bytes)", stored, bytes.len());

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        filename: stored,
    }))
}
