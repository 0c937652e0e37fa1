// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! Selection parsing and validation for the extract-table endpoint

use crate::api::errors::ApiError;
use crate::ingest::Selection;

/// Parse the `selection` form field, a JSON string `{x,y,width,height}`
/// in source-image pixel coordinates.
///
/// A selection the client sent is user input, so anything wrong with it
/// is a validation error, not a server fault.
pub fn parse_selection(raw: &str) -> Result<Selection, ApiError> {
    let selection: Selection =
        serde_json::from_str(raw).map_err(|e| ApiError::ValidationError {
            field: "selection".to_string(),
            message: format!("invalid selection JSON: {}", e),
        })?;

    if selection.width <= 0 || selection.height <= 0 {
        return Err(ApiError::ValidationError {
            field: "selection".to_string(),
            message: format!(
                "selection must have positive dimensions, got {}x{}",
                selection.width, selection.height
            ),
        });
    }

    Ok(selection)
}
