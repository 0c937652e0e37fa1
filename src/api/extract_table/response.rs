// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! Extract-table response types

use serde::{Deserialize, Serialize};

/// Response for a successful table extraction.
///
/// `tables` is the first detected table: an HTML string when the engine
/// produced one, otherwise the engine's structured payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractTableResponse {
    pub success: bool,
    pub tables: serde_json::Value,
}

impl ExtractTableResponse {
    pub fn new(tables: serde_json::Value) -> Self {
        Self {
            success: true,
            tables,
        }
    }
}
