// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! Table structure recognition engine interface
//!
//! The engine itself is an external pretrained-model pipeline reached over
//! HTTP; this module defines the seam the rest of the service programs
//! against, plus the region model the engine reports.

pub mod flatten;
pub mod structure_client;

pub use flatten::first_table;
pub use structure_client::StructureClient;

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One detected layout element (table, text block, figure, ...) in the
/// engine's output. The payload under `res` is engine-specific and
/// heterogeneous, so it stays a raw JSON value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Region kind as reported by the engine ("table", "text", "figure", ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Bounding box [x1, y1, x2, y2] in image pixels, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<i64>>,

    /// Engine-specific recognition payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("engine reported failure: {0}")]
    EngineFailure(String),

    #[error("engine response malformed: {0}")]
    MalformedResponse(String),

    #[error("failed to read image for engine: {0}")]
    Io(#[from] std::io::Error),
}

/// Seam over the external table-structure recognition engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableEngine: Send + Sync {
    /// Analyze the image at `image_path` and return the detected regions
    /// in engine order.
    async fn analyze(&self, image_path: &Path) -> Result<Vec<Region>, EngineError>;

    /// Whether the engine is reachable right now.
    async fn health_check(&self) -> bool;
}
