// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Tabular table extraction node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-table-extraction-2025-08-06";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2025-08-06";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "image-upload",
    "pdf-rasterization",
    "selection-crop",
    "structure-sidecar",
    "table-html-extraction",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Tabular Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
