// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod extract_table;
pub mod server;
pub mod upload;

pub use errors::{ApiError, ErrorResponse};
pub use extract_table::{extract_table_handler, ExtractTableResponse};
pub use server::{ApiConfig, ApiServer, AppState, HealthResponse};
pub use upload::{upload_handler, UploadResponse};
