// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod engine;
pub mod ingest;
pub mod version;

// Re-export the types most callers need
pub use api::{ApiConfig, ApiError, ApiServer, AppState, ExtractTableResponse};
pub use config::ServiceConfig;
pub use engine::{EngineError, Region, StructureClient, TableEngine};
pub use ingest::{Selection, UploadStore};
