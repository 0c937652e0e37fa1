// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration from environment variables

use std::env;
use std::time::Duration;

/// Default port for the HTTP API
const DEFAULT_API_PORT: &str = "8080";

/// Default endpoint for the structure recognition sidecar
/// (PaddleHub serving listens on 8866 by default)
const DEFAULT_STRUCTURE_ENDPOINT: &str = "http://127.0.0.1:8866";

/// Runtime configuration resolved from the environment.
///
/// Recognized variables:
/// - `API_HOST` / `API_PORT`: HTTP listen address (default 127.0.0.1:8080)
/// - `UPLOAD_DIR`: directory for stored uploads (default ./uploads)
/// - `STRUCTURE_ENDPOINT`: base URL of the structure recognition sidecar
/// - `ENGINE_TIMEOUT_SECS`: per-request timeout for the sidecar (default 120)
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen_addr: String,
    pub upload_dir: String,
    pub structure_endpoint: String,
    pub engine_timeout: Duration,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("API_PORT").unwrap_or_else(|_| DEFAULT_API_PORT.to_string());

        let engine_timeout_secs = env::var("ENGINE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(120);

        Self {
            listen_addr: format!("{}:{}", host, port),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            structure_endpoint: env::var("STRUCTURE_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_STRUCTURE_ENDPOINT.to_string()),
            engine_timeout: Duration::from_secs(engine_timeout_secs),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            upload_dir: "uploads".to_string(),
            structure_endpoint: DEFAULT_STRUCTURE_ENDPOINT.to_string(),
            engine_timeout: Duration::from_secs(120),
        }
    }
}
