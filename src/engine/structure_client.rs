// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client for the structure recognition sidecar
//!
//! The sidecar speaks the PaddleOCR serving convention:
//! `POST {endpoint}/predict/structure` with `{"images": ["<base64>"]}`,
//! answering `{"status": "000", "results": [[<region>, ...], ...]}` with
//! one region list per submitted image.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use tracing::{debug, info};

use super::{EngineError, Region, TableEngine};

/// Status code the sidecar uses for success
const STATUS_OK: &str = "000";

#[derive(serde::Serialize)]
struct StructureRequest {
    images: Vec<String>,
}

#[derive(serde::Deserialize)]
struct StructureResponse {
    status: String,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    results: Vec<Vec<Region>>,
}

/// Client for a structure recognition sidecar service
pub struct StructureClient {
    client: Client,
    endpoint: String,
}

impl StructureClient {
    /// Create a new client for the sidecar at `endpoint`.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, EngineError> {
        let client = Client::builder().timeout(timeout).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!("structure engine configured: endpoint={}", endpoint);

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TableEngine for StructureClient {
    async fn analyze(&self, image_path: &Path) -> Result<Vec<Region>, EngineError> {
        let start = std::time::Instant::now();

        let bytes = tokio::fs::read(image_path).await?;
        let request = StructureRequest {
            images: vec![STANDARD.encode(&bytes)],
        };

        let response = self
            .client
            .post(format!("{}/predict/structure", self.endpoint))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EngineError::EngineFailure(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: StructureResponse = response
            .json()
            .await
            .map_err(|e| EngineError::MalformedResponse(e.to_string()))?;

        if body.status != STATUS_OK {
            let detail = body.msg.unwrap_or_else(|| format!("status {}", body.status));
            return Err(EngineError::EngineFailure(detail));
        }

        let regions = body.results.into_iter().next().unwrap_or_default();

        debug!(
            "structure engine returned {} region(s) in {}ms",
            regions.len(),
            start.elapsed().as_millis()
        );

        Ok(regions)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.endpoint))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("structure engine health check failed: {}", e);
                false
            }
        }
    }
}
