// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server: shared state, router, startup and shutdown

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::sync::{oneshot, RwLock};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::extract_table::extract_table_handler;
use crate::api::upload::upload_handler;
use crate::engine::TableEngine;
use crate::ingest::{UploadStore, MAX_UPLOAD_BYTES};
use crate::version;

/// Headroom over the raw file limit for multipart framing overhead
const BODY_LIMIT_BYTES: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub listen_addr: String,
    pub upload_dir: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            upload_dir: "uploads".to_string(),
        }
    }
}

/// State shared by all handlers.
///
/// The engine is injected after construction so the server can come up
/// (and tests can run) without a live sidecar.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<Option<Arc<dyn TableEngine>>>>,
    pub store: Arc<UploadStore>,
}

impl AppState {
    pub fn new(store: Arc<UploadStore>) -> Self {
        Self {
            engine: Arc::new(RwLock::new(None)),
            store,
        }
    }

    pub async fn set_engine(&self, engine: Arc<dyn TableEngine>) {
        *self.engine.write().await = Some(engine);
    }
}

/// Health report for GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub engine_configured: bool,
    pub engine_reachable: bool,
}

pub struct ApiServer {
    addr: SocketAddr,
    state: AppState,
    shutdown_tx: Option<oneshot::Sender<()>>,
    listener: Option<tokio::net::TcpListener>,
}

impl ApiServer {
    /// Bind the listener and prepare the shared state. The server does not
    /// accept connections until [`ApiServer::start`] is called.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let addr: SocketAddr = config.listen_addr.parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        let store = Arc::new(UploadStore::new(&config.upload_dir)?);

        Ok(Self {
            addr: actual_addr,
            state: AppState::new(store),
            shutdown_tx: None,
            listener: Some(listener),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    pub async fn set_engine(&self, engine: Arc<dyn TableEngine>) {
        self.state.set_engine(engine).await;
    }

    /// Start serving in the background with graceful shutdown support.
    pub async fn start(&mut self) {
        if let Some(listener) = self.listener.take() {
            let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
            self.shutdown_tx = Some(shutdown_tx);

            let app = Self::create_router(self.state.clone());
            let addr = self.addr;

            tokio::spawn(async move {
                info!("API server listening on {}", addr);
                let serve_future = axum::serve(listener, app).with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                });
                let _ = serve_future.await;
            });
        }
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    pub fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/health", get(health_handler))
            .route("/extract-table", post(extract_table_handler))
            .route("/upload", post(upload_handler))
            .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

async fn index_handler() -> impl IntoResponse {
    Html(include_str!("../../static/index.html"))
}

async fn health_handler(State(state): State<AppState>) -> axum::response::Json<HealthResponse> {
    let engine = state.engine.read().await.clone();
    let engine_configured = engine.is_some();
    let engine_reachable = match engine {
        Some(engine) => engine.health_check().await,
        None => false,
    };

    axum::response::Json(HealthResponse {
        status: "healthy".to_string(),
        version: version::VERSION_NUMBER.to_string(),
        engine_configured,
        engine_reachable,
    })
}
