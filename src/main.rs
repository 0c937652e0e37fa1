// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
use std::env;
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::info;

use tabular_node::{ApiConfig, ApiServer, ServiceConfig, StructureClient};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("Starting {}", tabular_node::version::get_version_string());

    let config = ServiceConfig::from_env();

    let api_config = ApiConfig {
        listen_addr: config.listen_addr.clone(),
        upload_dir: config.upload_dir.clone(),
    };
    let mut server = ApiServer::new(api_config).await?;

    let engine = StructureClient::new(&config.structure_endpoint, config.engine_timeout)?;
    server.set_engine(Arc::new(engine)).await;

    server.start().await;
    info!("tabular-node ready on http://{}", server.local_addr());

    signal::ctrl_c().await?;
    info!("shutdown signal received");
    server.shutdown().await;

    Ok(())
}
