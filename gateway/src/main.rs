use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use gateway::{Config, Gateway};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug for per-sample logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    let addr = config.socket_addr();

    tracing::debug!(?config, "configuration loaded");

    let app = gateway::router(Arc::new(Gateway::from_config(&config)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Server is running on port {}", config.port);
    tracing::info!("Visit http://localhost:{} to see available endpoints", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal. Reason: {e}");
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutting down");
}
