//! i2r HTTP Server
//!
//! This is the thin application shell that wires state and routes.
//! Core behavior lives in the `crates/` directory.

pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use i2r_core::{AppConfig, I2rError};
use state::AppState;
use std::sync::Arc;
use tracing::info;

/// Health check
async fn health_check() -> &'static str {
    "ok"
}

/// Application version
async fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Build the full router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(get_version))
        .merge(routes::employees::router())
        .with_state(state)
}

/// Initialize tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,i2r=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Serve the HTTP API until interrupted.
pub async fn run(config: AppConfig) -> Result<(), I2rError> {
    config.validate()?;
    info!("Starting i2r v{}", env!("CARGO_PKG_VERSION"));

    let addr = config.server.socket_addr()?;
    let (state, db) = AppState::from_config(&config).await?;
    let app = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
