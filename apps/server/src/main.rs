//! # Tillpoint Server
//!
//! HTTP API server for the Tillpoint sale transaction engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tillpoint Server                                │
//! │                                                                         │
//! │  Client ───► HTTP (axum) ───► SaleEngine ───► SQLite                   │
//! │                                                                         │
//! │  POST /api/sales   record a sale                                       │
//! │  GET  /api/sales   list sales + summary                                │
//! │  GET  /health      liveness probe                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod routes;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::routes::AppState;
use tillpoint_db::{Database, DbConfig};
use tillpoint_engine::SaleEngine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Tillpoint server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        bind_addr = %config.bind_addr,
        database_path = %config.database_path,
        "Configuration loaded"
    );

    // Open the database (runs migrations)
    let db_config = DbConfig::new(&config.database_path)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);
    let db = Database::new(db_config).await?;
    info!("Database ready");

    // Build shared state
    let state = AppState {
        engine: Arc::new(SaleEngine::new(db.clone())),
    };

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
