//! Examgrid HTTP Server Binary
//!
//! Entry point for the examgrid REST API server. It initializes the
//! repository, wires the scheduling-run orchestrator to a shutdown signal,
//! sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin examgrid-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Storage backend (default: local)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use examgrid::db::RepositoryFactory;
use examgrid::http::{create_router, AppState};
use examgrid::services::{GeneticHybridEngine, RunTracker, ScheduleRunner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting examgrid HTTP server");

    let repository = RepositoryFactory::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    info!("Repository initialized successfully");

    // Shutdown signal propagated to in-flight scheduling runs so they flag
    // `Interrupted` instead of dying mid-stage.
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received; interrupting in-flight runs");
            let _ = shutdown_tx.send(true);
        }
    });

    let runner = ScheduleRunner::new(
        Arc::clone(&repository),
        RunTracker::new(),
        Arc::new(GeneticHybridEngine::new()),
        shutdown_rx,
    );

    let state = AppState::new(repository, runner);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
