//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Calendar configurations
        .route("/configs", get(handlers::list_configs))
        .route("/configs", post(handlers::create_config))
        .route("/configs/{config_id}/grid", get(handlers::get_grid))
        // Exclusion snapshots
        .route(
            "/configs/{config_id}/exclusions",
            post(handlers::create_snapshot),
        )
        .route(
            "/configs/{config_id}/exclusions/active",
            get(handlers::get_active_snapshot),
        )
        .route(
            "/configs/{config_id}/exclusions/history",
            get(handlers::get_snapshot_history),
        )
        .route(
            "/exclusions/{snapshot_id}/activate",
            post(handlers::activate_snapshot),
        )
        // Scheduling runs
        .route("/runs", post(handlers::trigger_run))
        .route("/runs/{run_id}", get(handlers::get_run_status))
        .route("/runs/{run_id}/logs", get(handlers::stream_run_logs));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
