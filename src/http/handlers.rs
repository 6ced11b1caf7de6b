//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. Mutating handlers run the scope policy gate
//! before touching storage.

use axum::{
    extract::{Path, State},
    response::sse::{Event, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;

use super::dto::{
    ActivateSnapshotRequest, ActorScope, ConfigListResponse, CreateConfigRequest,
    CreateSnapshotRequest, HealthResponse, RunStatusResponse, SnapshotHistoryResponse,
    TriggerRunRequest, TriggerRunResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{
    CalendarConfig, ConfigId, ExclusionSnapshot, NewExclusionSnapshot, PeriodGrid, SnapshotId,
};
use crate::scheduler::compute_grid;
use crate::services::{exclusions, policy};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

async fn enforce_scope(state: &AppState, actor: &ActorScope) -> Result<(), AppError> {
    policy::enforce_scope(
        state.repository.as_ref(),
        &actor.username,
        actor.target_department_id,
        actor.target_organization_id,
    )
    .await
    .map_err(AppError::from)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Calendar Configurations
// =============================================================================

/// GET /v1/configs
pub async fn list_configs(State(state): State<AppState>) -> HandlerResult<ConfigListResponse> {
    let configs = state.repository.list_configs().await?;
    let total = configs.len();
    Ok(Json(ConfigListResponse { configs, total }))
}

/// POST /v1/configs
pub async fn create_config(
    State(state): State<AppState>,
    Json(request): Json<CreateConfigRequest>,
) -> HandlerResult<CalendarConfig> {
    enforce_scope(&state, &request.actor).await?;
    let stored = state.repository.save_config(request.config).await?;
    Ok(Json(stored))
}

/// GET /v1/configs/{id}/grid
///
/// Compute the period grid for a configuration. The grid is a derived
/// projection; nothing is stored.
pub async fn get_grid(
    State(state): State<AppState>,
    Path(config_id): Path<i64>,
) -> HandlerResult<PeriodGrid> {
    let config_id = ConfigId::new(config_id);
    let config = state
        .repository
        .get_config(config_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("calendar configuration {}", config_id)))?;

    let grid = compute_grid(&config).map_err(AppError::from)?;
    Ok(Json(grid))
}

// =============================================================================
// Exclusion Snapshots
// =============================================================================

/// GET /v1/configs/{id}/exclusions/active
pub async fn get_active_snapshot(
    State(state): State<AppState>,
    Path(config_id): Path<i64>,
) -> HandlerResult<ExclusionSnapshot> {
    let config_id = ConfigId::new(config_id);
    let snapshot = exclusions::get_active(state.repository.as_ref(), config_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("no active snapshot for configuration {}", config_id))
        })?;
    Ok(Json(snapshot))
}

/// GET /v1/configs/{id}/exclusions/history
pub async fn get_snapshot_history(
    State(state): State<AppState>,
    Path(config_id): Path<i64>,
) -> HandlerResult<SnapshotHistoryResponse> {
    let config_id = ConfigId::new(config_id);
    let snapshots = exclusions::history(state.repository.as_ref(), config_id).await?;
    let total = snapshots.len();
    Ok(Json(SnapshotHistoryResponse { snapshots, total }))
}

/// POST /v1/configs/{id}/exclusions
pub async fn create_snapshot(
    State(state): State<AppState>,
    Path(config_id): Path<i64>,
    Json(request): Json<CreateSnapshotRequest>,
) -> Result<(axum::http::StatusCode, Json<ExclusionSnapshot>), AppError> {
    enforce_scope(&state, &request.actor).await?;

    let snapshot = exclusions::create_snapshot(
        state.repository.as_ref(),
        NewExclusionSnapshot {
            config_id: ConfigId::new(config_id),
            name: request.name,
            excluded_periods: request.excluded_periods,
            set_as_active: request.set_as_active,
        },
    )
    .await?;

    Ok((axum::http::StatusCode::CREATED, Json(snapshot)))
}

/// POST /v1/exclusions/{id}/activate
pub async fn activate_snapshot(
    State(state): State<AppState>,
    Path(snapshot_id): Path<i64>,
    Json(request): Json<ActivateSnapshotRequest>,
) -> HandlerResult<ExclusionSnapshot> {
    enforce_scope(&state, &request.actor).await?;
    let snapshot =
        exclusions::activate_snapshot(state.repository.as_ref(), SnapshotId::new(snapshot_id))
            .await?;
    Ok(Json(snapshot))
}

// =============================================================================
// Scheduling Runs
// =============================================================================

/// POST /v1/runs
///
/// Trigger a scheduling run. Returns 202 with a run id immediately; the run
/// proceeds on a background task.
pub async fn trigger_run(
    State(state): State<AppState>,
    Json(request): Json<TriggerRunRequest>,
) -> Result<(axum::http::StatusCode, Json<TriggerRunResponse>), AppError> {
    enforce_scope(&state, &request.actor).await?;

    let run_id = state.runner.trigger(request.selection);

    Ok((
        axum::http::StatusCode::ACCEPTED,
        Json(TriggerRunResponse {
            message: format!("Scheduling run accepted. Track progress at /v1/runs/{}", run_id),
            run_id,
        }),
    ))
}

/// GET /v1/runs/{run_id}
pub async fn get_run_status(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> HandlerResult<RunStatusResponse> {
    let record = state
        .run_tracker
        .get_run(&run_id)
        .ok_or_else(|| AppError::NotFound(format!("run {} not found", run_id)))?;

    Ok(Json(RunStatusResponse {
        run_id: record.run_id,
        state: record.state,
        created_at: record.created_at,
        completed_at: record.completed_at,
        verdict: record.verdict,
        error: record.error,
        logs: record.logs,
        result: record.result,
    }))
}

/// GET /v1/runs/{run_id}/logs
///
/// Stream run logs over SSE until the run reaches a terminal state.
pub async fn stream_run_logs(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if state.run_tracker.get_run(&run_id).is_none() {
        return Err(AppError::NotFound(format!("run {} not found", run_id)));
    }

    let tracker = state.run_tracker.clone();
    let stream = async_stream::stream! {
        let mut last_log_count = 0;
        loop {
            let logs = tracker.get_logs(&run_id);
            for log in logs.iter().skip(last_log_count) {
                let event_data = serde_json::to_string(log).unwrap_or_default();
                yield Ok(Event::default().data(event_data));
            }
            last_log_count = logs.len();

            if let Some(record) = tracker.get_run(&run_id) {
                if record.state.is_terminal() {
                    let final_event = serde_json::json!({
                        "state": record.state,
                        "verdict": record.verdict,
                        "error": record.error,
                        "result": record.result,
                    });
                    yield Ok(Event::default()
                        .event("complete")
                        .data(serde_json::to_string(&final_event).unwrap_or_default()));
                    break;
                }
            } else {
                break;
            }

            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}
