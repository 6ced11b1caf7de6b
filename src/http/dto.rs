//! Data Transfer Objects for the HTTP API.
//!
//! Domain models already derive Serialize/Deserialize and are reused
//! directly in responses; the types here cover request envelopes and
//! composite responses.

use serde::{Deserialize, Serialize};

use crate::models::calendar::NewCalendarConfig;
use crate::models::{CalendarConfig, ExclusionSnapshot};
use crate::services::{LogEntry, RunRequest, RunState};

/// Actor identification attached to mutating requests, checked by the scope
/// policy gate before any write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorScope {
    pub username: String,
    #[serde(default)]
    pub target_department_id: Option<i64>,
    #[serde(default)]
    pub target_organization_id: Option<i64>,
}

/// Request body for creating a calendar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConfigRequest {
    pub actor: ActorScope,
    #[serde(flatten)]
    pub config: NewCalendarConfig,
}

/// Request body for creating an exclusion snapshot. The owning config id
/// comes from the URL path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSnapshotRequest {
    pub actor: ActorScope,
    pub name: String,
    #[serde(default)]
    pub excluded_periods: Vec<u32>,
    #[serde(default)]
    pub set_as_active: bool,
}

/// Request body for activating a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivateSnapshotRequest {
    pub actor: ActorScope,
}

/// Request body for triggering a scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRunRequest {
    pub actor: ActorScope,
    #[serde(flatten)]
    pub selection: RunRequest,
}

/// Response for run trigger acceptance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRunResponse {
    /// Run ID for tracking the async job
    pub run_id: String,
    /// Message about the operation
    pub message: String,
}

/// Run status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatusResponse {
    pub run_id: String,
    pub state: RunState,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub verdict: Option<crate::scheduler::CapacityVerdict>,
    pub error: Option<String>,
    pub logs: Vec<LogEntry>,
    pub result: Option<serde_json::Value>,
}

/// Response for configuration listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigListResponse {
    pub configs: Vec<CalendarConfig>,
    pub total: usize,
}

/// Response for snapshot history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHistoryResponse {
    pub snapshots: Vec<ExclusionSnapshot>,
    pub total: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
