//! Run tracking for async scheduling jobs.
//!
//! An in-memory tracker that gives every scheduling run a queryable status
//! record (state, timestamps, capacity verdict, terminal error, and progress
//! logs) rather than leaving status to log output alone.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::scheduler::CapacityVerdict;

/// A single log entry with timestamp and message.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Lifecycle state of a scheduling run.
///
/// `Loading -> CapacityCheck -> {Aborted | Running} -> {Completed | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Loading,
    CapacityCheck,
    Running,
    /// Capacity preflight failed; the engine was never invoked.
    Aborted,
    Completed,
    Failed,
}

impl RunState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Aborted | Self::Completed | Self::Failed)
    }
}

/// Status record for one scheduling run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RunRecord {
    pub run_id: String,
    pub state: RunState,
    pub logs: Vec<LogEntry>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Capacity verdict, once the preflight has executed.
    pub verdict: Option<CapacityVerdict>,
    /// Terminal error detail for `Failed` runs.
    pub error: Option<String>,
    /// Result of the run (engine report) if completed.
    pub result: Option<serde_json::Value>,
}

/// In-memory run tracker.
#[derive(Clone)]
pub struct RunTracker {
    runs: Arc<RwLock<HashMap<String, RunRecord>>>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self {
            runs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new run record in the `Loading` state and return its ID.
    pub fn create_run(&self) -> String {
        let run_id = Uuid::new_v4().to_string();
        let record = RunRecord {
            run_id: run_id.clone(),
            state: RunState::Loading,
            logs: vec![],
            created_at: chrono::Utc::now(),
            completed_at: None,
            verdict: None,
            error: None,
            result: None,
        };
        self.runs.write().insert(run_id.clone(), record);
        run_id
    }

    /// Add a log entry to a run.
    pub fn log(&self, run_id: &str, level: LogLevel, message: impl Into<String>) {
        let mut runs = self.runs.write();
        if let Some(record) = runs.get_mut(run_id) {
            record.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level,
                message: message.into(),
            });
        }
    }

    /// Move a run to a non-terminal state.
    pub fn set_state(&self, run_id: &str, state: RunState) {
        let mut runs = self.runs.write();
        if let Some(record) = runs.get_mut(run_id) {
            record.state = state;
            if state.is_terminal() {
                record.completed_at = Some(chrono::Utc::now());
            }
        }
    }

    /// Attach the capacity verdict to a run.
    pub fn set_verdict(&self, run_id: &str, verdict: CapacityVerdict) {
        let mut runs = self.runs.write();
        if let Some(record) = runs.get_mut(run_id) {
            record.verdict = Some(verdict);
        }
    }

    /// Mark a run as completed with an optional result payload.
    pub fn complete_run(&self, run_id: &str, result: Option<serde_json::Value>) {
        let mut runs = self.runs.write();
        if let Some(record) = runs.get_mut(run_id) {
            record.state = RunState::Completed;
            record.completed_at = Some(chrono::Utc::now());
            record.result = result;
        }
    }

    /// Mark a run as aborted by the capacity preflight.
    pub fn abort_run(&self, run_id: &str, verdict: CapacityVerdict, message: impl Into<String>) {
        let mut runs = self.runs.write();
        if let Some(record) = runs.get_mut(run_id) {
            record.state = RunState::Aborted;
            record.completed_at = Some(chrono::Utc::now());
            record.verdict = Some(verdict);
            record.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level: LogLevel::Error,
                message: message.into(),
            });
        }
    }

    /// Mark a run as failed.
    pub fn fail_run(&self, run_id: &str, error_message: impl Into<String>) {
        let mut runs = self.runs.write();
        if let Some(record) = runs.get_mut(run_id) {
            let message = error_message.into();
            record.state = RunState::Failed;
            record.completed_at = Some(chrono::Utc::now());
            record.error = Some(message.clone());
            record.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level: LogLevel::Error,
                message,
            });
        }
    }

    /// Get a run record by ID.
    pub fn get_run(&self, run_id: &str) -> Option<RunRecord> {
        self.runs.read().get(run_id).cloned()
    }

    /// Get all logs for a run.
    pub fn get_logs(&self, run_id: &str) -> Vec<LogEntry> {
        self.runs
            .read()
            .get(run_id)
            .map(|record| record.logs.clone())
            .unwrap_or_default()
    }
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::check_capacity;

    #[test]
    fn test_run_lifecycle_states() {
        let tracker = RunTracker::new();
        let id = tracker.create_run();

        assert_eq!(tracker.get_run(&id).unwrap().state, RunState::Loading);

        tracker.set_state(&id, RunState::CapacityCheck);
        tracker.set_verdict(&id, check_capacity(10, 2, 5));
        tracker.set_state(&id, RunState::Running);
        tracker.complete_run(&id, Some(serde_json::json!({"ok": true})));

        let record = tracker.get_run(&id).unwrap();
        assert_eq!(record.state, RunState::Completed);
        assert!(record.completed_at.is_some());
        assert!(record.verdict.unwrap().feasible);
        assert!(record.result.is_some());
    }

    #[test]
    fn test_abort_records_verdict_and_log() {
        let tracker = RunTracker::new();
        let id = tracker.create_run();
        tracker.abort_run(&id, check_capacity(10, 8, 5), "insufficient capacity");

        let record = tracker.get_run(&id).unwrap();
        assert_eq!(record.state, RunState::Aborted);
        assert!(!record.verdict.unwrap().feasible);
        assert_eq!(record.logs.len(), 1);
    }

    #[test]
    fn test_fail_records_error() {
        let tracker = RunTracker::new();
        let id = tracker.create_run();
        tracker.fail_run(&id, "boom");

        let record = tracker.get_run(&id).unwrap();
        assert_eq!(record.state, RunState::Failed);
        assert_eq!(record.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_unknown_run_id() {
        let tracker = RunTracker::new();
        assert!(tracker.get_run("missing").is_none());
        assert!(tracker.get_logs("missing").is_empty());
    }
}
