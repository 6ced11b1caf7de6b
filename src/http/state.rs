//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::{RunTracker, ScheduleRunner};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Run tracker for async scheduling jobs
    pub run_tracker: RunTracker,
    /// Orchestrator for triggering scheduling runs
    pub runner: ScheduleRunner,
}

impl AppState {
    /// Create a new application state around a repository and a runner.
    ///
    /// The runner and the state share the same tracker so run status created
    /// by background tasks is visible to status handlers.
    pub fn new(repository: Arc<dyn FullRepository>, runner: ScheduleRunner) -> Self {
        let run_tracker = runner.tracker().clone();
        Self {
            repository,
            run_tracker,
            runner,
        }
    }
}
