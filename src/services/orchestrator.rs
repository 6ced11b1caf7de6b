//! Scheduling run orchestration.
//!
//! Assembles the resolved run bundle, executes the capacity preflight, and
//! hands feasible bundles to the optimization engine on a spawned task. The
//! triggering call returns as soon as the run is accepted; progress and the
//! terminal outcome are queryable through the [`RunTracker`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{error, info};

use crate::db::repository::FullRepository;
use crate::models::{CalendarConfig, ConfigId, ConstraintId, ConstraintRecord, SnapshotId};
use crate::scheduler::{
    check_capacity, compute_grid, constraints, RunBundle, SchedulerError, SchedulerResult,
};

use super::engine::OptimizationEngine;
use super::exclusions;
use super::run_tracker::{LogLevel, RunState, RunTracker};

/// Selection parameters for one scheduling run.
///
/// Absent ids fall back to explicit store-side defaults: the most recent
/// calendar configuration, the most recent constraint record by record date,
/// and the active snapshot of the resolved configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub config_id: Option<ConfigId>,
    #[serde(default)]
    pub constraint_id: Option<ConstraintId>,
    #[serde(default)]
    pub snapshot_id: Option<SnapshotId>,
}

/// Orchestrates scheduling runs against a repository and an engine.
#[derive(Clone)]
pub struct ScheduleRunner {
    repo: Arc<dyn FullRepository>,
    tracker: RunTracker,
    engine: Arc<dyn OptimizationEngine>,
    shutdown: watch::Receiver<bool>,
}

impl ScheduleRunner {
    pub fn new(
        repo: Arc<dyn FullRepository>,
        tracker: RunTracker,
        engine: Arc<dyn OptimizationEngine>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            repo,
            tracker,
            engine,
            shutdown,
        }
    }

    pub fn tracker(&self) -> &RunTracker {
        &self.tracker
    }

    /// Accept a run and execute it on a background task.
    ///
    /// Returns the run id immediately; the caller never blocks on the
    /// optimization stage.
    pub fn trigger(&self, request: RunRequest) -> String {
        let run_id = self.tracker.create_run();
        let runner = self.clone();
        let id = run_id.clone();

        tokio::spawn(async move {
            match runner.execute(&id, request).await {
                Ok(()) => {}
                Err(SchedulerError::Interrupted) => {
                    runner
                        .tracker
                        .fail_run(&id, SchedulerError::Interrupted.to_string());
                    error!(run_id = %id, "run interrupted by shutdown signal");
                }
                Err(e) => {
                    runner.tracker.fail_run(&id, e.to_string());
                    error!(run_id = %id, error = %e, "run failed");
                }
            }
        });

        run_id
    }

    /// Execute one run through its lifecycle. Terminal bookkeeping for
    /// `Completed` and `Aborted` happens here; `Failed` is recorded by the
    /// caller from the returned error.
    async fn execute(&self, run_id: &str, request: RunRequest) -> SchedulerResult<()> {
        info!(run_id, "scheduler engine: initialization sequence started");
        self.tracker
            .log(run_id, LogLevel::Info, "Loading run inputs...");

        let (config, constraint, snapshot) = self.load_inputs(run_id, &request).await?;
        self.interruption_point()?;

        // Capacity preflight
        self.tracker.set_state(run_id, RunState::CapacityCheck);
        let grid = compute_grid(&config)?;
        let excluded_count = snapshot
            .as_ref()
            .map(|s| s.excluded_periods.len() as u32)
            .unwrap_or(0);
        let demand = self.repo.course_count().await?;
        let verdict = check_capacity(grid.total_periods, excluded_count, demand);

        info!(
            run_id,
            total = verdict.total_grid_periods,
            excluded = verdict.global_excluded,
            available = verdict.net_available,
            demand = verdict.demand,
            "capacity analysis"
        );
        self.tracker.log(
            run_id,
            LogLevel::Info,
            format!(
                "Capacity analysis: {} grid slots, {} excluded, {} available, {} courses to schedule",
                verdict.total_grid_periods,
                verdict.global_excluded,
                verdict.net_available,
                verdict.demand
            ),
        );

        if !verdict.feasible {
            let reason = SchedulerError::CapacityInfeasible {
                demand: verdict.demand,
                available: verdict.net_available,
                shortfall: verdict.shortfall,
            };
            error!(run_id, shortfall = verdict.shortfall, "run aborted: {}", reason);
            self.tracker.abort_run(run_id, verdict, reason.to_string());
            return Ok(());
        }
        self.tracker.set_verdict(run_id, verdict);
        self.interruption_point()?;

        // Resolve per-course exclusions, restricted to known catalog courses.
        let global = snapshot.as_ref().map(|s| &s.excluded_periods);
        let mut course_exclusions = match &constraint {
            Some(record) => constraints::resolve(
                &record.inclusive_raw,
                &record.exclusive_raw,
                grid.total_periods,
                global,
            ),
            None => constraints::CourseExclusionMap::new(),
        };
        let known: std::collections::BTreeSet<String> =
            self.repo.all_course_codes().await?.into_iter().collect();
        course_exclusions.retain(|code, _| known.contains(code));

        let bundle = RunBundle {
            constraint_id: constraint.as_ref().map(|c| c.id),
            snapshot_id: snapshot.as_ref().map(|s| s.id),
            total_periods: grid.total_periods,
            course_exclusions,
            verdict,
            config,
        };

        self.tracker.log(
            run_id,
            LogLevel::Info,
            format!(
                "Bundle loaded: config {}, constraint {}, snapshot {} ({} excluded periods)",
                bundle.config_id(),
                bundle
                    .constraint_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "NONE".to_string()),
                bundle
                    .snapshot_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "NONE".to_string()),
                excluded_count,
            ),
        );

        // Long-running optimization stage, cancellable on shutdown.
        self.tracker.set_state(run_id, RunState::Running);
        let mut shutdown = self.shutdown.clone();
        let report = tokio::select! {
            result = self.engine.run(&bundle) => result?,
            _ = async {
                // A closed channel means the host never wired a shutdown
                // signal; treat it as "no shutdown", not an interrupt.
                if shutdown.wait_for(|stop| *stop).await.is_err() {
                    futures::future::pending::<()>().await;
                }
            } => {
                return Err(SchedulerError::Interrupted);
            }
        };

        info!(run_id, detail = %report.detail, "run completed");
        self.tracker
            .log(run_id, LogLevel::Success, report.detail.clone());
        self.tracker
            .complete_run(run_id, serde_json::to_value(&report).ok());
        Ok(())
    }

    /// Resolve the configuration, constraint record, and exclusion snapshot.
    async fn load_inputs(
        &self,
        run_id: &str,
        request: &RunRequest,
    ) -> SchedulerResult<(
        CalendarConfig,
        Option<ConstraintRecord>,
        Option<crate::models::ExclusionSnapshot>,
    )> {
        let config = match request.config_id {
            Some(id) => self.repo.get_config(id).await?,
            None => self.repo.most_recent_config().await?,
        }
        .ok_or(SchedulerError::ConfigurationMissing)?;

        let constraint = match request.constraint_id {
            Some(id) => self.repo.get_constraint(id).await?,
            None => self.repo.most_recent_constraint().await?,
        };

        let snapshot = match request.snapshot_id {
            Some(id) => self.repo.get_snapshot(id).await?,
            None => exclusions::get_active(self.repo.as_ref(), config.id).await?,
        };

        self.tracker.log(
            run_id,
            LogLevel::Info,
            format!(
                "Resolved config {} (session {})",
                config.id,
                config.session.as_deref().unwrap_or("-")
            ),
        );
        Ok((config, constraint, snapshot))
    }

    /// Cooperative cancellation check between long operations.
    fn interruption_point(&self) -> SchedulerResult<()> {
        if *self.shutdown.borrow() {
            Err(SchedulerError::Interrupted)
        } else {
            Ok(())
        }
    }
}
