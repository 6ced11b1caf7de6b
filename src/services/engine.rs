//! The optimization engine collaborator.
//!
//! The actual assignment of courses to period/venue/staff triples lives
//! outside this crate. The orchestrator only needs something it can hand a
//! resolved [`RunBundle`] to; [`GeneticHybridEngine`] is the placeholder the
//! system currently ships, which walks through the engine's stages with
//! delays but performs no real assignment.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::scheduler::{RunBundle, SchedulerError, SchedulerResult};

/// Summary returned by an engine run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineReport {
    pub courses_considered: usize,
    pub periods_available: u64,
    pub detail: String,
}

/// External optimization engine invoked after a feasible capacity verdict.
#[async_trait]
pub trait OptimizationEngine: Send + Sync {
    async fn run(&self, bundle: &RunBundle) -> SchedulerResult<EngineReport>;
}

/// Placeholder engine: simulates the genetic-hybrid stages without assigning
/// anything. Stage delays are configurable so tests can run it instantly.
pub struct GeneticHybridEngine {
    stage_delay: Duration,
}

impl GeneticHybridEngine {
    pub fn new() -> Self {
        Self {
            stage_delay: Duration::from_secs(2),
        }
    }

    pub fn with_stage_delay(stage_delay: Duration) -> Self {
        Self { stage_delay }
    }
}

impl Default for GeneticHybridEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OptimizationEngine for GeneticHybridEngine {
    async fn run(&self, bundle: &RunBundle) -> SchedulerResult<EngineReport> {
        info!("engine: loading constraints");
        tokio::time::sleep(self.stage_delay).await;

        info!("engine: loading course data");
        tokio::time::sleep(self.stage_delay).await;

        info!("engine: running optimization (genetic hybrid)");
        tokio::time::sleep(self.stage_delay.saturating_mul(2)).await;

        if bundle.verdict.net_available < bundle.verdict.demand {
            // The orchestrator aborts before invoking the engine on an
            // infeasible verdict; this guards direct callers.
            return Err(SchedulerError::Engine(
                "bundle verdict is infeasible".to_string(),
            ));
        }

        Ok(EngineReport {
            courses_considered: bundle.course_exclusions.len(),
            periods_available: bundle.verdict.net_available,
            detail: "timetable generation completed".to_string(),
        })
    }
}
