//! The resolved run bundle handed to the optimization engine.

use serde::{Deserialize, Serialize};

use crate::models::{CalendarConfig, ConfigId, ConstraintId, SnapshotId};

use super::capacity::CapacityVerdict;
use super::constraints::CourseExclusionMap;

/// Everything a scheduling run needs, resolved and validated.
///
/// Ephemeral: assembled fresh per orchestration attempt after the capacity
/// preflight passes, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunBundle {
    pub config: CalendarConfig,
    pub constraint_id: Option<ConstraintId>,
    pub snapshot_id: Option<SnapshotId>,
    pub total_periods: u32,
    pub course_exclusions: CourseExclusionMap,
    pub verdict: CapacityVerdict,
}

impl RunBundle {
    pub fn config_id(&self) -> ConfigId {
        self.config.id
    }
}
