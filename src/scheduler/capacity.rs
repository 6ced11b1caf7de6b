//! Capacity preflight check.
//!
//! Compares net available slots against scheduling demand before a run is
//! committed. The check is deliberately coarse: it looks only at the global
//! excluded count, not per-course exclusion density, so a course whose own
//! excluded set nearly covers the grid can still pass here and fail inside
//! the optimization stage.

use serde::{Deserialize, Serialize};

/// Outcome of the capacity preflight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityVerdict {
    pub feasible: bool,
    pub total_grid_periods: u32,
    pub global_excluded: u32,
    pub net_available: u64,
    pub demand: u64,
    pub shortfall: u64,
}

/// Check whether the grid can accommodate the scheduling demand.
///
/// `net_available = total_grid_periods - global_excluded` (saturating);
/// feasible iff `net_available >= demand`.
pub fn check_capacity(
    total_grid_periods: u32,
    global_excluded: u32,
    demand: u64,
) -> CapacityVerdict {
    let net_available = total_grid_periods.saturating_sub(global_excluded) as u64;
    let feasible = net_available >= demand;
    CapacityVerdict {
        feasible,
        total_grid_periods,
        global_excluded,
        net_available,
        demand,
        shortfall: demand.saturating_sub(net_available),
    }
}
