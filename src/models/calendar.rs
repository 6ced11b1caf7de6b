//! Calendar configuration and the derived period grid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ConfigId;

/// Calendar configuration for one examination session.
///
/// Immutable once referenced by a generated grid or snapshot; the core only
/// reads these. `days_per_week` is a display echo and does not gate which
/// calendar days yield periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub id: ConfigId,
    pub days_per_week: u32,
    pub periods_per_day: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub semester: Option<String>,
    pub session: Option<String>,
}

/// Input payload for creating or updating a calendar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCalendarConfig {
    #[serde(default = "default_days_per_week")]
    pub days_per_week: u32,
    #[serde(default = "default_periods_per_day")]
    pub periods_per_day: u32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub session: Option<String>,
}

fn default_days_per_week() -> u32 {
    5
}

fn default_periods_per_day() -> u32 {
    3
}

/// One schedulable slot within the grid.
///
/// `index` is the zero-based global address used by constraint encodings and
/// exclusion snapshots; `display_index` is the 1-based counterpart shown to
/// operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSlot {
    pub index: u32,
    pub display_index: u32,
    pub date: NaiveDate,
    pub day_of_week: String,
    pub week_number: u32,
    pub period_of_day: u32,
}

/// The full ordered sequence of period slots for one calendar configuration,
/// plus derived totals. Computed on demand, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodGrid {
    pub total_periods: u32,
    pub days_per_week: u32,
    pub periods_per_day: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub slots: Vec<PeriodSlot>,
}
