//! Period grid generation.
//!
//! Converts a calendar configuration into the ordered sequence of schedulable
//! period slots. Pure and idempotent: the grid is a deterministic projection
//! of the configuration and is never persisted.

use chrono::{Datelike, Weekday};

use crate::models::{CalendarConfig, PeriodGrid, PeriodSlot};

use super::error::{SchedulerError, SchedulerResult};

/// Compute the full period grid for a calendar configuration.
///
/// Iterates calendar days from `start_date` to `end_date` inclusive, emitting
/// `periods_per_day` slots per day with contiguous zero-based global indices.
/// Week numbers start at 1 and increment after each Sunday, so the first slot
/// of a Monday already carries the next week number.
///
/// Every calendar day in range yields slots. `days_per_week` is echoed into
/// the grid totals for display but does not skip non-working days; that is
/// long-standing behavior the rest of the system (period indices embedded in
/// constraint strings and snapshots) depends on.
///
/// # Errors
///
/// `InvalidConfig` if either date is absent or `start_date > end_date`.
pub fn compute_grid(config: &CalendarConfig) -> SchedulerResult<PeriodGrid> {
    let start = config
        .start_date
        .ok_or_else(|| SchedulerError::InvalidConfig("start date is not set".to_string()))?;
    let end = config
        .end_date
        .ok_or_else(|| SchedulerError::InvalidConfig("end date is not set".to_string()))?;

    if start > end {
        return Err(SchedulerError::InvalidConfig(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }

    let mut slots = Vec::new();
    let mut index: u32 = 0;
    let mut week_number: u32 = 1;
    let mut current = start;

    loop {
        for period_of_day in 1..=config.periods_per_day {
            slots.push(PeriodSlot {
                index,
                display_index: index + 1,
                date: current,
                day_of_week: current.weekday().to_string().to_uppercase(),
                week_number,
                period_of_day,
            });
            index += 1;
        }

        // Sunday closes the week; the next emitted day starts a new one.
        if current.weekday() == Weekday::Sun {
            week_number += 1;
        }

        if current == end {
            break;
        }
        current = current
            .succ_opt()
            .ok_or_else(|| SchedulerError::InvalidConfig("date range overflow".to_string()))?;
    }

    Ok(PeriodGrid {
        total_periods: index,
        days_per_week: config.days_per_week,
        periods_per_day: config.periods_per_day,
        start_date: start,
        end_date: end,
        slots,
    })
}
