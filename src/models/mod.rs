//! Domain entities shared across the scheduler, services, and HTTP layers.

#[macro_use]
pub mod macros;

pub mod actor;
pub mod calendar;
pub mod constraint;
pub mod course;
pub mod snapshot;

pub use actor::{Actor, Role};
pub use calendar::{CalendarConfig, NewCalendarConfig, PeriodGrid, PeriodSlot};
pub use constraint::{ConstraintRecord, NewConstraintRecord};
pub use course::Course;
pub use snapshot::{ExclusionSnapshot, NewExclusionSnapshot};

define_id_type!(ConfigId);
define_id_type!(SnapshotId);
define_id_type!(ConstraintId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_new_and_value() {
        let id = ConfigId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_id_display() {
        let id = SnapshotId::new(7);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_id_conversions() {
        let id: ConstraintId = 5i64.into();
        let raw: i64 = id.into();
        assert_eq!(raw, 5);
    }

    #[test]
    fn test_id_equality_and_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ConfigId::new(1));
        set.insert(ConfigId::new(2));
        set.insert(ConfigId::new(1));
        assert_eq!(set.len(), 2);
    }
}
