//! Pure scheduling computations.
//!
//! Everything in this module is synchronous, stateless, and free of side
//! effects: grid generation, constraint resolution, and the capacity
//! preflight are deterministic transforms that can be called concurrently
//! without coordination. Persistence and orchestration live in [`crate::db`]
//! and [`crate::services`].

pub mod bundle;
pub mod capacity;
pub mod constraints;
pub mod error;
pub mod grid;

pub use bundle::RunBundle;
pub use capacity::{check_capacity, CapacityVerdict};
pub use constraints::{invert_periods, parse_constraint_list, resolve, CourseExclusionMap};
pub use error::{SchedulerError, SchedulerResult};
pub use grid::compute_grid;
