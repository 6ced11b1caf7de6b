//! Course catalog entries.
//!
//! The catalog itself is maintained elsewhere; the scheduler only needs the
//! set of course codes (constraint resolution) and the total count (capacity
//! preflight).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub title: String,
    pub department_id: Option<i64>,
}
