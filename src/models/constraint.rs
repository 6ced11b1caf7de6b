//! Per-course period constraint records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ConstraintId;

/// A raw per-course constraint record.
///
/// Both encodings use the `CODE(p1,p2,...)` list format, semicolon-separated
/// across courses. `inclusive_raw` names periods an exam MAY occupy (the
/// complement is excluded); `exclusive_raw` names periods it MAY NOT.
/// Records are immutable once created; edits produce new records and
/// selection defaults to the most recent by `record_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintRecord {
    pub id: ConstraintId,
    pub record_date: DateTime<Utc>,
    pub inclusive_raw: String,
    pub exclusive_raw: String,
}

/// Input payload for creating a constraint record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewConstraintRecord {
    #[serde(default)]
    pub inclusive_raw: String,
    #[serde(default)]
    pub exclusive_raw: String,
}
