//! Versioned, activatable sets of globally excluded period indices.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ConfigId, SnapshotId};

/// A named set of globally excluded period indices for one calendar config.
///
/// Snapshots are append-only: edits create new snapshots, and only the
/// `is_active` flag ever changes in place. At most one snapshot per owning
/// config is active at any time; the repository enforces that by treating
/// deactivate-all-then-activate as a single atomic transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusionSnapshot {
    pub id: SnapshotId,
    pub config_id: ConfigId,
    pub name: String,
    pub excluded_periods: BTreeSet<u32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input payload for creating an exclusion snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExclusionSnapshot {
    pub config_id: ConfigId,
    pub name: String,
    #[serde(default)]
    pub excluded_periods: Vec<u32>,
    #[serde(default)]
    pub set_as_active: bool,
}
