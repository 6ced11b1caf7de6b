//! Exclusion snapshot lifecycle management.
//!
//! Thin service functions over the repository that own input validation and
//! the single-active invariant. Snapshots are append-only: only the active
//! flag ever changes, and only through the activation transitions here.

use std::collections::HashSet;

use tracing::info;

use crate::db::repository::FullRepository;
use crate::models::{ConfigId, ExclusionSnapshot, NewExclusionSnapshot, SnapshotId};
use crate::scheduler::{SchedulerError, SchedulerResult};

/// The active snapshot for a configuration, if any.
pub async fn get_active(
    repo: &dyn FullRepository,
    config_id: ConfigId,
) -> SchedulerResult<Option<ExclusionSnapshot>> {
    Ok(repo.active_snapshot_for(config_id).await?)
}

/// Create a new snapshot after validating the request.
///
/// The owning configuration must exist (`MissingOwner`), the name must be
/// non-empty, and duplicate period indices are rejected. Negative indices
/// cannot be expressed at this boundary; the index type is unsigned.
/// When `set_as_active` is requested, the repository deactivates all
/// siblings in the same atomic transition.
pub async fn create_snapshot(
    repo: &dyn FullRepository,
    snapshot: NewExclusionSnapshot,
) -> SchedulerResult<ExclusionSnapshot> {
    if snapshot.name.trim().is_empty() {
        return Err(SchedulerError::Validation(
            "snapshot name is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for period in &snapshot.excluded_periods {
        if !seen.insert(*period) {
            return Err(SchedulerError::Validation(format!(
                "duplicate period index {} in exclusion list",
                period
            )));
        }
    }

    if repo.get_config(snapshot.config_id).await?.is_none() {
        return Err(SchedulerError::MissingOwner);
    }

    let stored = repo.insert_snapshot(snapshot).await?;
    info!(
        snapshot_id = %stored.id,
        config_id = %stored.config_id,
        active = stored.is_active,
        "exclusion snapshot created"
    );
    Ok(stored)
}

/// Activate a snapshot, deactivating all siblings of the same owner.
///
/// Idempotent: activating the already-active snapshot changes nothing
/// observable.
pub async fn activate_snapshot(
    repo: &dyn FullRepository,
    snapshot_id: SnapshotId,
) -> SchedulerResult<ExclusionSnapshot> {
    let activated = repo.activate_snapshot(snapshot_id).await.map_err(|e| {
        if matches!(e, crate::db::RepositoryError::NotFound { .. }) {
            SchedulerError::NotFound(format!("snapshot {}", snapshot_id))
        } else {
            SchedulerError::Repository(e)
        }
    })?;
    info!(snapshot_id = %activated.id, config_id = %activated.config_id, "exclusion snapshot activated");
    Ok(activated)
}

/// All snapshots of a configuration, newest creation time first.
pub async fn history(
    repo: &dyn FullRepository,
    config_id: ConfigId,
) -> SchedulerResult<Vec<ExclusionSnapshot>> {
    Ok(repo.history_for(config_id).await?)
}
