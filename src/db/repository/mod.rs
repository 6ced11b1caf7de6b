//! Repository trait definitions.
//!
//! Each trait covers one entity family; `FullRepository` is the supertrait
//! the service layer works against so a single backend instance can be
//! shared across the application.
//!
//! # Thread Safety
//! Implementations must be `Send + Sync` to work with async Rust.

pub mod error;

use async_trait::async_trait;

use crate::models::{
    Actor, CalendarConfig, ConfigId, ConstraintId, ConstraintRecord, Course, ExclusionSnapshot,
    NewCalendarConfig, NewConstraintRecord, NewExclusionSnapshot, SnapshotId,
};

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Repository operations for calendar configurations.
///
/// Configurations are created by configuration management and read-only to
/// the scheduling core; `save_config` exists for the administrative surface.
#[async_trait]
pub trait CalendarConfigRepository: Send + Sync {
    /// Fetch a configuration by id.
    async fn get_config(&self, id: ConfigId) -> RepositoryResult<Option<CalendarConfig>>;

    /// Fetch the most recently created configuration, if any.
    async fn most_recent_config(&self) -> RepositoryResult<Option<CalendarConfig>>;

    /// List all configurations, newest first.
    async fn list_configs(&self) -> RepositoryResult<Vec<CalendarConfig>>;

    /// Persist a new configuration and return it with its assigned id.
    async fn save_config(&self, config: NewCalendarConfig) -> RepositoryResult<CalendarConfig>;
}

/// Repository operations for constraint records.
#[async_trait]
pub trait ConstraintRepository: Send + Sync {
    /// Fetch a constraint record by id.
    async fn get_constraint(&self, id: ConstraintId)
        -> RepositoryResult<Option<ConstraintRecord>>;

    /// Fetch the most recent constraint record by `record_date`, if any.
    async fn most_recent_constraint(&self) -> RepositoryResult<Option<ConstraintRecord>>;

    /// Persist a new constraint record and return it with its assigned id.
    async fn save_constraint(
        &self,
        record: NewConstraintRecord,
    ) -> RepositoryResult<ConstraintRecord>;
}

/// Repository operations for exclusion snapshots.
///
/// The multi-step activation transitions (`insert_snapshot` with
/// `set_as_active`, `activate_snapshot`) must be atomic: a reader must never
/// observe two active snapshots for one owning configuration mid-transition.
#[async_trait]
pub trait ExclusionSnapshotRepository: Send + Sync {
    /// Fetch a snapshot by id.
    async fn get_snapshot(&self, id: SnapshotId) -> RepositoryResult<Option<ExclusionSnapshot>>;

    /// Fetch the active snapshot for a configuration, if any.
    async fn active_snapshot_for(
        &self,
        config_id: ConfigId,
    ) -> RepositoryResult<Option<ExclusionSnapshot>>;

    /// Persist a new snapshot. When `set_as_active` is requested, all other
    /// snapshots of the same owner are deactivated in the same transition.
    async fn insert_snapshot(
        &self,
        snapshot: NewExclusionSnapshot,
    ) -> RepositoryResult<ExclusionSnapshot>;

    /// Activate a snapshot, deactivating all siblings of the same owner in
    /// the same transition. Fails with `NotFound` if the snapshot is absent.
    async fn activate_snapshot(&self, id: SnapshotId) -> RepositoryResult<ExclusionSnapshot>;

    /// Deactivate every snapshot owned by a configuration. Returns the number
    /// of snapshots that were active.
    async fn deactivate_all_for(&self, config_id: ConfigId) -> RepositoryResult<usize>;

    /// All snapshots owned by a configuration, newest `created_at` first.
    async fn history_for(&self, config_id: ConfigId) -> RepositoryResult<Vec<ExclusionSnapshot>>;
}

/// Repository operations for the course catalog.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Number of courses currently known (scheduling demand).
    async fn course_count(&self) -> RepositoryResult<u64>;

    /// All known course codes.
    async fn all_course_codes(&self) -> RepositoryResult<Vec<String>>;

    /// Persist a course.
    async fn save_course(&self, course: Course) -> RepositoryResult<()>;
}

/// Repository operations for the actor directory consumed by the scope gate.
#[async_trait]
pub trait ActorRepository: Send + Sync {
    /// Look up an actor by username.
    async fn find_actor(&self, username: &str) -> RepositoryResult<Option<Actor>>;

    /// Persist an actor.
    async fn save_actor(&self, actor: Actor) -> RepositoryResult<()>;
}

/// Combined repository interface used by the service layer.
#[async_trait]
pub trait FullRepository:
    CalendarConfigRepository
    + ConstraintRepository
    + ExclusionSnapshotRepository
    + CourseRepository
    + ActorRepository
{
    /// Verify the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
