//! In-memory repository implementation.
//!
//! All entity families live in one [`Store`] behind a single
//! `parking_lot::RwLock`, so multi-step snapshot transitions
//! (deactivate-all-then-activate) run under one write guard and are atomic
//! from any reader's perspective. Concurrent activation requests serialize on
//! the same lock; the last to acquire it wins.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::models::{
    Actor, CalendarConfig, ConfigId, ConstraintId, ConstraintRecord, Course, ExclusionSnapshot,
    NewCalendarConfig, NewConstraintRecord, NewExclusionSnapshot, SnapshotId,
};

use super::super::repository::{
    ActorRepository, CalendarConfigRepository, ConstraintRepository, CourseRepository,
    ErrorContext, ExclusionSnapshotRepository, FullRepository, RepositoryError, RepositoryResult,
};

#[derive(Default)]
struct Store {
    configs: Vec<CalendarConfig>,
    constraints: Vec<ConstraintRecord>,
    snapshots: Vec<ExclusionSnapshot>,
    courses: HashMap<String, Course>,
    actors: HashMap<String, Actor>,
    next_config_id: i64,
    next_constraint_id: i64,
    next_snapshot_id: i64,
}

/// In-memory repository for local development and testing.
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                next_config_id: 1,
                next_constraint_id: 1,
                next_snapshot_id: 1,
                ..Store::default()
            }),
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CalendarConfigRepository for LocalRepository {
    async fn get_config(&self, id: ConfigId) -> RepositoryResult<Option<CalendarConfig>> {
        let store = self.store.read();
        Ok(store.configs.iter().find(|c| c.id == id).cloned())
    }

    async fn most_recent_config(&self) -> RepositoryResult<Option<CalendarConfig>> {
        let store = self.store.read();
        Ok(store.configs.iter().max_by_key(|c| c.id).cloned())
    }

    async fn list_configs(&self) -> RepositoryResult<Vec<CalendarConfig>> {
        let store = self.store.read();
        let mut configs = store.configs.clone();
        configs.sort_by_key(|c| std::cmp::Reverse(c.id));
        Ok(configs)
    }

    async fn save_config(&self, config: NewCalendarConfig) -> RepositoryResult<CalendarConfig> {
        if config.days_per_week == 0 || config.periods_per_day == 0 {
            return Err(RepositoryError::validation(
                "days_per_week and periods_per_day must be at least 1",
            )
            .with_operation("save_config"));
        }

        let mut store = self.store.write();
        let id = ConfigId::new(store.next_config_id);
        store.next_config_id += 1;
        let stored = CalendarConfig {
            id,
            days_per_week: config.days_per_week,
            periods_per_day: config.periods_per_day,
            start_date: config.start_date,
            end_date: config.end_date,
            semester: config.semester,
            session: config.session,
        };
        store.configs.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl ConstraintRepository for LocalRepository {
    async fn get_constraint(
        &self,
        id: ConstraintId,
    ) -> RepositoryResult<Option<ConstraintRecord>> {
        let store = self.store.read();
        Ok(store.constraints.iter().find(|c| c.id == id).cloned())
    }

    async fn most_recent_constraint(&self) -> RepositoryResult<Option<ConstraintRecord>> {
        let store = self.store.read();
        Ok(store
            .constraints
            .iter()
            .max_by_key(|c| (c.record_date, c.id))
            .cloned())
    }

    async fn save_constraint(
        &self,
        record: NewConstraintRecord,
    ) -> RepositoryResult<ConstraintRecord> {
        let mut store = self.store.write();
        let id = ConstraintId::new(store.next_constraint_id);
        store.next_constraint_id += 1;
        let stored = ConstraintRecord {
            id,
            record_date: Utc::now(),
            inclusive_raw: record.inclusive_raw,
            exclusive_raw: record.exclusive_raw,
        };
        store.constraints.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl ExclusionSnapshotRepository for LocalRepository {
    async fn get_snapshot(&self, id: SnapshotId) -> RepositoryResult<Option<ExclusionSnapshot>> {
        let store = self.store.read();
        Ok(store.snapshots.iter().find(|s| s.id == id).cloned())
    }

    async fn active_snapshot_for(
        &self,
        config_id: ConfigId,
    ) -> RepositoryResult<Option<ExclusionSnapshot>> {
        let store = self.store.read();
        Ok(store
            .snapshots
            .iter()
            .find(|s| s.config_id == config_id && s.is_active)
            .cloned())
    }

    async fn insert_snapshot(
        &self,
        snapshot: NewExclusionSnapshot,
    ) -> RepositoryResult<ExclusionSnapshot> {
        let mut store = self.store.write();

        // Deactivate siblings first so the single-active invariant holds for
        // the whole write-guard section.
        if snapshot.set_as_active {
            for existing in store
                .snapshots
                .iter_mut()
                .filter(|s| s.config_id == snapshot.config_id)
            {
                existing.is_active = false;
            }
        }

        let id = SnapshotId::new(store.next_snapshot_id);
        store.next_snapshot_id += 1;
        let stored = ExclusionSnapshot {
            id,
            config_id: snapshot.config_id,
            name: snapshot.name,
            excluded_periods: snapshot.excluded_periods.into_iter().collect(),
            is_active: snapshot.set_as_active,
            created_at: Utc::now(),
        };
        store.snapshots.push(stored.clone());
        Ok(stored)
    }

    async fn activate_snapshot(&self, id: SnapshotId) -> RepositoryResult<ExclusionSnapshot> {
        let mut store = self.store.write();

        let config_id = store
            .snapshots
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.config_id)
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("snapshot {} does not exist", id),
                    ErrorContext::new("activate_snapshot")
                        .with_entity("snapshot")
                        .with_entity_id(id),
                )
            })?;

        for existing in store
            .snapshots
            .iter_mut()
            .filter(|s| s.config_id == config_id)
        {
            existing.is_active = existing.id == id;
        }

        let activated = store
            .snapshots
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::internal("snapshot vanished during activation"))?;
        Ok(activated)
    }

    async fn deactivate_all_for(&self, config_id: ConfigId) -> RepositoryResult<usize> {
        let mut store = self.store.write();
        let mut deactivated = 0;
        for existing in store
            .snapshots
            .iter_mut()
            .filter(|s| s.config_id == config_id && s.is_active)
        {
            existing.is_active = false;
            deactivated += 1;
        }
        Ok(deactivated)
    }

    async fn history_for(&self, config_id: ConfigId) -> RepositoryResult<Vec<ExclusionSnapshot>> {
        let store = self.store.read();
        let mut history: Vec<ExclusionSnapshot> = store
            .snapshots
            .iter()
            .filter(|s| s.config_id == config_id)
            .cloned()
            .collect();
        history.sort_by_key(|s| std::cmp::Reverse((s.created_at, s.id)));
        Ok(history)
    }
}

#[async_trait]
impl CourseRepository for LocalRepository {
    async fn course_count(&self) -> RepositoryResult<u64> {
        let store = self.store.read();
        Ok(store.courses.len() as u64)
    }

    async fn all_course_codes(&self) -> RepositoryResult<Vec<String>> {
        let store = self.store.read();
        let mut codes: Vec<String> = store.courses.keys().cloned().collect();
        codes.sort();
        Ok(codes)
    }

    async fn save_course(&self, course: Course) -> RepositoryResult<()> {
        if course.code.trim().is_empty() {
            return Err(
                RepositoryError::validation("course code must not be empty")
                    .with_operation("save_course"),
            );
        }
        let mut store = self.store.write();
        store.courses.insert(course.code.clone(), course);
        Ok(())
    }
}

#[async_trait]
impl ActorRepository for LocalRepository {
    async fn find_actor(&self, username: &str) -> RepositoryResult<Option<Actor>> {
        let store = self.store.read();
        Ok(store.actors.get(username).cloned())
    }

    async fn save_actor(&self, actor: Actor) -> RepositoryResult<()> {
        let mut store = self.store.write();
        store.actors.insert(actor.username.clone(), actor);
        Ok(())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_snapshot(config_id: ConfigId, name: &str, active: bool) -> NewExclusionSnapshot {
        NewExclusionSnapshot {
            config_id,
            name: name.to_string(),
            excluded_periods: vec![1, 2, 3],
            set_as_active: active,
        }
    }

    async fn seed_config(repo: &LocalRepository) -> ConfigId {
        repo.save_config(NewCalendarConfig {
            days_per_week: 5,
            periods_per_day: 3,
            start_date: None,
            end_date: None,
            semester: None,
            session: None,
        })
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_config_ids_increment() {
        let repo = LocalRepository::new();
        let a = seed_config(&repo).await;
        let b = seed_config(&repo).await;
        assert!(b > a);
        assert_eq!(repo.most_recent_config().await.unwrap().unwrap().id, b);
    }

    #[tokio::test]
    async fn test_insert_active_snapshot_deactivates_siblings() {
        let repo = LocalRepository::new();
        let config_id = seed_config(&repo).await;

        let first = repo
            .insert_snapshot(new_snapshot(config_id, "first", true))
            .await
            .unwrap();
        assert!(first.is_active);

        let second = repo
            .insert_snapshot(new_snapshot(config_id, "second", true))
            .await
            .unwrap();
        assert!(second.is_active);

        let first_reloaded = repo.get_snapshot(first.id).await.unwrap().unwrap();
        assert!(!first_reloaded.is_active);
    }

    #[tokio::test]
    async fn test_activate_unknown_snapshot_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo
            .activate_snapshot(SnapshotId::new(99))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_deactivate_all_counts_active_only() {
        let repo = LocalRepository::new();
        let config_id = seed_config(&repo).await;
        repo.insert_snapshot(new_snapshot(config_id, "a", false))
            .await
            .unwrap();
        repo.insert_snapshot(new_snapshot(config_id, "b", true))
            .await
            .unwrap();
        assert_eq!(repo.deactivate_all_for(config_id).await.unwrap(), 1);
        assert_eq!(repo.deactivate_all_for(config_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let repo = LocalRepository::new();
        let err = repo
            .save_config(NewCalendarConfig {
                days_per_week: 0,
                periods_per_day: 3,
                start_date: None,
                end_date: None,
                semester: None,
                session: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }
}
