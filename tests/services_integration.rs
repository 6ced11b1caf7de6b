mod support;

use examgrid::db::LocalRepository;
use examgrid::models::{NewExclusionSnapshot, Role, SnapshotId};
use examgrid::scheduler::SchedulerError;
use examgrid::services::{exclusions, policy};

use support::{seed_actor, seed_config};

#[tokio::test]
async fn test_snapshot_crud_over_repository() {
    let repo = LocalRepository::new();
    let config_id = seed_config(&repo, 5).await;

    let created = exclusions::create_snapshot(
        &repo,
        NewExclusionSnapshot {
            config_id,
            name: "midterm break".to_string(),
            excluded_periods: vec![3, 4, 5],
            set_as_active: true,
        },
    )
    .await
    .unwrap();

    let active = exclusions::get_active(&repo, config_id).await.unwrap();
    assert_eq!(active.unwrap().id, created.id);

    let history = exclusions::history(&repo, config_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].name, "midterm break");
    // Input Vec lands as a sorted set.
    let periods: Vec<u32> = history[0].excluded_periods.iter().copied().collect();
    assert_eq!(periods, vec![3, 4, 5]);
}

#[tokio::test]
async fn test_activation_switches_between_snapshots() {
    let repo = LocalRepository::new();
    let config_id = seed_config(&repo, 5).await;

    let mut ids = Vec::new();
    for name in ["v1", "v2", "v3"] {
        let snap = exclusions::create_snapshot(
            &repo,
            NewExclusionSnapshot {
                config_id,
                name: name.to_string(),
                excluded_periods: vec![],
                set_as_active: false,
            },
        )
        .await
        .unwrap();
        ids.push(snap.id);
    }

    assert!(exclusions::get_active(&repo, config_id)
        .await
        .unwrap()
        .is_none());

    for &id in &ids {
        exclusions::activate_snapshot(&repo, id).await.unwrap();
        let history = exclusions::history(&repo, config_id).await.unwrap();
        assert_eq!(history.iter().filter(|s| s.is_active).count(), 1);
        assert_eq!(
            exclusions::get_active(&repo, config_id)
                .await
                .unwrap()
                .unwrap()
                .id,
            id
        );
    }
}

#[tokio::test]
async fn test_concurrent_activations_keep_single_active() {
    use std::sync::Arc;

    let repo = Arc::new(LocalRepository::new());
    let config_id = seed_config(&repo, 5).await;

    let mut ids = Vec::new();
    for i in 0..8 {
        let snap = exclusions::create_snapshot(
            repo.as_ref(),
            NewExclusionSnapshot {
                config_id,
                name: format!("snap-{}", i),
                excluded_periods: vec![],
                set_as_active: false,
            },
        )
        .await
        .unwrap();
        ids.push(snap.id);
    }

    let mut handles = Vec::new();
    for id in ids {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            exclusions::activate_snapshot(repo.as_ref(), id).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let history = exclusions::history(repo.as_ref(), config_id).await.unwrap();
    assert_eq!(history.iter().filter(|s| s.is_active).count(), 1);
}

#[tokio::test]
async fn test_activate_nonexistent_snapshot() {
    let repo = LocalRepository::new();
    let err = exclusions::activate_snapshot(&repo, SnapshotId::new(1234))
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulerError::NotFound(_)));
}

#[tokio::test]
async fn test_scope_check_against_directory() {
    let repo = LocalRepository::new();
    seed_actor(&repo, "root", Role::Admin, None, None).await;
    seed_actor(&repo, "dept5", Role::DeptRep, Some(5), Some(1)).await;
    seed_actor(&repo, "org9", Role::OrgRep, None, Some(9)).await;

    assert!(policy::check_scope(&repo, "root", None, None).await.unwrap());
    assert!(policy::check_scope(&repo, "dept5", Some(5), Some(99))
        .await
        .unwrap());
    assert!(!policy::check_scope(&repo, "dept5", Some(6), Some(1))
        .await
        .unwrap());
    assert!(policy::check_scope(&repo, "org9", None, Some(9))
        .await
        .unwrap());
    assert!(!policy::check_scope(&repo, "org9", None, Some(8))
        .await
        .unwrap());
    assert!(!policy::check_scope(&repo, "nobody", Some(5), Some(9))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_enforce_scope_denies_before_write() {
    let repo = LocalRepository::new();
    seed_actor(&repo, "staff3", Role::Staff, Some(3), None).await;

    let err = policy::enforce_scope(&repo, "staff3", Some(4), None)
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulerError::AccessDenied));

    assert!(policy::enforce_scope(&repo, "staff3", Some(3), None)
        .await
        .is_ok());
}
