#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::watch;

use examgrid::db::repository::{
    ActorRepository, CalendarConfigRepository, CourseRepository, FullRepository,
};
use examgrid::db::LocalRepository;
use examgrid::models::calendar::NewCalendarConfig;
use examgrid::models::{Actor, ConfigId, Course, Role};
use examgrid::scheduler::{RunBundle, SchedulerError, SchedulerResult};
use examgrid::services::{
    EngineReport, OptimizationEngine, RunState, RunTracker, ScheduleRunner,
};

/// Engine double that counts invocations and succeeds instantly.
pub struct CountingEngine {
    pub calls: AtomicUsize,
}

impl CountingEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OptimizationEngine for CountingEngine {
    async fn run(&self, bundle: &RunBundle) -> SchedulerResult<EngineReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(EngineReport {
            courses_considered: bundle.course_exclusions.len(),
            periods_available: bundle.verdict.net_available,
            detail: "stub run completed".to_string(),
        })
    }
}

/// Engine double that never finishes, for interruption tests.
pub struct HangingEngine;

#[async_trait]
impl OptimizationEngine for HangingEngine {
    async fn run(&self, _bundle: &RunBundle) -> SchedulerResult<EngineReport> {
        futures::future::pending::<()>().await;
        unreachable!()
    }
}

/// Engine double that always errors.
pub struct FailingEngine;

#[async_trait]
impl OptimizationEngine for FailingEngine {
    async fn run(&self, _bundle: &RunBundle) -> SchedulerResult<EngineReport> {
        Err(SchedulerError::Engine("solver exploded".to_string()))
    }
}

/// Seed a calendar configuration covering `days` calendar days starting on
/// Monday 2024-06-03, with 3 periods per day.
pub async fn seed_config(repo: &LocalRepository, days: u32) -> ConfigId {
    let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let end = start + chrono::Days::new((days - 1) as u64);
    repo.save_config(NewCalendarConfig {
        days_per_week: 5,
        periods_per_day: 3,
        start_date: Some(start),
        end_date: Some(end),
        semester: Some("First".to_string()),
        session: Some("2024/2025".to_string()),
    })
    .await
    .unwrap()
    .id
}

/// Seed `count` courses with codes `CRS00`, `CRS01`, ...
pub async fn seed_courses(repo: &LocalRepository, count: usize) {
    for i in 0..count {
        repo.save_course(Course {
            code: format!("CRS{:02}", i),
            title: format!("Course {}", i),
            department_id: Some(1),
        })
        .await
        .unwrap();
    }
}

/// Seed an actor with the given role and affiliation.
pub async fn seed_actor(
    repo: &LocalRepository,
    username: &str,
    role: Role,
    dept: Option<i64>,
    org: Option<i64>,
) {
    repo.save_actor(Actor {
        username: username.to_string(),
        role,
        department_id: dept,
        organization_id: org,
    })
    .await
    .unwrap();
}

/// Build a runner over the given repository and engine, returning the
/// shutdown sender alongside it.
pub fn build_runner(
    repo: Arc<dyn FullRepository>,
    engine: Arc<dyn OptimizationEngine>,
) -> (ScheduleRunner, watch::Sender<bool>) {
    let (tx, rx) = watch::channel(false);
    let runner = ScheduleRunner::new(repo, RunTracker::new(), engine, rx);
    (runner, tx)
}

/// Poll the tracker until the run reaches a terminal state.
pub async fn wait_for_terminal(runner: &ScheduleRunner, run_id: &str) -> RunState {
    for _ in 0..200 {
        if let Some(record) = runner.tracker().get_run(run_id) {
            if record.state.is_terminal() {
                return record.state;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("run {} did not reach a terminal state in time", run_id);
}
