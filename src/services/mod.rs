//! Service layer for business logic and orchestration.
//!
//! Services sit between the repository and the HTTP surface: snapshot
//! lifecycle management, scope policy enforcement, and the scheduling-run
//! orchestrator with its queryable run tracker.

pub mod engine;
pub mod exclusions;
pub mod orchestrator;
pub mod policy;
pub mod run_tracker;

pub use engine::{EngineReport, GeneticHybridEngine, OptimizationEngine};
pub use orchestrator::{RunRequest, ScheduleRunner};
pub use run_tracker::{LogEntry, LogLevel, RunRecord, RunState, RunTracker};
