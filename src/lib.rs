//! # Examgrid Backend
//!
//! Exam-period provisioning and scheduling-run orchestration engine.
//!
//! This crate turns a calendar configuration into a discrete grid of
//! schedulable examination periods, maintains versioned snapshots of globally
//! excluded periods, resolves per-course period constraints, runs a capacity
//! preflight check, and orchestrates the long-running optimization job that
//! assigns exams to periods. The backend exposes a REST API via Axum.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain entities (calendar configs, exclusion snapshots,
//!   constraint records, courses, actors)
//! - [`scheduler`]: Pure computations: period grid generation, constraint
//!   resolution, capacity preflight
//! - [`db`]: Repository pattern and persistence layer
//! - [`services`]: Business logic: snapshot management, scope policy,
//!   run orchestration and tracking
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod db;
pub mod models;
pub mod scheduler;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
