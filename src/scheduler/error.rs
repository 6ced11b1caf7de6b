//! Error taxonomy for the provisioning pipeline.

use crate::db::repository::RepositoryError;

/// Result type for scheduler and service operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Failures surfaced by the provisioning pipeline.
///
/// Constraint parsing is deliberately absent: malformed tokens in constraint
/// encodings are dropped, never raised, so partially-correct operator input
/// still resolves.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// Calendar configuration cannot produce a grid (missing or inverted dates).
    #[error("Invalid calendar configuration: {0}")]
    InvalidConfig(String),

    /// Snapshot creation referenced a calendar configuration that does not exist.
    #[error("Owning calendar configuration not found")]
    MissingOwner,

    /// A referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The orchestrator could not resolve any calendar configuration.
    #[error("No calendar configuration resolvable for this run")]
    ConfigurationMissing,

    /// The scope policy gate rejected the actor.
    #[error("Access denied: actor lacks scope for this operation")]
    AccessDenied,

    /// A run was cancelled cooperatively (host shutdown).
    #[error("Run interrupted by shutdown signal")]
    Interrupted,

    /// The capacity preflight found fewer available slots than courses to place.
    #[error("Insufficient capacity: need {demand} slots, only {available} available (short by {shortfall})")]
    CapacityInfeasible {
        demand: u64,
        available: u64,
        shortfall: u64,
    },

    /// Input validation failure on an operator-supplied payload.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The optimization engine reported a failure.
    #[error("Optimization engine error: {0}")]
    Engine(String),

    /// Underlying storage failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
