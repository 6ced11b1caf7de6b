//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::scheduler::SchedulerError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Scope policy rejection
    Forbidden(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, ApiError::new("ACCESS_DENIED", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<SchedulerError> for AppError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::AccessDenied => AppError::Forbidden(err.to_string()),
            SchedulerError::NotFound(_)
            | SchedulerError::MissingOwner
            | SchedulerError::ConfigurationMissing => AppError::NotFound(err.to_string()),
            SchedulerError::InvalidConfig(_) | SchedulerError::Validation(_) => {
                AppError::BadRequest(err.to_string())
            }
            SchedulerError::Repository(repo_err) => repo_err.into(),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => AppError::NotFound(err.to_string()),
            RepositoryError::ValidationError { .. } => AppError::BadRequest(err.to_string()),
            _ => AppError::Internal(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_error_mapping() {
        assert!(matches!(
            AppError::from(SchedulerError::AccessDenied),
            AppError::Forbidden(_)
        ));
        assert!(matches!(
            AppError::from(SchedulerError::ConfigurationMissing),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(SchedulerError::Validation("x".into())),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(SchedulerError::Interrupted),
            AppError::Internal(_)
        ));
    }

    #[test]
    fn test_repository_error_mapping() {
        assert!(matches!(
            AppError::from(RepositoryError::not_found("x")),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::validation("x")),
            AppError::BadRequest(_)
        ));
    }
}
