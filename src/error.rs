//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// One field-level problem reported by validation. Serialized into the
/// `errors` array of an error body; `path` is omitted for whole-request
/// messages (not found, access denied).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Issue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
}

impl Issue {
    pub fn field(path: impl Into<String>, message: impl Into<String>) -> Self {
        Issue {
            path: Some(path.into()),
            message: message.into(),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Issue {
            path: None,
            message: message.into(),
        }
    }
}

/// Failure raised by a domain operation (create/read/update/delete/search).
#[derive(Error, Debug)]
pub enum OpError {
    #[error("validation failed")]
    Validation(Vec<Issue>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("password hash: {0}")]
    Hash(String),
}

impl OpError {
    /// The two recognized record-absent signals: the explicit domain
    /// not-found and the driver's row-not-found code. Everything else is
    /// an unexpected failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OpError::NotFound(_) | OpError::Db(sqlx::Error::RowNotFound)
        )
    }
}

impl From<Vec<Issue>> for OpError {
    fn from(issues: Vec<Issue>) -> Self {
        OpError::Validation(issues)
    }
}

/// Handler-level error: gate failures, malformed filters, and operation
/// errors the dispatcher deliberately did not intercept (delete).
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<Issue>),
    #[error("invalid query parameters")]
    InvalidQuery(Vec<Issue>),
    #[error("authentication required")]
    Unauthorized(String),
    #[error("access denied")]
    Forbidden(String),
    #[error(transparent)]
    Op(#[from] OpError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(issues) => {
                crate::response::error_response(StatusCode::BAD_REQUEST, "validation_error", issues)
            }
            ApiError::InvalidQuery(issues) => crate::response::error_response(
                StatusCode::BAD_REQUEST,
                "invalid query parameters",
                issues,
            ),
            ApiError::Unauthorized(message) => crate::response::error_response(
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                vec![Issue::message(message)],
            ),
            ApiError::Forbidden(message) => crate::response::error_response(
                StatusCode::FORBIDDEN,
                "forbidden",
                vec![Issue::message(message)],
            ),
            ApiError::Op(OpError::Validation(issues)) => {
                crate::response::error_response(StatusCode::BAD_REQUEST, "validation_error", issues)
            }
            ApiError::Op(e) if e.is_not_found() => crate::response::not_found_response(),
            ApiError::Op(e) => {
                tracing::error!(error = %e, "operation failed");
                crate::response::internal_error_response()
            }
        }
    }
}
