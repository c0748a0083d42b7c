//! Uniform translation of domain operation results into transport
//! outcomes.
//!
//! One function per verb; each classifies failures its own way. Create,
//! read, and update generalize anything unexpected to an opaque internal
//! failure. Delete does not: its unexpected failures leave the dispatcher
//! unchanged so the caller can react to a destructive operation going
//! wrong, rather than having it silently generalized.

use crate::error::{Issue, OpError};
use crate::response;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use uuid::Uuid;

/// Result of one dispatched operation. Constructed once, never mutated,
/// consumed by the transport boundary.
#[derive(Debug, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    ValidationFailure(Vec<Issue>),
    IdentifierMismatch,
    NotFound,
    InternalFailure,
}

impl<T: Serialize> Outcome<T> {
    /// Render with 201 and the record for the success arm (create).
    pub fn into_created(self) -> Response {
        match self {
            Outcome::Success(record) => (StatusCode::CREATED, Json(record)).into_response(),
            other => other.into_failure_response(),
        }
    }

    /// Render with 200 and the record for the success arm (read).
    pub fn into_ok(self) -> Response {
        match self {
            Outcome::Success(record) => (StatusCode::OK, Json(record)).into_response(),
            other => other.into_failure_response(),
        }
    }

    /// Render with 204 and no body for the success arm (update, delete).
    pub fn into_no_content(self) -> Response {
        match self {
            Outcome::Success(_) => response::no_content_response(),
            other => other.into_failure_response(),
        }
    }

    fn into_failure_response(self) -> Response {
        match self {
            Outcome::Success(_) => unreachable!("success is rendered per verb"),
            Outcome::ValidationFailure(issues) => response::validation_error_response(issues),
            Outcome::IdentifierMismatch => response::id_mismatch_response(),
            Outcome::NotFound => response::not_found_response(),
            Outcome::InternalFailure => response::internal_error_response(),
        }
    }
}

fn internal<T>(error: OpError) -> Outcome<T> {
    tracing::error!(error = %error, "unexpected failure in resource operation");
    Outcome::InternalFailure
}

/// Create: validation failures surface with their issues, everything else
/// is opaque.
pub async fn try_create<I, O, F, Fut>(create: F, input: I) -> Outcome<O>
where
    F: FnOnce(I) -> Fut,
    Fut: Future<Output = Result<O, OpError>>,
{
    match create(input).await {
        Ok(record) => Outcome::Success(record),
        Err(OpError::Validation(issues)) => Outcome::ValidationFailure(issues),
        Err(e) => internal(e),
    }
}

/// Read: the id is already validated by the caller.
pub async fn try_read<O, F, Fut>(read: F, id: Uuid) -> Outcome<O>
where
    F: FnOnce(Uuid) -> Fut,
    Fut: Future<Output = Result<O, OpError>>,
{
    match read(id).await {
        Ok(record) => Outcome::Success(record),
        Err(e) if e.is_not_found() => Outcome::NotFound,
        Err(e) => internal(e),
    }
}

/// Update: the raw body must carry an id equal to the path id. The check
/// runs on the raw JSON, before validation and before any storage access.
pub async fn try_update<O, F, Fut>(update: F, path_id: Uuid, body: Value) -> Outcome<O>
where
    F: FnOnce(Value) -> Fut,
    Fut: Future<Output = Result<O, OpError>>,
{
    let body_id = body
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok());
    if body_id != Some(path_id) {
        return Outcome::IdentifierMismatch;
    }
    match update(body).await {
        Ok(record) => Outcome::Success(record),
        Err(OpError::Validation(issues)) => Outcome::ValidationFailure(issues),
        Err(e) if e.is_not_found() => Outcome::NotFound,
        Err(e) => internal(e),
    }
}

/// Delete: absence maps to NotFound; any other failure is returned to the
/// caller unchanged.
pub async fn try_delete<F, Fut>(delete: F, id: Uuid) -> Result<Outcome<()>, OpError>
where
    F: FnOnce(Uuid) -> Fut,
    Fut: Future<Output = Result<(), OpError>>,
{
    match delete(id).await {
        Ok(()) => Ok(Outcome::Success(())),
        Err(e) if e.is_not_found() => Ok(Outcome::NotFound),
        Err(e) => Err(e),
    }
}
