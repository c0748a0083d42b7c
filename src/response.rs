//! Standard response body helpers.
//!
//! Every error body has the same shape: `{ "code": ..., "errors": [...] }`.
//! Internal failure detail never reaches the body; it is logged instead.

use crate::error::Issue;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    errors: Vec<Issue>,
}

pub fn error_response(status: StatusCode, code: &str, errors: Vec<Issue>) -> Response {
    (
        status,
        Json(ErrorBody {
            code: code.to_string(),
            errors,
        }),
    )
        .into_response()
}

pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

pub fn not_found_response() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "not_found",
        vec![Issue::message("Resource not found")],
    )
}

pub fn id_mismatch_response() -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        "id_mismatch",
        vec![Issue::message("id in body does not match id in path")],
    )
}

pub fn validation_error_response(issues: Vec<Issue>) -> Response {
    error_response(StatusCode::BAD_REQUEST, "validation_error", issues)
}

pub fn internal_error_response() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        vec![Issue::message("An unexpected error occurred")],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_content_has_empty_body() {
        let res = no_content_response();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn not_found_carries_default_message() {
        let res = not_found_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
