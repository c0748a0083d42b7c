//! Field-level checks for raw JSON payloads.
//!
//! Each helper reads one field from a JSON object, records an issue on
//! failure, and returns `None` so callers can keep checking the rest of
//! the payload. Issues accumulate; the caller fails the whole parse only
//! once every field has been looked at.

use crate::error::Issue;
use serde_json::{Map, Value};
use uuid::Uuid;

pub(crate) fn as_object<'a>(
    body: &'a Value,
    issues: &mut Vec<Issue>,
) -> Option<&'a Map<String, Value>> {
    match body {
        Value::Object(map) => Some(map),
        _ => {
            issues.push(Issue::message("body must be a JSON object"));
            None
        }
    }
}

pub(crate) fn required_string(
    body: &Map<String, Value>,
    field: &str,
    min: usize,
    max: usize,
    issues: &mut Vec<Issue>,
) -> Option<String> {
    let Some(value) = body.get(field).filter(|v| !v.is_null()) else {
        issues.push(Issue::field(field, format!("{field} is required")));
        return None;
    };
    let Some(s) = value.as_str() else {
        issues.push(Issue::field(field, "must be a string"));
        return None;
    };
    if s.len() < min {
        issues.push(Issue::field(
            field,
            format!("must be at least {min} characters"),
        ));
        return None;
    }
    if s.len() > max {
        issues.push(Issue::field(
            field,
            format!("must be at most {max} characters"),
        ));
        return None;
    }
    Some(s.to_string())
}

/// Absent and null both mean "no value"; only a present non-string is an
/// issue.
pub(crate) fn optional_string(
    body: &Map<String, Value>,
    field: &str,
    max: usize,
    issues: &mut Vec<Issue>,
) -> Option<String> {
    let value = body.get(field).filter(|v| !v.is_null())?;
    let Some(s) = value.as_str() else {
        issues.push(Issue::field(field, "must be a string"));
        return None;
    };
    if s.len() > max {
        issues.push(Issue::field(
            field,
            format!("must be at most {max} characters"),
        ));
        return None;
    }
    Some(s.to_string())
}

pub(crate) fn optional_bool(
    body: &Map<String, Value>,
    field: &str,
    default: bool,
    issues: &mut Vec<Issue>,
) -> bool {
    let Some(value) = body.get(field).filter(|v| !v.is_null()) else {
        return default;
    };
    match value.as_bool() {
        Some(b) => b,
        None => {
            issues.push(Issue::field(field, "must be a boolean"));
            default
        }
    }
}

pub(crate) fn required_uuid(
    body: &Map<String, Value>,
    field: &str,
    issues: &mut Vec<Issue>,
) -> Option<Uuid> {
    let Some(value) = body.get(field).filter(|v| !v.is_null()) else {
        issues.push(Issue::field(field, format!("{field} is required")));
        return None;
    };
    match value.as_str().and_then(|s| Uuid::parse_str(s).ok()) {
        Some(id) => Some(id),
        None => {
            issues.push(Issue::field(field, "must be a valid UUID"));
            None
        }
    }
}

pub(crate) fn check_email(field: &str, value: &str, issues: &mut Vec<Issue>) {
    if !value.contains('@') || value.len() < 3 {
        issues.push(Issue::field(field, "must be a valid email"));
    }
}
