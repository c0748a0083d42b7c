//! Shared search-filter vocabulary and coercion helpers.
//!
//! Filters arrive as raw string query parameters. Each entity filter runs
//! two explicit stages: coerce the raw map into a typed draft (collecting
//! per-field issues), then fill defaults for absent optional fields. Both
//! stages are pure and tested on their own.

use crate::error::Issue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

pub const DEFAULT_TAKE: i64 = 10;
pub const MAX_TAKE: i64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

/// Strict shape: every raw parameter must be a recognized field.
pub(crate) fn reject_unknown_fields(
    params: &HashMap<String, String>,
    known: &[&str],
    issues: &mut Vec<Issue>,
) {
    for key in params.keys() {
        if !known.contains(&key.as_str()) {
            issues.push(Issue::field(key, "unrecognized parameter"));
        }
    }
}

/// A categorical group accepted as a single comma-joined string. An empty
/// string coerces to an empty selection, not to one empty member.
pub(crate) fn parse_csv<T: FromStr>(
    field: &str,
    raw: &str,
    issues: &mut Vec<Issue>,
) -> Vec<T> {
    if raw.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    for part in raw.split(',') {
        match part.parse::<T>() {
            Ok(value) => out.push(value),
            Err(_) => issues.push(Issue::field(field, format!("invalid value '{part}'"))),
        }
    }
    out
}

pub(crate) fn parse_non_negative(field: &str, raw: &str, issues: &mut Vec<Issue>) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(n) if n >= 0 => Some(n),
        Ok(_) => {
            issues.push(Issue::field(field, "must be greater than or equal to 0"));
            None
        }
        Err(_) => {
            issues.push(Issue::field(field, "must be an integer"));
            None
        }
    }
}

pub(crate) fn parse_take(field: &str, raw: &str, issues: &mut Vec<Issue>) -> Option<i64> {
    let n = parse_non_negative(field, raw, issues)?;
    if n > MAX_TAKE {
        issues.push(Issue::field(
            field,
            format!("must be less than or equal to {MAX_TAKE}"),
        ));
        return None;
    }
    Some(n)
}

pub(crate) fn parse_member<T: FromStr>(field: &str, raw: &str, issues: &mut Vec<Issue>) -> Option<T> {
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            issues.push(Issue::field(field, format!("invalid value '{raw}'")));
            None
        }
    }
}
