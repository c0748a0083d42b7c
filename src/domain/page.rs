//! A bounded slice of search results.

use serde::Serialize;

/// `total` counts every record matching the filter, ignoring the
/// skip/take window; `records.len() <= take` always holds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub total: i64,
}
