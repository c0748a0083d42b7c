//! Builds parameterized SELECT, INSERT, UPDATE, DELETE statements.
//!
//! All identifiers come from compile-time constants in the storage layer;
//! user input only ever travels through `$n` parameters.

use crate::domain::filter::SortOrder;
use crate::sql::params::BindValue;
use crate::sql::predicate::{Condition, Predicate};

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// LIKE wildcards in a search term are literals, not patterns.
fn like_escape(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// SQL cast appended to a placeholder so the text-protocol parameter
/// reaches the column with the right type.
fn cast_for(value: &BindValue) -> &'static str {
    match value {
        BindValue::Bool(_) => "::boolean",
        BindValue::I64(_) => "::bigint",
        BindValue::Uuid(_) => "::uuid",
        BindValue::Null | BindValue::Text(_) => "",
    }
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, value: BindValue) -> usize {
        self.params.push(value);
        self.params.len()
    }
}

fn select_column_list(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_condition(condition: &Condition, q: &mut QueryBuf) -> String {
    match condition {
        Condition::Contains { column, term } => {
            let n = q.push_param(BindValue::Text(format!("%{}%", like_escape(term))));
            format!("{} ILIKE ${}", quoted(column), n)
        }
        Condition::Eq { column, value } => {
            let cast = cast_for(value);
            let n = q.push_param(value.clone());
            format!("{} = ${}{}", quoted(column), n, cast)
        }
        Condition::In { column, values } => {
            let placeholders: Vec<String> = values
                .iter()
                .map(|v| format!("${}", q.push_param(BindValue::Text(v.clone()))))
                .collect();
            format!("{} IN ({})", quoted(column), placeholders.join(", "))
        }
        Condition::Or(parts) => group(parts, " OR ", q),
        Condition::And(parts) => group(parts, " AND ", q),
    }
}

fn group(parts: &[Condition], sep: &str, q: &mut QueryBuf) -> String {
    let rendered: Vec<String> = parts.iter().map(|c| render_condition(c, q)).collect();
    format!("({})", rendered.join(sep))
}

fn where_clause(predicate: &Predicate, q: &mut QueryBuf) -> String {
    match predicate.condition() {
        None => String::new(),
        Some(condition) => format!(" WHERE {}", render_condition(condition, q)),
    }
}

/// COUNT over the predicate, ignoring any pagination window.
pub fn count(table: &str, predicate: &Predicate) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(predicate, &mut q);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", quoted(table), where_sql);
    q
}

/// Page fetch: predicate, optional order-by, LIMIT/OFFSET window. With no
/// order column the storage-defined order applies.
pub fn select_page(
    table: &str,
    columns: &[&str],
    predicate: &Predicate,
    order: Option<(&str, SortOrder)>,
    skip: i64,
    take: i64,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(predicate, &mut q);
    let order_sql = match order {
        Some((column, direction)) => {
            format!(" ORDER BY {} {}", quoted(column), direction.as_sql())
        }
        None => String::new(),
    };
    q.sql = format!(
        "SELECT {} FROM {}{}{} LIMIT {} OFFSET {}",
        select_column_list(columns),
        quoted(table),
        where_sql,
        order_sql,
        take,
        skip
    );
    q
}

/// SELECT by primary key; the id is the sole parameter.
pub fn select_by_id(table: &str, columns: &[&str], id: uuid::Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Uuid(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}::uuid",
        select_column_list(columns),
        quoted(table),
        quoted("id"),
        n
    );
    q
}

/// SELECT by exact match on one column.
pub fn select_by_column(table: &str, columns: &[&str], column: &str, value: BindValue) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cast = cast_for(&value);
    let n = q.push_param(value);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}{}",
        select_column_list(columns),
        quoted(table),
        quoted(column),
        n,
        cast
    );
    q
}

/// INSERT with RETURNING; values bound in column order.
pub fn insert(table: &str, values: &[(&str, BindValue)], returning: &[&str]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (column, value) in values {
        let cast = cast_for(value);
        let n = q.push_param(value.clone());
        cols.push(quoted(column));
        placeholders.push(format!("${}{}", n, cast));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(returning)
    );
    q
}

/// UPDATE by id with RETURNING. `updated_at` is refreshed on every write.
pub fn update_by_id(
    table: &str,
    id: uuid::Uuid,
    sets: &[(&str, BindValue)],
    returning: &[&str],
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut set_parts = Vec::new();
    for (column, value) in sets {
        let cast = cast_for(value);
        let n = q.push_param(value.clone());
        set_parts.push(format!("{} = ${}{}", quoted(column), n, cast));
    }
    set_parts.push(format!("{} = NOW()", quoted("updated_at")));
    let id_param = q.push_param(BindValue::Uuid(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}::uuid RETURNING {}",
        quoted(table),
        set_parts.join(", "),
        quoted("id"),
        id_param,
        select_column_list(returning)
    );
    q
}

/// DELETE by id; the caller checks rows_affected for absence.
pub fn delete_by_id(table: &str, id: uuid::Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Uuid(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}::uuid",
        quoted(table),
        quoted("id"),
        n
    );
    q
}
