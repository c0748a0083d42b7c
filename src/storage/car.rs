//! Car rows, mappers, and queries.

use crate::domain::car::{Car, CarFilter, CarUpdate, NewCar};
use crate::domain::page::Page;
use crate::error::OpError;
use crate::sql::builder;
use crate::sql::params::BindValue;
use crate::sql::predicate::{Condition, Predicate};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const TABLE: &str = "cars";
const COLUMNS: &[&str] = &["id", "name", "created_at", "updated_at"];

#[derive(sqlx::FromRow)]
struct CarRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn row_to_car(row: CarRow) -> Car {
    Car {
        id: row.id,
        name: row.name,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Compile a validated filter into the storage predicate. Cars have one
/// text field and no categorical groups.
pub fn filter_to_predicate(filter: &CarFilter) -> Predicate {
    let mut conditions = Vec::new();
    if let Some(query) = &filter.query {
        if !query.is_empty() {
            conditions.push(Condition::Contains {
                column: "name",
                term: query.trim().to_string(),
            });
        }
    }
    Predicate::from_conditions(conditions)
}

pub async fn search(pool: &PgPool, filter: &CarFilter) -> Result<Page<Car>, OpError> {
    let predicate = filter_to_predicate(filter);

    let count_q = builder::count(TABLE, &predicate);
    tracing::debug!(sql = %count_q.sql, params = ?count_q.params, "query");
    let mut query = sqlx::query_scalar::<_, i64>(&count_q.sql);
    for p in &count_q.params {
        query = query.bind(p.clone());
    }
    let total = query.fetch_one(pool).await?;

    let q = builder::select_page(
        TABLE,
        COLUMNS,
        &predicate,
        Some((filter.sort_by.column(), filter.sort_order)),
        filter.skip,
        filter.take,
    );
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, CarRow>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    let rows = query.fetch_all(pool).await?;

    Ok(Page {
        records: rows.into_iter().map(row_to_car).collect(),
        total,
    })
}

pub async fn create(pool: &PgPool, car: &NewCar) -> Result<Car, OpError> {
    let values = [("name", BindValue::Text(car.name.clone()))];
    let q = builder::insert(TABLE, &values, COLUMNS);
    tracing::debug!(sql = %q.sql, "query");
    let mut query = sqlx::query_as::<_, CarRow>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    let row = query.fetch_one(pool).await?;
    Ok(row_to_car(row))
}

pub async fn read(pool: &PgPool, id: Uuid) -> Result<Option<Car>, OpError> {
    let q = builder::select_by_id(TABLE, COLUMNS, id);
    tracing::debug!(sql = %q.sql, "query");
    let mut query = sqlx::query_as::<_, CarRow>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    let row = query.fetch_optional(pool).await?;
    Ok(row.map(row_to_car))
}

/// Update by id; `None` when no row matched.
pub async fn update(pool: &PgPool, car: &CarUpdate) -> Result<Option<Car>, OpError> {
    let sets = [("name", BindValue::Text(car.name.clone()))];
    let q = builder::update_by_id(TABLE, car.id, &sets, COLUMNS);
    tracing::debug!(sql = %q.sql, "query");
    let mut query = sqlx::query_as::<_, CarRow>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    let row = query.fetch_optional(pool).await?;
    Ok(row.map(row_to_car))
}

/// Delete by id; `false` when no row matched.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, OpError> {
    let q = builder::delete_by_id(TABLE, id);
    tracing::debug!(sql = %q.sql, "query");
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    let result = query.execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(query: Option<&str>) -> CarFilter {
        CarFilter {
            query: query.map(str::to_string),
            ..CarFilter::default()
        }
    }

    #[test]
    fn null_query_compiles_to_match_all() {
        assert!(filter_to_predicate(&filter(None)).is_match_all());
    }

    #[test]
    fn query_compiles_to_contains_on_name() {
        assert_eq!(
            filter_to_predicate(&filter(Some("Tesla"))).condition(),
            Some(&Condition::Contains {
                column: "name",
                term: "Tesla".into()
            })
        );
    }

    #[test]
    fn query_is_trimmed_at_compile_time() {
        assert_eq!(
            filter_to_predicate(&filter(Some("  Tesla  "))),
            filter_to_predicate(&filter(Some("Tesla")))
        );
    }

    #[test]
    fn whitespace_only_query_compiles_to_empty_contains() {
        assert_eq!(
            filter_to_predicate(&filter(Some("   "))).condition(),
            Some(&Condition::Contains {
                column: "name",
                term: String::new()
            })
        );
    }

    #[test]
    fn empty_query_adds_no_condition() {
        assert!(filter_to_predicate(&filter(Some(""))).is_match_all());
    }
}
