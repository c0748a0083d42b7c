//! User rows, mappers, and queries.

use crate::auth::Role;
use crate::domain::page::Page;
use crate::domain::user::{NewUser, User, UserFilter, UserStatus};
use crate::error::OpError;
use crate::sql::builder;
use crate::sql::params::BindValue;
use crate::sql::predicate::{Condition, Predicate};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

const TABLE: &str = "users";
const COLUMNS: &[&str] = &[
    "id",
    "name",
    "email",
    "email_verified",
    "image",
    "role",
    "banned",
    "ban_reason",
    "ban_expires",
    "created_at",
    "updated_at",
];
const AUTH_COLUMNS: &[&str] = &[
    "id",
    "name",
    "email",
    "email_verified",
    "image",
    "role",
    "banned",
    "ban_reason",
    "ban_expires",
    "created_at",
    "updated_at",
    "password",
];

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    email_verified: bool,
    image: Option<String>,
    role: Option<String>,
    banned: Option<bool>,
    ban_reason: Option<String>,
    ban_expires: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct UserAuthRow {
    #[sqlx(flatten)]
    user: UserRow,
    password: Option<String>,
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: row.id,
        name: row.name,
        email: row.email,
        email_verified: row.email_verified,
        image: row.image,
        // An unrecognized role in storage reads as no role at all.
        role: row.role.as_deref().and_then(|s| Role::from_str(s).ok()),
        banned: row.banned,
        ban_reason: row.ban_reason,
        ban_expires: row.ban_expires,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Compile a validated filter into the storage predicate.
pub fn filter_to_predicate(filter: &UserFilter) -> Predicate {
    let mut conditions = Vec::new();

    // Free text over both text fields.
    if let Some(query) = &filter.query {
        if !query.is_empty() {
            let term = query.trim().to_string();
            conditions.push(Condition::Or(vec![
                Condition::Contains {
                    column: "name",
                    term: term.clone(),
                },
                Condition::Contains {
                    column: "email",
                    term,
                },
            ]));
        }
    }

    // Status backs onto the banned boolean, which cannot express an IN
    // set over its two-value domain: exactly one selection constrains,
    // zero or both mean "show all".
    if filter.statuses.len() == 1 {
        let banned = filter.statuses[0] == UserStatus::Banned;
        conditions.push(Condition::Eq {
            column: "banned",
            value: BindValue::Bool(banned),
        });
    }

    if !filter.roles.is_empty() {
        conditions.push(Condition::In {
            column: "role",
            values: filter.roles.iter().map(|r| r.as_str().to_string()).collect(),
        });
    }

    Predicate::from_conditions(conditions)
}

/// Count plus bounded fetch over the same predicate. The two reads run
/// outside a transaction; the total and the page are weakly consistent
/// under concurrent writes.
pub async fn search(pool: &PgPool, filter: &UserFilter) -> Result<Page<User>, OpError> {
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
    let mut query = sqlx::query_as::<_, UserRow>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    let rows = query.fetch_all(pool).await?;

    Ok(Page {
        records: rows.into_iter().map(row_to_user).collect(),
        total,
    })
}

/// Insert one user with the already-hashed password. Returns the created
/// record (hash excluded).
pub async fn create(pool: &PgPool, user: &NewUser, password_hash: &str) -> Result<User, OpError> {
    let values = [
        ("name", BindValue::Text(user.name.clone())),
        ("email", BindValue::Text(user.email.clone())),
        ("email_verified", BindValue::Bool(user.email_verified)),
        (
            "image",
            user.image
                .clone()
                .map(BindValue::Text)
                .unwrap_or(BindValue::Null),
        ),
        (
            "role",
            user.role
                .map(|r| BindValue::Text(r.as_str().to_string()))
                .unwrap_or(BindValue::Null),
        ),
        ("password", BindValue::Text(password_hash.to_string())),
    ];
    let q = builder::insert(TABLE, &values, COLUMNS);
    tracing::debug!(sql = %q.sql, "query");
    let mut query = sqlx::query_as::<_, UserRow>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    let row = query.fetch_one(pool).await?;
    Ok(row_to_user(row))
}

/// Fetch a user and their password hash by email, for credential login.
pub async fn read_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<(User, Option<String>)>, OpError> {
    let q = builder::select_by_column(
        TABLE,
        AUTH_COLUMNS,
        "email",
        BindValue::Text(email.to_string()),
    );
    tracing::debug!(sql = %q.sql, "query");
    let mut query = sqlx::query_as::<_, UserAuthRow>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    let row = query.fetch_optional(pool).await?;
    Ok(row.map(|r| (row_to_user(r.user), r.password)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::SortOrder;
    use crate::domain::user::UserSortColumn;

    fn filter() -> UserFilter {
        UserFilter::default()
    }

    #[test]
    fn no_filters_compile_to_match_all() {
        assert!(filter_to_predicate(&filter()).is_match_all());
    }

    #[test]
    fn query_compiles_to_or_over_name_and_email() {
        let f = UserFilter {
            query: Some("john".into()),
            ..filter()
        };
        assert_eq!(
            filter_to_predicate(&f).condition(),
            Some(&Condition::Or(vec![
                Condition::Contains {
                    column: "name",
                    term: "john".into()
                },
                Condition::Contains {
                    column: "email",
                    term: "john".into()
                },
            ]))
        );
    }

    #[test]
    fn query_is_trimmed_at_compile_time() {
        let padded = UserFilter {
            query: Some("  john  ".into()),
            ..filter()
        };
        let bare = UserFilter {
            query: Some("john".into()),
            ..filter()
        };
        assert_eq!(filter_to_predicate(&padded), filter_to_predicate(&bare));
    }

    #[test]
    fn empty_query_adds_no_condition() {
        let f = UserFilter {
            query: Some(String::new()),
            ..filter()
        };
        assert!(filter_to_predicate(&f).is_match_all());
    }

    #[test]
    fn single_active_status_constrains_banned_false() {
        let f = UserFilter {
            statuses: vec![UserStatus::Active],
            ..filter()
        };
        assert_eq!(
            filter_to_predicate(&f).condition(),
            Some(&Condition::Eq {
                column: "banned",
                value: BindValue::Bool(false)
            })
        );
    }

    #[test]
    fn single_banned_status_constrains_banned_true() {
        let f = UserFilter {
            statuses: vec![UserStatus::Banned],
            ..filter()
        };
        assert_eq!(
            filter_to_predicate(&f).condition(),
            Some(&Condition::Eq {
                column: "banned",
                value: BindValue::Bool(true)
            })
        );
    }

    #[test]
    fn both_statuses_add_no_condition() {
        let f = UserFilter {
            statuses: vec![UserStatus::Active, UserStatus::Banned],
            ..filter()
        };
        assert!(filter_to_predicate(&f).is_match_all());
    }

    #[test]
    fn empty_statuses_add_no_condition() {
        assert!(filter_to_predicate(&filter()).is_match_all());
    }

    #[test]
    fn roles_compile_to_membership() {
        let f = UserFilter {
            roles: vec![Role::Admin, Role::User],
            ..filter()
        };
        assert_eq!(
            filter_to_predicate(&f).condition(),
            Some(&Condition::In {
                column: "role",
                values: vec!["admin".into(), "user".into()]
            })
        );
    }

    #[test]
    fn combined_filters_and_in_insertion_order() {
        let f = UserFilter {
            query: Some("john".into()),
            statuses: vec![UserStatus::Active],
            roles: vec![Role::Admin, Role::User],
            ..filter()
        };
        let Some(Condition::And(parts)) = filter_to_predicate(&f).condition().cloned() else {
            panic!("expected an AND of three conditions");
        };
        assert_eq!(parts.len(), 3);
        assert!(matches!(parts[0], Condition::Or(_)));
        assert!(matches!(
            parts[1],
            Condition::Eq {
                column: "banned",
                ..
            }
        ));
        assert!(matches!(parts[2], Condition::In { column: "role", .. }));
    }

    #[test]
    fn end_to_end_filter_compiles_to_expected_sql() {
        let f = UserFilter {
            query: Some("john".into()),
            statuses: vec![UserStatus::Active],
            roles: vec![Role::Admin, Role::User],
            skip: 10,
            take: 5,
            sort_by: UserSortColumn::Name,
            sort_order: SortOrder::Asc,
        };
        let q = builder::select_page(
            TABLE,
            &["id"],
            &filter_to_predicate(&f),
            Some((f.sort_by.column(), f.sort_order)),
            f.skip,
            f.take,
        );
        assert_eq!(
            q.sql,
            "SELECT \"id\" FROM \"users\" WHERE ((\"name\" ILIKE $1 OR \"email\" ILIKE $2) \
             AND \"banned\" = $3::boolean AND \"role\" IN ($4, $5)) \
             ORDER BY \"name\" ASC LIMIT 5 OFFSET 10"
        );
        assert_eq!(
            q.params,
            vec![
                BindValue::Text("%john%".into()),
                BindValue::Text("%john%".into()),
                BindValue::Bool(false),
                BindValue::Text("admin".into()),
                BindValue::Text("user".into()),
            ]
        );
    }

    #[test]
    fn unknown_stored_role_maps_to_none() {
        let row = UserRow {
            id: Uuid::nil(),
            name: "x".into(),
            email: "x@y.z".into(),
            email_verified: false,
            image: None,
            role: Some("superadmin".into()),
            banned: None,
            ban_reason: None,
            ban_expires: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(row_to_user(row).role, None);
    }
}
