//! User record, create payload, and search filter.

use crate::auth::Role;
use crate::domain::filter::{
    parse_csv, parse_member, parse_non_negative, parse_take, reject_unknown_fields, SortOrder,
    DEFAULT_TAKE,
};
use crate::domain::validate;
use crate::error::Issue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

/// Persisted user as the rest of the system sees it. The password hash
/// stays in storage and never appears here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub image: Option<String>,
    pub role: Option<Role>,
    pub banned: Option<bool>,
    pub ban_reason: Option<String>,
    pub ban_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload. Ids and timestamps are storage-assigned.
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub image: Option<String>,
    pub role: Option<Role>,
}

/// Coerce a raw create body into a payload plus the plaintext password.
/// All fields are checked before failing; issues accumulate.
pub fn parse_new_user(body: &Value) -> Result<(NewUser, String), Vec<Issue>> {
    let mut issues = Vec::new();
    let Some(map) = validate::as_object(body, &mut issues) else {
        return Err(issues);
    };

    let name = validate::required_string(map, "name", 1, 255, &mut issues);
    let email = validate::required_string(map, "email", 1, 255, &mut issues);
    if let Some(email) = &email {
        validate::check_email("email", email, &mut issues);
    }
    let password = validate::required_string(map, "password", 1, 32, &mut issues);
    let email_verified = validate::optional_bool(map, "emailVerified", false, &mut issues);
    let image = validate::optional_string(map, "image", 2048, &mut issues);
    let role = map
        .get("role")
        .filter(|v| !v.is_null())
        .and_then(|v| match v.as_str().and_then(|s| Role::from_str(s).ok()) {
            Some(role) => Some(role),
            None => {
                issues.push(Issue::field("role", "must be one of: admin, user"));
                None
            }
        });

    if !issues.is_empty() {
        return Err(issues);
    }
    // Unwraps cannot fire: each None above recorded an issue.
    Ok((
        NewUser {
            name: name.unwrap(),
            email: email.unwrap(),
            email_verified,
            image,
            role,
        },
        password.unwrap(),
    ))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Banned,
}

pub const ALL_USER_STATUSES: [UserStatus; 2] = [UserStatus::Active, UserStatus::Banned];

impl FromStr for UserStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "banned" => Ok(UserStatus::Banned),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserSortColumn {
    Name,
    Email,
    CreatedAt,
    UpdatedAt,
}

impl UserSortColumn {
    pub fn column(&self) -> &'static str {
        match self {
            UserSortColumn::Name => "name",
            UserSortColumn::Email => "email",
            UserSortColumn::CreatedAt => "created_at",
            UserSortColumn::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for UserSortColumn {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(UserSortColumn::Name),
            "email" => Ok(UserSortColumn::Email),
            "createdAt" => Ok(UserSortColumn::CreatedAt),
            "updatedAt" => Ok(UserSortColumn::UpdatedAt),
            _ => Err(()),
        }
    }
}

/// Fully validated user search request; every field present, defaults
/// applied.
#[derive(Clone, Debug, PartialEq)]
pub struct UserFilter {
    pub query: Option<String>,
    pub statuses: Vec<UserStatus>,
    pub roles: Vec<Role>,
    pub skip: i64,
    pub take: i64,
    pub sort_by: UserSortColumn,
    pub sort_order: SortOrder,
}

const KNOWN_FIELDS: &[&str] = &[
    "query",
    "statuses",
    "roles",
    "skip",
    "take",
    "sortBy",
    "sortOrder",
];

/// Typed candidate between coercion and defaulting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserFilterDraft {
    pub query: Option<String>,
    pub statuses: Vec<UserStatus>,
    pub roles: Vec<Role>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<UserSortColumn>,
    pub sort_order: Option<SortOrder>,
}

impl UserFilterDraft {
    /// Stage one: coerce raw query parameters, strict on unknown fields,
    /// accumulating issues across the whole map.
    pub fn coerce(params: &HashMap<String, String>) -> Result<Self, Vec<Issue>> {
        let mut issues = Vec::new();
        reject_unknown_fields(params, KNOWN_FIELDS, &mut issues);

        let draft = UserFilterDraft {
            query: params.get("query").cloned(),
            statuses: params
                .get("statuses")
                .map(|raw| parse_csv("statuses", raw, &mut issues))
                .unwrap_or_default(),
            roles: params
                .get("roles")
                .map(|raw| parse_csv("roles", raw, &mut issues))
                .unwrap_or_default(),
            skip: params
                .get("skip")
                .and_then(|raw| parse_non_negative("skip", raw, &mut issues)),
            take: params
                .get("take")
                .and_then(|raw| parse_take("take", raw, &mut issues)),
            sort_by: params
                .get("sortBy")
                .and_then(|raw| parse_member("sortBy", raw, &mut issues)),
            sort_order: params
                .get("sortOrder")
                .and_then(|raw| parse_member("sortOrder", raw, &mut issues)),
        };

        if issues.is_empty() {
            Ok(draft)
        } else {
            Err(issues)
        }
    }

    /// Stage two: fill defaults for absent optional fields. Idempotent.
    pub fn with_defaults(self) -> UserFilter {
        UserFilter {
            query: self.query,
            statuses: self.statuses,
            roles: self.roles,
            skip: self.skip.unwrap_or(0),
            take: self.take.unwrap_or(DEFAULT_TAKE),
            sort_by: self.sort_by.unwrap_or(UserSortColumn::UpdatedAt),
            sort_order: self.sort_order.unwrap_or(SortOrder::Desc),
        }
    }
}

impl UserFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, Vec<Issue>> {
        UserFilterDraft::coerce(params).map(UserFilterDraft::with_defaults)
    }
}

impl Default for UserFilter {
    fn default() -> Self {
        UserFilterDraft::default().with_defaults()
    }
}
