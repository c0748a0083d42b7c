//! Caller identity and role checks.
//!
//! The session provider is an external collaborator: it authenticates the
//! request and attaches a [`Principal`] (see `extractors::session`). This
//! module only decides what an attached principal may do.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

pub const ALL_ROLES: [Role; 2] = [Role::Admin, Role::User];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(()),
        }
    }
}

/// The authenticated caller: identity, role, ban status. Supplied by the
/// session provider, read-only here, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub role: Option<Role>,
    pub banned: Option<bool>,
}

/// A banned principal holds no role, whatever the record says.
pub fn has_role(principal: &Principal, role: Role) -> bool {
    if principal.banned.unwrap_or(false) {
        return false;
    }
    principal.role == Some(role)
}

pub fn has_any_role(principal: &Principal, roles: &[Role]) -> bool {
    roles.iter().any(|role| has_role(principal, *role))
}

pub fn is_admin(principal: &Principal) -> bool {
    has_role(principal, Role::Admin)
}
