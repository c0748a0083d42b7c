//! User operations: create, search, credential login.

use crate::domain::credentials::parse_credentials;
use crate::domain::page::Page;
use crate::domain::user::{parse_new_user, User, UserFilter};
use crate::error::OpError;
use crate::service::password;
use crate::storage;
use serde_json::Value;
use sqlx::PgPool;

/// Validate the raw body, hash the supplied password, insert.
pub async fn create_user(pool: &PgPool, body: Value) -> Result<User, OpError> {
    let (user, plaintext) = parse_new_user(&body)?;
    let hash = password::salt_and_hash(&plaintext)?;
    storage::user::create(pool, &user, &hash).await
}

pub async fn search_users(pool: &PgPool, filter: &UserFilter) -> Result<Page<User>, OpError> {
    storage::user::search(pool, filter).await
}

/// Verify credentials against the stored hash. `None` covers every bad
/// credential: malformed input, unknown email, a record with no stored
/// hash, and a wrong password. `Err` is reserved for infrastructure
/// failures.
pub async fn login_with_credentials(pool: &PgPool, body: &Value) -> Result<Option<User>, OpError> {
    let Ok(credentials) = parse_credentials(body) else {
        return Ok(None);
    };
    let Some((user, stored_hash)) = storage::user::read_by_email(pool, &credentials.email).await?
    else {
        return Ok(None);
    };
    let Some(stored_hash) = stored_hash else {
        return Ok(None);
    };
    if password::verify(&credentials.password, &stored_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}
