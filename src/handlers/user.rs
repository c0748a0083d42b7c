//! User handlers: admin-gated search and create, credential login.

use crate::auth;
use crate::domain::user::UserFilter;
use crate::error::ApiError;
use crate::extractors::Session;
use crate::service::{dispatch, user as users};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn require_admin(session: &Session) -> Result<(), ApiError> {
    if auth::is_admin(&session.0) {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".into()))
    }
}

pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    require_admin(&session)?;
    let filter = UserFilter::from_query(&params).map_err(ApiError::InvalidQuery)?;
    let page = users::search_users(&state.pool, &filter).await?;
    Ok(Json(page).into_response())
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    require_admin(&session)?;
    Ok(
        dispatch::try_create(|b| users::create_user(&state.pool, b), body)
            .await
            .into_created(),
    )
}

/// Credential check for the external session provider. Returns the user
/// on success; any bad credential is a plain 401.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    match users::login_with_credentials(&state.pool, &body).await? {
        Some(user) => Ok(Json(user).into_response()),
        None => Err(ApiError::Unauthorized("Invalid credentials".into())),
    }
}
