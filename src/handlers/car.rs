//! Car CRUD handlers: search, create, read, update, delete.

use crate::domain::car::CarFilter;
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::service::{car as cars, dispatch};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let filter = CarFilter::from_query(&params).map_err(ApiError::InvalidQuery)?;
    let page = cars::search_cars(&state.pool, &filter).await?;
    Ok(Json(page).into_response())
}

pub async fn create(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    dispatch::try_create(|b| cars::create_car(&state.pool, b), body)
        .await
        .into_created()
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    Ok(dispatch::try_read(|id| cars::read_car(&state.pool, id), id)
        .await
        .into_ok())
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    Ok(
        dispatch::try_update(|b| cars::update_car(&state.pool, b), id, body)
            .await
            .into_no_content(),
    )
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    // Unexpected delete failures surface through ApiError instead of
    // being generalized inside the dispatcher.
    let outcome = dispatch::try_delete(|id| cars::delete_car(&state.pool, id), id).await?;
    Ok(outcome.into_no_content())
}
