//! Entity routes. Handlers resolve ids themselves so a malformed path id
//! fails validation before anything is dispatched.

use crate::handlers::{car, user};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/cars", get(car::list).post(car::create))
        .route(
            "/cars/:id",
            get(car::read).put(car::update).delete(car::delete),
        )
        .route("/users", get(user::list).post(user::create))
        .route("/login", post(user::login))
        .with_state(state)
}
