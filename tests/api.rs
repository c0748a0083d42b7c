//! Route-level tests for the paths that resolve before any storage
//! access: the authorization gate, filter validation, path-id parsing,
//! and the path/body id-mismatch guard. The pool is lazy and never
//! connects.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use showroom::auth::{Principal, Role};
use showroom::{api_routes, common_routes, AppState};
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/showroom_test")
        .expect("lazy pool");
    Router::new()
        .merge(common_routes())
        .nest("/api", api_routes(AppState { pool }))
}

fn principal(role: Option<Role>, banned: Option<bool>) -> Principal {
    Principal {
        id: "u1".into(),
        role,
        banned,
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_up_without_a_database() {
    let res = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn user_search_without_session_is_unauthorized() {
    let res = app()
        .oneshot(Request::get("/api/users").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn user_search_without_admin_role_is_forbidden() {
    let mut request = Request::get("/api/users").body(Body::empty()).unwrap();
    request
        .extensions_mut()
        .insert(principal(Some(Role::User), None));
    let res = app().oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = body_json(res).await;
    assert_eq!(body["code"], "forbidden");
    assert_eq!(body["errors"][0]["message"], "Admin access required");
}

#[tokio::test]
async fn banned_admin_is_forbidden() {
    let mut request = Request::get("/api/users").body(Body::empty()).unwrap();
    request
        .extensions_mut()
        .insert(principal(Some(Role::Admin), Some(true)));
    let res = app().oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn user_search_with_unknown_parameter_is_rejected() {
    let mut request = Request::get("/api/users?bogus=1")
        .body(Body::empty())
        .unwrap();
    request
        .extensions_mut()
        .insert(principal(Some(Role::Admin), None));
    let res = app().oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["code"], "invalid query parameters");
    assert_eq!(body["errors"][0]["path"], "bogus");
}

#[tokio::test]
async fn user_search_with_take_over_max_is_rejected() {
    let mut request = Request::get("/api/users?take=101")
        .body(Body::empty())
        .unwrap();
    request
        .extensions_mut()
        .insert(principal(Some(Role::Admin), None));
    let res = app().oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn car_update_with_mismatched_body_id_is_rejected_before_storage() {
    let path_id = Uuid::new_v4();
    let body = json!({"id": Uuid::new_v4().to_string(), "name": "Tesla"});
    let request = Request::put(format!("/api/cars/{path_id}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let res = app().oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["code"], "id_mismatch");
    assert_eq!(
        body["errors"][0]["message"],
        "id in body does not match id in path"
    );
}

#[tokio::test]
async fn malformed_path_id_is_a_validation_failure() {
    let res = app()
        .oneshot(
            Request::get("/api/cars/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["code"], "validation_error");
}

#[tokio::test]
async fn car_create_with_empty_name_reports_the_field() {
    let request = Request::post("/api/cars")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"name": ""}).to_string()))
        .unwrap();
    let res = app().oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["code"], "validation_error");
    assert_eq!(body["errors"][0]["path"], "name");
}
