//! Server binary: env config, tracing, pool bootstrap, routes, graceful
//! shutdown with an explicit pool drain.
//!
//! The session provider is external; mount a layer that inserts an
//! `auth::Principal` into request extensions in front of the user routes
//! to enable them.

use axum::Router;
use showroom::{
    api_routes, common_routes_with_ready, connect_pool, ensure_database_exists, ensure_tables,
    shutdown_pool, AppState,
};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("showroom=info")),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/showroom".into());
    ensure_database_exists(&database_url).await?;
    let pool = connect_pool(&database_url).await?;
    ensure_tables(&pool).await?;

    let state = AppState { pool: pool.clone() };
    let app = Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api", api_routes(state))
        .layer(RequestBodyLimitLayer::new(1024 * 1024));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_pool(&pool).await;
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
}
