//! Showroom: car and user CRUD backend.

pub mod auth;
pub mod domain;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod storage;

pub use error::{ApiError, Issue, OpError};
pub use routes::{api_routes, common_routes, common_routes_with_ready};
pub use service::{try_create, try_delete, try_read, try_update, Outcome};
pub use state::AppState;
pub use storage::{connect_pool, ensure_database_exists, ensure_tables, shutdown_pool};
