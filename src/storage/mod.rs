//! PostgreSQL bootstrap and per-entity queries.

pub mod car;
pub mod user;

use crate::error::OpError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Create the shared pool. Built once at startup and passed into the
/// handlers through [`crate::state::AppState`]; close it through
/// [`shutdown_pool`].
pub async fn connect_pool(database_url: &str) -> Result<PgPool, OpError> {
    Ok(PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?)
}

/// Drain and close the pool. Long-lived processes call this on shutdown
/// instead of relying on process exit.
pub async fn shutdown_pool(pool: &PgPool) {
    pool.close().await;
}

/// Tables for both entities. `gen_random_uuid()` requires PostgreSQL 13+
/// (or pgcrypto).
pub async fn ensure_tables(pool: &PgPool) -> Result<(), OpError> {
    const DDL: &[&str] = &[
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            email_verified BOOLEAN NOT NULL DEFAULT FALSE,
            image TEXT,
            role TEXT,
            banned BOOLEAN DEFAULT FALSE,
            ban_reason TEXT,
            ban_expires TIMESTAMPTZ,
            password TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        "CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users (email)",
        r#"
        CREATE TABLE IF NOT EXISTS cars (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ];
    for ddl in DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not.
/// Connects to the `postgres` maintenance database to run CREATE
/// DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), OpError> {
    let Some(path_start) = database_url.rfind('/') else {
        return Ok(());
    };
    let db_name = database_url[path_start + 1..]
        .split('?')
        .next()
        .unwrap_or("")
        .trim();
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let admin_url = format!("{}postgres", &database_url[..path_start + 1]);
    let opts = PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        let quoted = format!("\"{}\"", db_name.replace('"', "\"\""));
        sqlx::query(&format!("CREATE DATABASE {}", quoted))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}
