//! Postgres connection pool.
//!
//! The pool is created once at startup and handed to each store by value
//! (`PgPool` is a cheap, shareable handle).

use anyhow::Context;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::AppConfig;

/// Bootstrap DDL for an empty database.
pub const SCHEMA: &str = include_str!("../migrations/0001_init.sql");

pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")
}

/// Connect using the database settings of `config`.
///
/// Returns `Ok(None)` when no `DATABASE_URL` is configured.
pub async fn connect_from_config(config: &AppConfig) -> anyhow::Result<Option<PgPool>> {
    match config.database_url.as_deref() {
        Some(url) => {
            let pool = connect(url, config.max_connections).await?;
            tracing::info!(max_connections = config.max_connections, "connected to Postgres");
            Ok(Some(pool))
        }
        None => Ok(None),
    }
}

/// Apply [`SCHEMA`]. Every statement is idempotent (`IF NOT EXISTS`).
pub async fn apply_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .context("failed to apply bootstrap schema")?;
    Ok(())
}
