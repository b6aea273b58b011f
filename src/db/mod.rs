mod models;
pub mod repository;

pub use models::*;
pub use repository::*;

use anyhow::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

pub type DbPool = SqlitePool;

/// Execute a SQL migration file, properly handling comments
async fn execute_sql(pool: &SqlitePool, sql: &str) -> Result<()> {
    for statement in sql.split(';') {
        // Strip SQL comment lines (lines starting with --)
        let cleaned: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let trimmed = cleaned.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }
    Ok(())
}

pub async fn init(config: &DatabaseConfig) -> Result<DbPool> {
    info!("Initializing database at {}", config.url);

    let pool = if config.is_in_memory() {
        // Every connection to `:memory:` is a fresh database, so keep exactly one alive forever
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect(&config.url)
            .await?
    } else {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        // Enable WAL mode for better concurrency
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await?;
        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await?;
        pool
    };

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    run_migrations(&pool).await?;

    info!("Database initialized successfully");
    Ok(pool)
}

async fn table_exists(pool: &SqlitePool, table: &str) -> Result<bool> {
    let found: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table)
            .fetch_optional(pool)
            .await?;
    Ok(found.is_some())
}

async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    // Migration 001: Legacy catalog items
    if !table_exists(pool, "items").await? {
        execute_sql(pool, include_str!("../../migrations/001_items.sql")).await?;
    }

    // Migration 002: User and admin accounts
    if !table_exists(pool, "admins").await? {
        execute_sql(pool, include_str!("../../migrations/002_accounts.sql")).await?;
    }

    // Migration 003: Products and registrations
    if !table_exists(pool, "registrations").await? {
        execute_sql(pool, include_str!("../../migrations/003_products.sql")).await?;
    }

    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    init(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database")
}
