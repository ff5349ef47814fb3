//! Schema setup for the employee table.
//!
//! The SQL files under `migrations/` are compiled into the binary and applied
//! on startup.

use crate::error::{DatabaseError, Result};
use sqlx::migrate::Migrator;
use sqlx::{Pool, Sqlite};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Table where `sqlx` records applied migrations.
const MIGRATIONS_TABLE: &str = "_sqlx_migrations";

/// Bring the `employees` schema up to date.
///
/// Already-applied migrations are skipped, so this is safe to call on every
/// start.
///
/// # Errors
/// Returns `DatabaseError::Migration` if a migration fails to apply.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DatabaseError::Migration(format!("employee schema migration failed: {e}")))?;

    tracing::info!(
        "Employee schema ready ({} migrations known)",
        MIGRATOR.iter().count()
    );
    Ok(())
}

/// Highest successfully applied migration, or 0 on a fresh database.
pub async fn get_schema_version(pool: &Pool<Sqlite>) -> Result<i64> {
    let tracked: Option<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(MIGRATIONS_TABLE)
            .fetch_optional(pool)
            .await?;
    if tracked.is_none() {
        return Ok(0);
    }

    let version: Option<i64> =
        sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;
    Ok(version.unwrap_or(0))
}
