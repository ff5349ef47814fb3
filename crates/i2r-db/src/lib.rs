//! i2r Database Layer
//!
//! Provides the `SQLite` record store for employee records.
//! Uses `SQLx` for queries and embedded migrations.
//!
//! # Example
//!
//! ```ignore
//! use i2r_db::{Database, EmployeeStore};
//!
//! let db = Database::new("i2r.db").await?;
//! db.run_migrations().await?;
//! let everyone = db.find_all().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod connection;
pub mod employees;
pub mod error;
pub mod migrations;
pub mod store;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use error::{DatabaseError, Result};
pub use store::EmployeeStore;

use std::path::Path;

/// High-level database interface with migrations.
///
/// This wraps a `DatabasePool` and implements [`EmployeeStore`].
#[derive(Debug, Clone)]
pub struct Database {
    pool: DatabasePool,
}

impl Database {
    /// Open a database with the default connection limit.
    ///
    /// # Arguments
    /// * `path` - Path to the database file (or `:memory:` for in-memory)
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let pool = DatabasePool::new(path).await?;
        Ok(Self { pool })
    }

    /// Open a database with an explicit connection limit.
    pub async fn with_max_connections(path: impl AsRef<Path>, max_connections: u32) -> Result<Self> {
        let pool = DatabasePool::with_max_connections(path, max_connections).await?;
        Ok(Self { pool })
    }

    /// Run all pending database migrations.
    ///
    /// # Errors
    /// Returns `DatabaseError::Migration` if any migration fails.
    pub async fn run_migrations(&self) -> Result<()> {
        migrations::run_migrations(self.pool.pool()).await
    }

    /// Check that the database answers queries.
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    /// Get the current schema version.
    pub async fn get_schema_version(&self) -> Result<i64> {
        migrations::get_schema_version(self.pool.pool()).await
    }

    /// Get a reference to the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Sqlite> {
        self.pool.pool()
    }

    /// Close the database connection gracefully.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use i2r_core::{EmployeeId, NewEmployee};

    async fn create_test_database() -> Database {
        let db = Database::new(":memory:").await.expect("create database");
        db.run_migrations().await.expect("run migrations");
        db
    }

    #[tokio::test]
    async fn test_database_migrations() {
        let db = Database::new(":memory:").await.expect("create database");

        let version_before = db.get_schema_version().await.expect("get version");
        assert_eq!(version_before, 0);

        db.run_migrations().await.expect("run migrations");

        let version_after = db.get_schema_version().await.expect("get version");
        assert_eq!(version_after, 1);
    }

    #[tokio::test]
    async fn test_ping_fails_after_close() {
        let db = create_test_database().await;
        db.ping().await.expect("ping open database");

        let handle = db.clone();
        db.close().await;
        assert!(handle.ping().await.is_err());
    }

    #[tokio::test]
    async fn test_store_save_and_find() {
        let db = create_test_database().await;

        let carol = db
            .save(NewEmployee::new("Carol", "Manager"), "P200".to_string())
            .await
            .expect("save employee");

        let found = db.find_by_id(carol.id).await.expect("find employee");
        assert_eq!(found, Some(carol.clone()));

        let all = db.find_all().await.expect("find all");
        assert_eq!(all, vec![carol]);
    }

    #[tokio::test]
    async fn test_store_find_missing() {
        let db = create_test_database().await;
        let found = db
            .find_by_id(EmployeeId::from(999))
            .await
            .expect("find employee");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_store_save_all_preserves_identities() {
        let db = create_test_database().await;
        for name in ["Alice", "Bob"] {
            db.save(NewEmployee::new(name, "Staff"), String::new())
                .await
                .expect("save employee");
        }

        let refreshed: Vec<_> = db
            .find_all()
            .await
            .expect("find all")
            .into_iter()
            .map(|e| {
                let id = format!("P-{}", e.name);
                e.with_pension_id(id)
            })
            .collect();

        let saved = db.save_all(refreshed.clone()).await.expect("save all");
        assert_eq!(saved, refreshed);
        assert_eq!(db.find_all().await.expect("find all"), refreshed);
    }

    #[tokio::test]
    async fn test_database_close() {
        let db = create_test_database().await;
        db.close().await; // Should not panic
    }
}
