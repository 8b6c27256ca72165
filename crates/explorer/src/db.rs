//! Database connection and pool management.

use exn::ResultExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// One logical actor at a time: reads are drained before writes, and the
/// deletion transaction must see its own changes.
const MAX_CONNECTIONS: u32 = 1;

/// Database connection pool for the library database.
///
/// This is the main entry point for interacting with `explorer-3.db`.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn new(options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(Self { pool })
    }

    /// Connect to an existing library database.
    ///
    /// The database is owned by the device software: a missing file is an
    /// error, never a reason to create one.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let options = Self::base_options().filename(path).create_if_missing(false);
        Self::new(options).await
    }

    /// Connect to an in-memory database seeded with the library schema
    /// (useful for testing).
    ///
    /// Note:
    /// - In-memory databases are destroyed when the connection closes.
    /// - Not `#[cfg(test)]` only, so that other crates can use this in their
    ///   tests through the `fixtures` feature.
    #[cfg(any(test, feature = "fixtures"))]
    pub async fn connect_in_memory() -> Result<Self> {
        let options = Self::base_options().filename(":memory:");
        let db = Self::new(options).await?;
        sqlx::query(include_str!("../fixtures/schema.sql"))
            .execute(db.pool())
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(db)
    }

    /// Base connection options shared between file and in-memory databases.
    fn base_options() -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            // The device software does not enforce foreign keys; cleaning up
            // dependent tables is done explicitly instead.
            .foreign_keys(false)
            // The reader's UI may hold the database while we run.
            .busy_timeout(std::time::Duration::from_millis(5000))
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    ///
    /// This waits for all connections to be returned to the pool and then
    /// closes them. After calling this, the Database instance should not
    /// be used.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let db = Database::connect_in_memory().await.unwrap();
        assert!(!db.pool().is_closed());
        let tables: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(tables, 8);
        db.close().await;
    }

    #[tokio::test]
    async fn test_connect_never_creates() {
        let missing = std::env::temp_dir().join("pbfix-does-not-exist").join("explorer-3.db");
        let err = Database::connect(&missing).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(p) if *p == missing));
        assert!(!missing.exists());
    }

    #[tokio::test]
    async fn test_foreign_keys_left_off() {
        let db = Database::connect_in_memory().await.unwrap();
        let row: (i64,) = sqlx::query_as("PRAGMA foreign_keys").fetch_one(db.pool()).await.unwrap();
        assert_eq!(row.0, 0, "foreign_keys should be OFF");
        db.close().await;
    }
}
