//! `SQLite` connection pool setup and migration runner.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration for the `SQLite` storage adapter.
#[derive(Debug, Clone)]
pub struct Config {
    database_url: String,
    max_connections: u32,
}

impl Config {
    /// `database_url` is an sqlx `SQLite` URL such as `sqlite:inventory.db`
    /// or `sqlite::memory:`.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Cap the number of pooled connections. Zero is raised to one.
    #[must_use]
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    /// Open the pool, creating the database file if missing, and bring the
    /// `products` schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connect`] for an unusable URL or connection
    /// failure, and [`StorageError::Migration`] if a migration fails.
    pub async fn build(self) -> Result<Database, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Database { pool })
    }
}

/// An open, migrated product database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
