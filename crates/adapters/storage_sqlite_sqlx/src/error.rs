//! Storage-specific error type wrapping sqlx errors.

use inventory_domain::error::InventoryError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The connection URL was rejected or the pool could not connect.
    #[error("cannot open product database")]
    Connect(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("cannot migrate product database")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A statement against the `products` table failed.
    #[error("product {operation} query failed")]
    Query {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl StorageError {
    /// Tag a failed statement with the repository operation that issued it.
    pub(crate) fn query(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Query { operation, source }
    }
}

impl From<StorageError> for InventoryError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
