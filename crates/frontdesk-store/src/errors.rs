//! Store error types.

use thiserror::Error;

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to check a connection out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// SQLite-level failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored JSON document failed to (de)serialize.
    #[error("document serialization error: {0}")]
    Document(#[from] serde_json::Error),

    /// Invariant violation inside the store itself.
    #[error("internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// True for transient `SQLITE_BUSY`/`SQLITE_LOCKED` failures worth retrying.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if matches!(
                    err.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                )
        )
    }
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, StoreError>;
