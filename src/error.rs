//! Common error types for the database layer.
//!
//! Connection and connectivity failures are returned to the caller from
//! `Database::connect`; schema sync failures carry the table they occurred
//! on. The only place this crate panics is `db::global()` when the handle
//! was never installed.

use thiserror::Error;

/// Result type alias for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Unified error type for the database layer
#[derive(Debug, Error)]
pub enum DbError {
    /// Opening the connection pool failed
    #[error("failed to open connection pool: {0}")]
    Connection(#[source] sqlx::Error),

    /// The pool opened but the liveness ping failed
    #[error("database unreachable: {0}")]
    Connectivity(#[source] sqlx::Error),

    /// Additive schema sync failed for a specific table
    #[error("schema sync failed for table `{table}`: {source}")]
    Migration {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    /// A transaction could not be started, committed, or rolled back,
    /// or a statement inside one failed
    #[error("transaction error: {0}")]
    Transaction(#[from] sqlx::Error),

    /// A second global install was attempted; the handle is never
    /// silently replaced
    #[error("database handle is already initialized")]
    AlreadyInitialized,

    /// Marker for queries that expected a record and found none
    #[error("record not found")]
    NotFound,
}
