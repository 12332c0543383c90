//! The `Database` handle and the optional process-global install.
//!
//! `Database` owns the connection pool and the schema registry it was
//! connected with. Ownership is explicit: create it at the application's
//! composition point and pass it by reference. For applications that want a
//! process-wide handle, [`install`] publishes one immutably; a second
//! install is rejected rather than silently replacing the handle.
//!
//! # Example
//!
//! ```no_run
//! use dbkit::{Database, DatabaseConfig, SchemaRegistry, TableDef};
//!
//! # async fn example() -> dbkit::DbResult<()> {
//! let mut registry = SchemaRegistry::new();
//! registry.register(TableDef::with_base_columns("user"));
//!
//! let db = Database::connect(DatabaseConfig::new("sqlite://app.db"), registry).await?;
//! dbkit::install(db)?;
//!
//! let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user")
//!     .fetch_one(dbkit::global().pool())
//!     .await?;
//! # Ok(())
//! # }
//! ```

use futures::future::BoxFuture;
use once_cell::sync::OnceCell;
use sqlx::sqlite::SqlitePool;
use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::db::pool::{self, PoolStats};
use crate::db::{migrations, tx};
use crate::error::{DbError, DbResult};
use crate::schema::SchemaRegistry;

/// The database handle: a connection pool plus the schema registry it was
/// initialized with
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    registry: SchemaRegistry,
}

impl Database {
    /// Opens the pool, verifies liveness, and syncs schemas
    ///
    /// The registry is consumed and owned by the handle; the sync pass runs
    /// unconditionally (an empty registry makes it a no-op). The first
    /// failing phase is returned; pool tuning itself has no failure mode,
    /// so nothing needs rolling back.
    ///
    /// # Errors
    ///
    /// - [`DbError::Connection`] if the pool cannot be opened
    /// - [`DbError::Connectivity`] if the liveness ping fails
    /// - [`DbError::Migration`] if schema sync fails
    pub async fn connect(config: DatabaseConfig, registry: SchemaRegistry) -> DbResult<Self> {
        let pool = pool::create_pool(&config).await?;
        pool::ping(&pool).await?;
        migrations::sync_schemas(&pool, &registry).await?;

        info!(tables = registry.len(), "database ready");
        Ok(Self { pool, registry })
    }

    /// The pooled connection handle, for all data access
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The schema registry this handle was connected with
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Re-runs the additive schema sync pass
    ///
    /// Idempotent: with an unchanged registry the second run changes
    /// nothing.
    pub async fn sync_schemas(&self) -> DbResult<()> {
        migrations::sync_schemas(&self.pool, &self.registry).await
    }

    /// Begins a transaction
    ///
    /// Dropping the returned transaction without committing rolls it back,
    /// so early returns and panics cannot leak partial writes. Prefer
    /// [`transaction`](Self::transaction) for closure-scoped work.
    pub async fn begin(&self) -> DbResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Runs `f` inside a transaction, committing on `Ok` and rolling back
    /// on `Err`
    ///
    /// See [`with_transaction`](crate::db::tx::with_transaction).
    pub async fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<sqlx::Error> + std::fmt::Display,
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, E>>,
    {
        tx::with_transaction(&self.pool, f).await
    }

    /// Current pool statistics
    pub fn stats(&self) -> PoolStats {
        pool::pool_stats(&self.pool)
    }

    /// Gracefully closes the pool
    pub async fn close(&self) {
        pool::close_pool(self.pool.clone()).await;
    }
}

static GLOBAL: OnceCell<Database> = OnceCell::new();

/// Publishes a connected handle as the process-global database
///
/// # Errors
///
/// Returns [`DbError::AlreadyInitialized`] if a handle was already
/// installed. Re-initialization is rejected, never silent replacement.
pub fn install(db: Database) -> DbResult<()> {
    GLOBAL.set(db).map_err(|_| DbError::AlreadyInitialized)
}

/// The process-global database handle
///
/// # Panics
///
/// Panics if called before [`install`]. Accessing the database before
/// initialization is a programming error, and failing fast here prevents
/// silent use of an absent handle; callers must not catch this.
pub fn global() -> &'static Database {
    GLOBAL
        .get()
        .expect("database handle is not initialized; call dbkit::install after Database::connect")
}

/// The process-global handle, or `None` if not installed
pub fn try_global() -> Option<&'static Database> {
    GLOBAL.get()
}
