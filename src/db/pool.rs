//! Database connection pool management.
//!
//! Builds a SQLite connection pool from a [`DatabaseConfig`], verifies
//! liveness with a ping, and exposes pool statistics for monitoring.
//!
//! # Example
//!
//! ```no_run
//! use dbkit::config::DatabaseConfig;
//! use dbkit::db::pool::{create_pool, ping};
//!
//! # async fn example() -> dbkit::DbResult<()> {
//! let config = DatabaseConfig::new("sqlite://data/app.db");
//! let pool = create_pool(&config).await?;
//! ping(&pool).await?;
//! # Ok(())
//! # }
//! ```

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::error::{DbError, DbResult};

/// Creates and initializes a connection pool
///
/// The database file is created if it does not exist. When
/// `config.log_statements` is set, every executed statement is logged at
/// DEBUG level; otherwise statement logging is disabled entirely.
///
/// # Errors
///
/// Returns [`DbError::Connection`] if the URL is invalid or the database
/// cannot be opened.
pub async fn create_pool(config: &DatabaseConfig) -> DbResult<SqlitePool> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        acquire_timeout_seconds = config.acquire_timeout_seconds,
        "creating database connection pool"
    );

    let mut connect_options = SqliteConnectOptions::from_str(&config.url)
        .map_err(DbError::Connection)?
        .create_if_missing(true);

    connect_options = if config.log_statements {
        connect_options.log_statements(log::LevelFilter::Debug)
    } else {
        connect_options.disable_statement_logging()
    };

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .test_before_acquire(config.test_before_acquire);

    if let Some(idle_timeout) = config.idle_timeout_seconds {
        pool_options = pool_options.idle_timeout(Duration::from_secs(idle_timeout));
        debug!(idle_timeout_seconds = idle_timeout, "set idle timeout");
    }

    if let Some(max_lifetime) = config.max_lifetime_seconds {
        pool_options = pool_options.max_lifetime(Duration::from_secs(max_lifetime));
        debug!(max_lifetime_seconds = max_lifetime, "set max lifetime");
    }

    let pool = pool_options
        .connect_with(connect_options)
        .await
        .map_err(DbError::Connection)?;

    info!("database connection pool created");
    Ok(pool)
}

/// Verifies the database is reachable and responding
///
/// # Errors
///
/// Returns [`DbError::Connectivity`] if the liveness query fails.
pub async fn ping(pool: &SqlitePool) -> DbResult<()> {
    debug!("pinging database");

    let result: (i32,) = sqlx::query_as("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(DbError::Connectivity)?;

    if result.0 == 1 {
        Ok(())
    } else {
        Err(DbError::Connectivity(sqlx::Error::Protocol(
            "liveness check returned unexpected value".into(),
        )))
    }
}

/// Current pool statistics for monitoring
#[derive(Debug, Clone)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub active_connections: usize,

    /// Number of idle connections available
    pub idle_connections: usize,

    /// Total connections in the pool
    pub total_connections: usize,
}

/// Gets current pool statistics
pub fn pool_stats(pool: &SqlitePool) -> PoolStats {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    PoolStats {
        active_connections: size.saturating_sub(idle),
        idle_connections: idle,
        total_connections: size,
    }
}

/// Gracefully closes the connection pool
///
/// Call during application shutdown to release connections deterministically
/// rather than relying on process-exit teardown.
pub async fn close_pool(pool: SqlitePool) {
    info!("closing database connection pool");
    pool.close().await;
}
