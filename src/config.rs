//! Pool configuration and environment loading.
//!
//! All timeouts are specified in seconds for ease of configuration from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: connection string (required by `from_env`)
//! - `DATABASE_MAX_CONNECTIONS`: maximum pool size (default: 100)
//! - `DATABASE_MIN_CONNECTIONS`: idle connection floor (default: 3)
//! - `DATABASE_LOG_STATEMENTS`: enable per-statement logging (default: false)

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for the database connection pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (e.g., "sqlite://data/app.db")
    pub url: String,

    /// Maximum number of connections in the pool
    ///
    /// Default: 100. Bounds the number of concurrent in-flight
    /// database operations.
    pub max_connections: u32,

    /// Minimum number of idle connections to maintain
    ///
    /// Default: 3. Idle connections beyond this floor are reaped once
    /// `idle_timeout_seconds` elapses.
    pub min_connections: u32,

    /// Timeout for acquiring a connection from the pool (seconds)
    ///
    /// Default: 30 seconds
    pub acquire_timeout_seconds: u64,

    /// How long a connection can remain idle before being closed (seconds)
    ///
    /// Default: Some(180). None = connections never closed due to idle time.
    pub idle_timeout_seconds: Option<u64>,

    /// Maximum lifetime of a connection before forced recycling (seconds)
    ///
    /// Default: Some(180) (3 minutes). None = connections live forever.
    pub max_lifetime_seconds: Option<u64>,

    /// Whether to test connections before returning them from the pool
    ///
    /// Default: true
    pub test_before_acquire: bool,

    /// Whether to log every executed statement at DEBUG level
    ///
    /// Default: false
    pub log_statements: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 100,
            min_connections: 3,
            acquire_timeout_seconds: 30,
            idle_timeout_seconds: Some(180),
            max_lifetime_seconds: Some(180),
            test_before_acquire: true,
            log_statements: false,
        }
    }
}

impl DatabaseConfig {
    /// Creates a configuration for the given URL with default pool tuning
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Loads configuration from environment variables
    ///
    /// Reads a `.env` file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a numeric override
    /// fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let mut config = Self::new(url);

        if let Ok(max) = env::var("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = max.parse::<u32>()?;
        }
        if let Ok(min) = env::var("DATABASE_MIN_CONNECTIONS") {
            config.min_connections = min.parse::<u32>()?;
        }
        if let Ok(log) = env::var("DATABASE_LOG_STATEMENTS") {
            config.log_statements = log.parse::<bool>()?;
        }

        Ok(config)
    }
}
