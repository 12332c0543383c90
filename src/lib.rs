//! # dbkit
//!
//! A small bootstrap layer for a sqlx-backed database stack: open a pooled
//! connection with opinionated tuning defaults, register a set of table
//! descriptors for additive schema sync, and work inside scoped transactions
//! that always end in commit or rollback.
//!
//! ## Module Organization
//!
//! - `config`: Pool configuration and environment loading
//! - `db`: Connection pool, schema sync, transactions, and the `Database` handle
//! - `schema`: Declarative table/column descriptors and the schema registry
//! - `models`: Base embedded record fields and the generic attribute map
//! - `error`: Common error types
//!
//! ## Example
//!
//! ```no_run
//! use dbkit::{ColumnDef, ColumnType, Database, DatabaseConfig, SchemaRegistry, TableDef};
//!
//! #[tokio::main]
//! async fn main() -> dbkit::DbResult<()> {
//!     let mut registry = SchemaRegistry::new();
//!     registry.register(
//!         TableDef::with_base_columns("user")
//!             .column(ColumnDef::new("email", ColumnType::Text).unique()),
//!     );
//!
//!     let config = DatabaseConfig::new("sqlite://app.db");
//!     let db = Database::connect(config, registry).await?;
//!
//!     let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user")
//!         .fetch_one(db.pool())
//!         .await?;
//!     println!("{} users", row.0);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod schema;

pub use config::DatabaseConfig;
pub use db::handle::{global, install, try_global, Database};
pub use db::pool::{close_pool, create_pool, ping, pool_stats, PoolStats};
pub use db::tx::with_transaction;
pub use error::{DbError, DbResult};
pub use models::{Record, Values};
pub use schema::{base_columns, ColumnDef, ColumnType, SchemaRegistry, TableDef};

/// Current version of the dbkit library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
