//! Database layer: pool management, schema sync, and transactions.
//!
//! # Modules
//!
//! - `pool`: connection pool construction with liveness checks
//! - `migrations`: additive schema sync driven by the registry
//! - `tx`: scoped transaction helper
//! - `handle`: the `Database` handle and the optional process-global install

pub mod handle;
pub mod migrations;
pub mod pool;
pub mod tx;

pub use handle::{global, install, try_global, Database};
