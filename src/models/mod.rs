//! Shared model building blocks.
//!
//! - `record`: the base embedded field set composed into persisted entities,
//!   and the generic attribute map for ad-hoc conditions and partial updates

pub mod record;

pub use record::{Record, Values};
