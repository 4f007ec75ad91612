//! # optlink-test
//!
//! Test tooling and integration tests for optlink.
//!
//! This crate contains:
//! - An in-memory SQL database implementing the driver traits by
//!   interpreting the statements optlink generates
//! - End-to-end round-trip scenarios in `tests/`

#![warn(missing_docs)]
#![warn(clippy::all)]

/// In-memory SQL database behind the driver traits
pub mod memdb;

pub use memdb::{ColumnType, MemoryDb, MEMORY_DRIVER};
