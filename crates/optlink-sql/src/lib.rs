//! # optlink-sql
//!
//! The schema-driven SQL marshalling core of optlink.
//!
//! This crate implements both directions of the bridge:
//!
//! - **Read**: [`SqlDataSource`] executes configured queries and streams
//!   the rows into the engine through the handler protocol, driven by
//!   [`RowIngestor`]
//! - **Write**: [`SqlWriter`] recreates target tables from element
//!   schemas and streams solved tuples into parameterized INSERTs
//!
//! Supporting pieces: the driver-native [`SqlValue`] union, the type
//! [`mapper`] (the single conversion boundary), the [`ddl`] statement
//! builders, the [`driver`] abstraction with its name-keyed
//! [`DriverRegistry`], and the scoped [`Session`].
//!
//! Everything is single-threaded, synchronous, and blocking: one
//! exclusive connection per pass, elements processed strictly
//! sequentially, no retries, no timeouts. Every database error is fatal
//! to the current pass; the sole suppressed failure is the best-effort
//! DROP before a table is recreated.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ddl;
pub mod driver;
pub mod ingest;
pub mod mapper;
pub mod session;
pub mod source;
pub mod value;
pub mod writer;

// Re-export commonly used items at the crate root
pub use ddl::ColumnSpec;
pub use driver::{Connector, DriverRegistry, RowCursor, SqlConnection, SqlRow};
pub use ingest::RowIngestor;
pub use session::Session;
pub use source::SqlDataSource;
pub use value::SqlValue;
pub use writer::SqlWriter;
