//! # optlink-common
//!
//! Common types, errors, and configuration for optlink.
//!
//! This crate provides the foundational pieces shared by every optlink
//! component:
//!
//! - **Errors**: unified error handling with [`LinkError`] and stable
//!   [`ErrorCode`]s that hosts can map to process exit statuses
//! - **Config**: the immutable [`LinkConfig`] value describing one
//!   read or write pass
//! - **Constants**: shared defaults such as the string column width
//!
//! ## Example
//!
//! ```rust
//! use optlink_common::config::LinkConfig;
//! use optlink_common::error::LinkResult;
//!
//! fn example() -> LinkResult<()> {
//!     let config = LinkConfig::new("memory", "memory://")
//!         .with_read_query("Products", "SELECT name, capacity FROM products");
//!     config.validate()
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod constants;
pub mod error;

// Re-export commonly used items at the crate root
pub use config::LinkConfig;
pub use constants::DEFAULT_STRING_WIDTH;
pub use error::{ErrorCode, LinkError, LinkResult};
