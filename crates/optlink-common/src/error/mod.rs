//! Error handling for optlink.
//!
//! This module provides a unified error type and result alias used
//! across all optlink components.

mod link;

pub use link::{ErrorCode, LinkError};

/// Result type alias for optlink operations.
pub type LinkResult<T> = std::result::Result<T, LinkError>;
