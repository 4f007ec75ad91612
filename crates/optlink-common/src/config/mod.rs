//! Configuration for optlink.
//!
//! This module provides the configuration value consumed by read and
//! write passes.

mod link;

pub use link::LinkConfig;
