//! Link configuration structures.
//!
//! A [`LinkConfig`] describes one read or write pass: which driver and
//! URL to connect with, which element is fed by which query, and which
//! element lands in which table. The value is immutable for the duration
//! of a pass and is passed explicitly to every connection-opening call;
//! there is no process-wide driver or URL state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STRING_WIDTH;
use crate::error::{LinkError, LinkResult};

/// Configuration for one read or write pass.
///
/// How this value is loaded (file format, flags) is the host's concern;
/// the serde derives let hosts deserialize it from whatever format they
/// use.
///
/// # Example
///
/// ```rust
/// use optlink_common::config::LinkConfig;
///
/// let config = LinkConfig::new("memory", "memory://")
///     .with_read_query("Products", "SELECT name, capacity, price FROM products")
///     .with_write_table("Plan", "plan_out");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Registered driver name to connect with.
    pub driver: String,

    /// Connection URL handed to the driver.
    pub url: String,

    /// Maps input element name to the SQL query that feeds it.
    #[serde(default)]
    pub read_queries: BTreeMap<String, String>,

    /// Maps output element name to its target table name.
    #[serde(default)]
    pub write_tables: BTreeMap<String, String>,

    /// Column width used for string-typed fields in generated DDL.
    #[serde(default = "default_string_width")]
    pub string_width: u32,
}

fn default_string_width() -> u32 {
    DEFAULT_STRING_WIDTH
}

impl LinkConfig {
    /// Creates a configuration with the given driver and URL and no
    /// read or write entries.
    #[must_use]
    pub fn new(driver: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            url: url.into(),
            read_queries: BTreeMap::new(),
            write_tables: BTreeMap::new(),
            string_width: DEFAULT_STRING_WIDTH,
        }
    }

    /// Adds a read entry mapping an element name to a query.
    #[must_use]
    pub fn with_read_query(mut self, element: impl Into<String>, query: impl Into<String>) -> Self {
        self.read_queries.insert(element.into(), query.into());
        self
    }

    /// Adds a write entry mapping an element name to a target table.
    #[must_use]
    pub fn with_write_table(mut self, element: impl Into<String>, table: impl Into<String>) -> Self {
        self.write_tables.insert(element.into(), table.into());
        self
    }

    /// Sets the string column width used in generated DDL.
    #[must_use]
    pub fn with_string_width(mut self, width: u32) -> Self {
        self.string_width = width;
        self
    }

    /// Creates a minimal configuration for testing against the
    /// in-memory driver.
    #[must_use]
    pub fn for_testing() -> Self {
        Self::new("memory", "memory://test")
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> LinkResult<()> {
        if self.driver.is_empty() {
            return Err(LinkError::invalid_config("driver must not be empty"));
        }
        if self.url.is_empty() {
            return Err(LinkError::invalid_config("url must not be empty"));
        }
        if self.string_width == 0 {
            return Err(LinkError::invalid_config("string_width must be nonzero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = LinkConfig::new("memory", "memory://x")
            .with_read_query("Products", "SELECT * FROM products")
            .with_write_table("Plan", "plan_out")
            .with_string_width(64);

        assert_eq!(config.read_queries["Products"], "SELECT * FROM products");
        assert_eq!(config.write_tables["Plan"], "plan_out");
        assert_eq!(config.string_width, 64);
    }

    #[test]
    fn test_config_default_string_width() {
        let config = LinkConfig::for_testing();
        assert_eq!(config.string_width, DEFAULT_STRING_WIDTH);
    }

    #[test]
    fn test_config_validate() {
        assert!(LinkConfig::for_testing().validate().is_ok());
        assert!(LinkConfig::new("", "url").validate().is_err());
        assert!(LinkConfig::new("driver", "").validate().is_err());
        assert!(LinkConfig::for_testing()
            .with_string_width(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_read_entries_are_ordered() {
        let config = LinkConfig::for_testing()
            .with_read_query("b", "q2")
            .with_read_query("a", "q1");
        let names: Vec<_> = config.read_queries.keys().collect();
        assert_eq!(names, ["a", "b"]);
    }
}
