//! The database driver boundary.
//!
//! Concrete drivers and connection management are external
//! collaborators; this module specifies the contract the marshalling
//! core consumes them through, plus the name-keyed [`DriverRegistry`]
//! that replaces the original design's process-wide driver state.

use std::collections::HashMap;
use std::sync::Arc;

use optlink_common::config::LinkConfig;
use optlink_common::error::{LinkError, LinkResult};

use crate::value::SqlValue;

/// A factory for connections under one driver name.
pub trait Connector: Send + Sync {
    /// Opens a new connection to the given URL.
    fn connect(&self, url: &str) -> LinkResult<Box<dyn SqlConnection>>;
}

/// One open database connection.
///
/// Exclusive to the current pass; all calls block until complete.
pub trait SqlConnection {
    /// Executes a DDL statement or a parameterized DML statement,
    /// returning the number of affected rows.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> LinkResult<u64>;

    /// Executes a query, returning a forward-only cursor over its rows.
    fn query<'a>(&'a mut self, sql: &str) -> LinkResult<Box<dyn RowCursor + 'a>>;
}

/// A forward-only, single-pass cursor over a query result.
///
/// May be iterated exactly once; no random access, no re-entry. Must not
/// outlive the connection that produced it.
pub trait RowCursor {
    /// Advances to the next row, or returns `None` when drained.
    fn next_row(&mut self) -> LinkResult<Option<SqlRow>>;
}

/// One row of a query result: a shared column header plus positional
/// values.
#[derive(Debug, Clone)]
pub struct SqlRow {
    columns: Arc<[String]>,
    values: Vec<SqlValue>,
}

impl SqlRow {
    /// Creates a row from its column header and values.
    #[must_use]
    pub fn new(columns: Arc<[String]>, values: Vec<SqlValue>) -> Self {
        Self { columns, values }
    }

    /// Returns the column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at the given position.
    #[must_use]
    pub fn value(&self, pos: usize) -> Option<&SqlValue> {
        self.values.get(pos)
    }

    /// Returns the value under the named column.
    ///
    /// Column names are matched case-insensitively, as relational result
    /// sets conventionally are.
    #[must_use]
    pub fn value_by_name(&self, name: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .and_then(|i| self.values.get(i))
    }
}

/// Maps driver names to connectors.
///
/// Hosts register the drivers they link in; opening a session with an
/// unregistered name fails with `UnknownDriver`.
#[derive(Default)]
pub struct DriverRegistry {
    connectors: HashMap<String, Arc<dyn Connector>>,
}

impl DriverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connector under a driver name, replacing any
    /// previous registration.
    pub fn register(&mut self, name: impl Into<String>, connector: Arc<dyn Connector>) {
        self.connectors.insert(name.into(), connector);
    }

    /// Returns true if a connector is registered under the name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.connectors.contains_key(name)
    }

    /// Opens a connection for the given configuration.
    pub fn connect(&self, config: &LinkConfig) -> LinkResult<Box<dyn SqlConnection>> {
        let connector =
            self.connectors
                .get(&config.driver)
                .ok_or_else(|| LinkError::UnknownDriver {
                    driver: config.driver.clone(),
                })?;
        connector.connect(&config.url)
    }
}

impl std::fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.connectors.keys().collect::<Vec<_>>())
            .finish()
    }
}
