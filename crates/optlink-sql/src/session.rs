//! Scoped database sessions.
//!
//! Every read or write pass runs inside exactly one [`Session`]: the
//! connection is acquired when the session opens and released when the
//! session is dropped, failure paths included. Statement execution is
//! per-operation; no statement state outlives its call.

use tracing::debug;

use optlink_common::config::LinkConfig;
use optlink_common::error::LinkResult;

use crate::driver::{DriverRegistry, SqlConnection};

/// An exclusive, scoped database connection for one pass.
pub struct Session {
    connection: Box<dyn SqlConnection>,
    driver: String,
}

impl Session {
    /// Opens a session for the given configuration.
    ///
    /// The configuration is validated and passed explicitly; there is no
    /// process-wide driver or URL state.
    pub fn open(registry: &DriverRegistry, config: &LinkConfig) -> LinkResult<Self> {
        config.validate()?;
        let connection = registry.connect(config)?;
        debug!(driver = %config.driver, "database session opened");
        Ok(Self {
            connection,
            driver: config.driver.clone(),
        })
    }

    /// Wraps an already-open connection in a session scope.
    #[must_use]
    pub fn from_connection(connection: Box<dyn SqlConnection>, driver: impl Into<String>) -> Self {
        Self {
            connection,
            driver: driver.into(),
        }
    }

    /// Returns the connection for statement execution.
    pub fn connection(&mut self) -> &mut dyn SqlConnection {
        self.connection.as_mut()
    }

    /// Closes the session, releasing the connection.
    ///
    /// Dropping the session has the same effect; `close` exists to make
    /// the release point explicit at the end of a pass.
    pub fn close(self) {}
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(driver = %self.driver, "database session closed");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("driver", &self.driver)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Connector, RowCursor};
    use crate::value::SqlValue;
    use optlink_common::error::LinkError;
    use std::sync::Arc;

    struct NullConnection;

    impl SqlConnection for NullConnection {
        fn execute(&mut self, _sql: &str, _params: &[SqlValue]) -> LinkResult<u64> {
            Ok(0)
        }

        fn query<'a>(&'a mut self, _sql: &str) -> LinkResult<Box<dyn RowCursor + 'a>> {
            Err(LinkError::database("no result set"))
        }
    }

    struct NullConnector;

    impl Connector for NullConnector {
        fn connect(&self, _url: &str) -> LinkResult<Box<dyn SqlConnection>> {
            Ok(Box::new(NullConnection))
        }
    }

    #[test]
    fn test_open_and_close() {
        let mut registry = DriverRegistry::new();
        registry.register("null", Arc::new(NullConnector));
        let config = LinkConfig::new("null", "null://");

        let mut session = Session::open(&registry, &config).unwrap();
        assert_eq!(session.connection().execute("NOOP", &[]).unwrap(), 0);
        session.close();
    }

    #[test]
    fn test_open_rejects_invalid_config() {
        let registry = DriverRegistry::new();
        let config = LinkConfig::new("", "null://");

        let err = Session::open(&registry, &config).unwrap_err();
        assert!(matches!(err, LinkError::InvalidConfig { .. }));
    }

    #[test]
    fn test_open_rejects_unknown_driver() {
        let registry = DriverRegistry::new();
        let config = LinkConfig::new("missing", "null://");

        let err = Session::open(&registry, &config).unwrap_err();
        assert!(matches!(err, LinkError::UnknownDriver { .. }));
    }
}
