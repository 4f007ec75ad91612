//! The read pass: configured queries into the engine.
//!
//! For each configured `(element, query)` pair, in order: execute the
//! query, resolve the element's schema against the engine, stream the
//! cursor into the handler. Elements are processed strictly
//! sequentially (one element is fully drained before the next query is
//! issued) and the first failure of any kind aborts the whole pass.

use tracing::info;

use optlink_common::config::LinkConfig;
use optlink_common::error::LinkResult;
use optlink_engine::catalog::SchemaCatalog;
use optlink_engine::definition::DefinitionSource;
use optlink_engine::handler::DataHandler;

use crate::ingest::RowIngestor;
use crate::session::Session;

/// Reads configured SQL query results into the engine.
#[derive(Debug)]
pub struct SqlDataSource<'a, S: ?Sized> {
    config: &'a LinkConfig,
    definitions: &'a S,
}

impl<'a, S: DefinitionSource + ?Sized> SqlDataSource<'a, S> {
    /// Creates a data source over the given configuration and engine
    /// metadata.
    pub fn new(config: &'a LinkConfig, definitions: &'a S) -> Self {
        Self {
            config,
            definitions,
        }
    }

    /// Runs the read pass, materializing every configured element
    /// through the handler.
    pub fn read(&self, session: &mut Session, handler: &mut dyn DataHandler) -> LinkResult<()> {
        let catalog = SchemaCatalog::new(self.definitions);
        for (element, query) in &self.config.read_queries {
            info!(element = %element, query = %query, "reading element");
            let connection = session.connection();
            let mut cursor = connection.query(query)?;
            let schema = catalog.resolve(element)?;
            RowIngestor::new(&mut *handler).ingest_element(element, &schema, cursor.as_mut())?;
        }
        Ok(())
    }
}
