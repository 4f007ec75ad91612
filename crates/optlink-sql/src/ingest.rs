//! Row ingestion: streaming query results into the engine.
//!
//! The ingestor consumes a forward-only cursor and drives the handler
//! protocol for one element. Scalar sets read the first column of every
//! row positionally; tuple sets resolve the schema's field names once,
//! then look every field up **by column name** in each row. The query's
//! projection order is irrelevant, only names must match.

use tracing::debug;

use optlink_common::error::{LinkError, LinkResult};
use optlink_engine::handler::DataHandler;
use optlink_engine::schema::{ElementSchema, TupleSchema};
use optlink_engine::types::{ElementType, ScalarValue};

use crate::driver::RowCursor;
use crate::mapper;

/// Streams cursor rows into the engine through the handler protocol.
#[derive(Debug)]
pub struct RowIngestor<'a, H: ?Sized> {
    handler: &'a mut H,
}

impl<'a, H: DataHandler + ?Sized> RowIngestor<'a, H> {
    /// Creates an ingestor over the given handler.
    pub fn new(handler: &'a mut H) -> Self {
        Self { handler }
    }

    /// Ingests one element from the cursor.
    ///
    /// Emits exactly one `start_element`/`end_set` pair. Any failure
    /// (missing column, conversion error, cursor error) aborts the
    /// element with no partial tuple emitted.
    pub fn ingest_element(
        &mut self,
        name: &str,
        schema: &ElementSchema,
        cursor: &mut dyn RowCursor,
    ) -> LinkResult<()> {
        match schema {
            ElementSchema::ScalarSet(ty) => self.ingest_scalar_set(name, *ty, cursor),
            ElementSchema::TupleSet(tuple) => self.ingest_tuple_set(name, tuple, cursor),
        }
    }

    /// Scalar-set ingestion: one item per row, converted from the first
    /// column (column names are irrelevant here).
    fn ingest_scalar_set(
        &mut self,
        name: &str,
        ty: ElementType,
        cursor: &mut dyn RowCursor,
    ) -> LinkResult<()> {
        self.handler.start_element(name)?;
        self.handler.start_set()?;
        let mut rows = 0u64;
        while let Some(row) = cursor.next_row()? {
            let native = row.value(0).ok_or_else(|| LinkError::MissingColumn {
                element: name.to_string(),
                column: "0".to_string(),
            })?;
            let item = mapper::from_native(ty, native)?;
            self.handler.add_item(&item)?;
            rows += 1;
        }
        self.handler.end_set()?;
        debug!(element = name, rows, "scalar set ingested");
        Ok(())
    }

    /// Tuple-set ingestion: field names resolved once up front; each row
    /// converted completely before its tuple is opened, so conversion
    /// failures leave no dangling `start_tuple`.
    fn ingest_tuple_set(
        &mut self,
        name: &str,
        schema: &TupleSchema,
        cursor: &mut dyn RowCursor,
    ) -> LinkResult<()> {
        let fields = schema.fields();
        self.handler.start_element(name)?;
        self.handler.start_set()?;
        let mut rows = 0u64;
        let mut items: Vec<ScalarValue> = Vec::with_capacity(fields.len());
        while let Some(row) = cursor.next_row()? {
            items.clear();
            for field in fields {
                let native =
                    row.value_by_name(&field.name)
                        .ok_or_else(|| LinkError::MissingColumn {
                            element: name.to_string(),
                            column: field.name.clone(),
                        })?;
                items.push(mapper::from_native(field.ty, native)?);
            }
            self.handler.start_tuple()?;
            for item in &items {
                self.handler.add_item(item)?;
            }
            self.handler.end_tuple()?;
            rows += 1;
        }
        self.handler.end_set()?;
        debug!(element = name, rows, "tuple set ingested");
        Ok(())
    }
}
