//! The write pass: solved tuple sets into database tables.
//!
//! Each configured `(element, table)` pair is written independently:
//! best-effort drop, CREATE TABLE from the element schema, then one
//! parameterized INSERT per tuple reusing a single statement text. A row
//! failure aborts the remaining rows of its table and the pass; tables
//! already written stay written (no cross-table rollback).

use tracing::{debug, info};

use optlink_common::config::LinkConfig;
use optlink_common::error::{LinkError, LinkResult};
use optlink_engine::catalog::SchemaCatalog;
use optlink_engine::definition::DefinitionSource;
use optlink_engine::schema::TupleSchema;
use optlink_engine::tuple::TupleSource;
use optlink_engine::types::{ElementType, ScalarValue};

use crate::ddl;
use crate::driver::SqlConnection;
use crate::mapper;
use crate::session::Session;
use crate::value::SqlValue;

/// Writes solved tuple sets into their configured target tables.
#[derive(Debug)]
pub struct SqlWriter<'a, S: ?Sized, M: ?Sized> {
    config: &'a LinkConfig,
    definitions: &'a S,
    model: &'a M,
}

impl<'a, S, M> SqlWriter<'a, S, M>
where
    S: DefinitionSource + ?Sized,
    M: TupleSource + ?Sized,
{
    /// Creates a writer over the given configuration, engine metadata,
    /// and solved model.
    pub fn new(config: &'a LinkConfig, definitions: &'a S, model: &'a M) -> Self {
        Self {
            config,
            definitions,
            model,
        }
    }

    /// Runs the write pass over every configured write entry.
    ///
    /// Only tuple-set elements can be written; a scalar-set entry fails
    /// with `UnsupportedElementShape`.
    pub fn write_results(&self, session: &mut Session) -> LinkResult<()> {
        let catalog = SchemaCatalog::new(self.definitions);
        for (element, table) in &self.config.write_tables {
            info!(element = %element, table = %table, "writing element");
            let schema = catalog.resolve(element)?;
            let tuple_schema =
                schema
                    .as_tuple_set()
                    .ok_or_else(|| LinkError::UnsupportedElementShape {
                        element: element.clone(),
                        shape: "scalar set".to_string(),
                    })?;
            self.write_table(session.connection(), tuple_schema, table)?;
        }
        Ok(())
    }

    /// Writes one tuple set as the given target table.
    pub fn write_table(
        &self,
        connection: &mut dyn SqlConnection,
        schema: &TupleSchema,
        table: &str,
    ) -> LinkResult<()> {
        drop_table_if_exists(connection, table);

        let columns = ddl::columns_for(schema, self.config.string_width);
        let create = ddl::create_statement(table, &columns);
        debug!(statement = %create, "creating table");
        connection.execute(&create, &[])?;

        let names = schema.field_names();
        let insert = ddl::insert_statement(table, &names);
        debug!(statement = %insert, "insert statement");

        let mut params: Vec<SqlValue> = Vec::with_capacity(schema.len());
        for tuple in self.model.tuples(schema.element())? {
            params.clear();
            for (pos, field) in schema.fields().iter().enumerate() {
                let scalar = match field.ty {
                    ElementType::Int => ScalarValue::Int(tuple.int_value(pos)?),
                    ElementType::Num => ScalarValue::Num(tuple.num_value(pos)?),
                    ElementType::Str => ScalarValue::str(tuple.str_value(pos)?),
                };
                params.push(mapper::to_native(&scalar));
            }
            connection.execute(&insert, &params)?;
        }
        Ok(())
    }
}

/// Best-effort drop: the database error, if any, is suppressed.
///
/// This deliberately treats every drop failure as "table absent",
/// including unrelated ones such as permission errors; the failure is
/// logged so it is at least observable.
pub fn drop_table_if_exists(connection: &mut dyn SqlConnection, table: &str) {
    let drop = ddl::drop_statement(table);
    if let Err(err) = connection.execute(&drop, &[]) {
        debug!(table = %table, error = %err, "ignoring drop failure");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::RowCursor;
    use optlink_engine::definition::{ComponentDefinition, DefinitionKind, ElementDefinition};
    use optlink_engine::memory::MemoryModel;

    /// Connection recording executed statements, optionally failing.
    #[derive(Default)]
    struct Scripted {
        executed: Vec<(String, Vec<SqlValue>)>,
        fail_drop: bool,
        fail_on_execute: Option<usize>,
    }

    impl SqlConnection for Scripted {
        fn execute(&mut self, sql: &str, params: &[SqlValue]) -> LinkResult<u64> {
            if self.fail_drop && sql.starts_with("DROP TABLE") {
                return Err(LinkError::database("table does not exist"));
            }
            if self.fail_on_execute == Some(self.executed.len()) {
                return Err(LinkError::database("unique constraint violation"));
            }
            self.executed.push((sql.to_string(), params.to_vec()));
            Ok(1)
        }

        fn query<'a>(&'a mut self, _sql: &str) -> LinkResult<Box<dyn RowCursor + 'a>> {
            Err(LinkError::database("no result set"))
        }
    }

    fn solved_model() -> MemoryModel {
        let mut model = MemoryModel::new();
        model.define(ElementDefinition::tuple_set(
            "Plan",
            vec![
                ComponentDefinition::new("name", DefinitionKind::Str),
                ComponentDefinition::new("capacity", DefinitionKind::Int),
                ComponentDefinition::new("price", DefinitionKind::Num),
            ],
        ));
        for (name, capacity, price) in [("a", 1, 0.5), ("b", 2, 1.5)] {
            model
                .insert_tuple(
                    "Plan",
                    vec![
                        ScalarValue::str(name),
                        ScalarValue::Int(capacity),
                        ScalarValue::Num(price),
                    ],
                )
                .unwrap();
        }
        model
    }

    #[test]
    fn test_write_results_runs_clean() {
        let model = solved_model();
        let config = LinkConfig::for_testing().with_write_table("Plan", "plan_out");
        let writer = SqlWriter::new(&config, &model, &model);

        let mut session = Session::from_connection(Box::new(Scripted::default()), "scripted");
        writer.write_results(&mut session).unwrap();
    }

    #[test]
    fn test_write_table_reuses_insert_text() {
        let model = solved_model();
        let config = LinkConfig::for_testing().with_write_table("Plan", "plan_out");
        let writer = SqlWriter::new(&config, &model, &model);

        let mut connection = Scripted::default();
        let schema = match SchemaCatalog::new(&model).resolve("Plan").unwrap() {
            optlink_engine::schema::ElementSchema::TupleSet(s) => s,
            _ => unreachable!(),
        };
        writer
            .write_table(&mut connection, &schema, "plan_out")
            .unwrap();

        assert_eq!(
            connection.executed[0].0,
            "DROP TABLE plan_out"
        );
        assert_eq!(
            connection.executed[1].0,
            "CREATE TABLE plan_out (name VARCHAR(30), capacity INT, price FLOAT)"
        );
        let insert = "INSERT INTO plan_out (name, capacity, price) VALUES (?, ?, ?)";
        assert_eq!(connection.executed[2].0, insert);
        assert_eq!(connection.executed[3].0, insert);
        assert_eq!(
            connection.executed[2].1,
            vec![SqlValue::text("a"), SqlValue::Int(1), SqlValue::Float(0.5)]
        );
    }

    #[test]
    fn test_drop_failure_is_suppressed() {
        let model = solved_model();
        let config = LinkConfig::for_testing().with_write_table("Plan", "plan_out");
        let writer = SqlWriter::new(&config, &model, &model);

        let mut connection = Scripted {
            fail_drop: true,
            ..Default::default()
        };
        let schema = match SchemaCatalog::new(&model).resolve("Plan").unwrap() {
            optlink_engine::schema::ElementSchema::TupleSet(s) => s,
            _ => unreachable!(),
        };
        writer
            .write_table(&mut connection, &schema, "plan_out")
            .unwrap();

        // The drop never recorded; create and inserts still ran.
        assert!(connection.executed[0].0.starts_with("CREATE TABLE"));
        assert_eq!(connection.executed.len(), 3);
    }

    #[test]
    fn test_insert_failure_aborts_remaining_rows() {
        let model = solved_model();
        let config = LinkConfig::for_testing().with_write_table("Plan", "plan_out");
        let writer = SqlWriter::new(&config, &model, &model);

        // Fail the second INSERT (index 3: drop, create, insert, insert).
        let mut connection = Scripted {
            fail_on_execute: Some(3),
            ..Default::default()
        };
        let schema = match SchemaCatalog::new(&model).resolve("Plan").unwrap() {
            optlink_engine::schema::ElementSchema::TupleSet(s) => s,
            _ => unreachable!(),
        };
        let err = writer
            .write_table(&mut connection, &schema, "plan_out")
            .unwrap_err();

        assert!(matches!(err, LinkError::Database { .. }));
        // Only the first insert landed; no further rows were attempted.
        assert_eq!(connection.executed.len(), 3);
    }

    #[test]
    fn test_write_results_rejects_scalar_set() {
        let mut model = MemoryModel::new();
        model.define(ElementDefinition::scalar_set("Sites", DefinitionKind::Str));
        let config = LinkConfig::for_testing().with_write_table("Sites", "sites_out");
        let writer = SqlWriter::new(&config, &model, &model);

        let mut session =
            Session::from_connection(Box::new(Scripted::default()), "scripted");
        let err = writer.write_results(&mut session).unwrap_err();
        assert!(matches!(err, LinkError::UnsupportedElementShape { .. }));
    }
}
