//! DDL and DML statement builders.
//!
//! Statement text is rendered from schemas once per table; the column
//! order in CREATE and INSERT statements equals the tuple schema's field
//! order exactly, because the writer binds parameters positionally
//! against the same order.

use optlink_common::constants::PARAM_PLACEHOLDER;
use optlink_engine::schema::TupleSchema;

use crate::mapper;

/// One rendered column of a CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name.
    pub name: String,
    /// Column type literal.
    pub sql_type: String,
}

impl ColumnSpec {
    /// Creates a column spec.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
        }
    }

    fn render(&self) -> String {
        format!("{} {}", self.name, self.sql_type)
    }
}

/// Derives the ordered column list for a tuple schema.
#[must_use]
pub fn columns_for(schema: &TupleSchema, string_width: u32) -> Vec<ColumnSpec> {
    schema
        .fields()
        .iter()
        .map(|f| ColumnSpec::new(&f.name, mapper::sql_type(f.ty, string_width)))
        .collect()
}

/// Renders a DROP TABLE statement.
#[must_use]
pub fn drop_statement(table: &str) -> String {
    format!("DROP TABLE {}", table)
}

/// Renders a CREATE TABLE statement; column order equals input order.
#[must_use]
pub fn create_statement(table: &str, columns: &[ColumnSpec]) -> String {
    let rendered: Vec<String> = columns.iter().map(ColumnSpec::render).collect();
    format!("CREATE TABLE {} ({})", table, rendered.join(", "))
}

/// Renders a parameterized INSERT statement with one placeholder per
/// column. Built once per table and reused for every row.
#[must_use]
pub fn insert_statement(table: &str, columns: &[&str]) -> String {
    let placeholders = vec![PARAM_PLACEHOLDER; columns.len()];
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders.join(", ")
    )
}
