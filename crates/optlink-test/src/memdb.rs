//! An in-memory SQL database behind the optlink driver traits.
//!
//! [`MemoryDb`] interprets the statement shapes optlink generates
//! (CREATE TABLE, DROP TABLE, parameterized INSERT, and plain SELECT
//! projections) against a shared in-memory table store, with typed
//! columns and optional unique constraints. It exists so integration
//! tests (and engine-less demos) can run full read and write passes
//! without an external database.
//!
//! Statements are parsed with `sqlparser`'s generic dialect; anything
//! beyond the supported shapes is a database error, which is exactly how
//! the marshalling core expects a driver to refuse work.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use sqlparser::ast as sql_ast;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

use optlink_common::error::{LinkError, LinkResult};
use optlink_sql::driver::{Connector, RowCursor, SqlConnection, SqlRow};
use optlink_sql::value::SqlValue;

/// Driver name the in-memory database registers under.
pub const MEMORY_DRIVER: &str = "memory";

/// Column type of an in-memory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Integer column.
    Int,
    /// Floating-point column.
    Float,
    /// Text column.
    Text,
}

impl ColumnType {
    fn name(self) -> &'static str {
        match self {
            ColumnType::Int => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
        }
    }
}

#[derive(Debug, Clone)]
struct MemColumn {
    name: String,
    ty: ColumnType,
}

#[derive(Debug, Default)]
struct MemTable {
    columns: Vec<MemColumn>,
    rows: Vec<Vec<SqlValue>>,
}

impl MemTable {
    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Default)]
struct DbState {
    tables: HashMap<String, MemTable>,
    /// Unique constraints by table name; they survive DROP/CREATE so
    /// tests can force mid-table INSERT failures.
    unique: HashMap<String, String>,
}

/// A shared in-memory database.
///
/// Cloning yields another handle to the same store; every connection
/// opened through the [`Connector`] impl sees the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryDb {
    state: Arc<Mutex<DbState>>,
}

impl MemoryDb {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a unique constraint on a column of the named table.
    ///
    /// The constraint applies to current and future incarnations of the
    /// table, surviving DROP/CREATE.
    pub fn set_unique(&self, table: &str, column: &str) {
        self.state
            .lock()
            .unique
            .insert(table.to_string(), column.to_string());
    }

    /// Creates a table directly, bypassing SQL. Used to seed read-path
    /// fixtures.
    pub fn create_table(&self, table: &str, columns: &[(&str, ColumnType)]) -> LinkResult<()> {
        let columns = columns
            .iter()
            .map(|(name, ty)| MemColumn {
                name: (*name).to_string(),
                ty: *ty,
            })
            .collect();
        self.create_table_inner(table.to_string(), columns)
    }

    /// Inserts a row directly, bypassing SQL.
    pub fn insert_row(&self, table: &str, values: Vec<SqlValue>) -> LinkResult<()> {
        self.insert_inner(table, values)
    }

    /// Returns the number of rows in the named table, if it exists.
    #[must_use]
    pub fn row_count(&self, table: &str) -> Option<usize> {
        self.state.lock().tables.get(table).map(|t| t.rows.len())
    }

    /// Returns a snapshot of the named table's rows, if it exists.
    #[must_use]
    pub fn rows(&self, table: &str) -> Option<Vec<Vec<SqlValue>>> {
        self.state.lock().tables.get(table).map(|t| t.rows.clone())
    }

    /// Returns the named table's column names in order, if it exists.
    #[must_use]
    pub fn column_names(&self, table: &str) -> Option<Vec<String>> {
        self.state
            .lock()
            .tables
            .get(table)
            .map(|t| t.columns.iter().map(|c| c.name.clone()).collect())
    }

    /// Returns true if the named table exists.
    #[must_use]
    pub fn contains_table(&self, table: &str) -> bool {
        self.state.lock().tables.contains_key(table)
    }

    fn create_table_inner(&self, table: String, columns: Vec<MemColumn>) -> LinkResult<()> {
        let mut state = self.state.lock();
        if state.tables.contains_key(&table) {
            return Err(LinkError::database(format!(
                "table '{}' already exists",
                table
            )));
        }
        state.tables.insert(
            table,
            MemTable {
                columns,
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    fn drop_table_inner(&self, table: &str) -> LinkResult<()> {
        let mut state = self.state.lock();
        if state.tables.remove(table).is_none() {
            return Err(LinkError::database(format!("no such table: {}", table)));
        }
        Ok(())
    }

    fn insert_inner(&self, table: &str, values: Vec<SqlValue>) -> LinkResult<()> {
        let mut state = self.state.lock();
        let unique = state.unique.get(table).cloned();
        let mem_table = state
            .tables
            .get_mut(table)
            .ok_or_else(|| LinkError::database(format!("no such table: {}", table)))?;
        if values.len() != mem_table.columns.len() {
            return Err(LinkError::database(format!(
                "expected {} values for table '{}', got {}",
                mem_table.columns.len(),
                table,
                values.len()
            )));
        }
        let values = mem_table
            .columns
            .iter()
            .zip(values)
            .map(|(column, value)| coerce(column, value))
            .collect::<LinkResult<Vec<_>>>()?;
        if let Some(unique_column) = unique {
            if let Some(idx) = mem_table.column_index(&unique_column) {
                if mem_table.rows.iter().any(|row| row[idx] == values[idx]) {
                    return Err(LinkError::database(format!(
                        "unique constraint violation on {}.{}",
                        table, unique_column
                    )));
                }
            }
        }
        mem_table.rows.push(values);
        Ok(())
    }

    fn select(&self, table: &str, projection: &Projection) -> LinkResult<(Arc<[String]>, Vec<Vec<SqlValue>>)> {
        let state = self.state.lock();
        let mem_table = state
            .tables
            .get(table)
            .ok_or_else(|| LinkError::database(format!("no such table: {}", table)))?;

        let indices: Vec<usize> = match projection {
            Projection::All => (0..mem_table.columns.len()).collect(),
            Projection::Columns(names) => names
                .iter()
                .map(|name| {
                    mem_table.column_index(name).ok_or_else(|| {
                        LinkError::database(format!("no such column: {}.{}", table, name))
                    })
                })
                .collect::<LinkResult<Vec<_>>>()?,
        };

        let header: Arc<[String]> = indices
            .iter()
            .map(|&i| mem_table.columns[i].name.clone())
            .collect::<Vec<_>>()
            .into();
        let rows = mem_table
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok((header, rows))
    }
}

/// Checks a value against its column type, widening integers into float
/// columns the way real drivers do.
fn coerce(column: &MemColumn, value: SqlValue) -> LinkResult<SqlValue> {
    match (column.ty, value) {
        (_, SqlValue::Null) => Ok(SqlValue::Null),
        (ColumnType::Int, SqlValue::Int(i)) => Ok(SqlValue::Int(i)),
        (ColumnType::Float, SqlValue::Float(f)) => Ok(SqlValue::Float(f)),
        (ColumnType::Float, SqlValue::Int(i)) => Ok(SqlValue::Float(i as f64)),
        (ColumnType::Text, SqlValue::Text(s)) => Ok(SqlValue::Text(s)),
        (ty, value) => Err(LinkError::database(format!(
            "cannot store {} value {} in {} column '{}'",
            value.type_name(),
            value,
            ty.name(),
            column.name
        ))),
    }
}

impl Connector for MemoryDb {
    fn connect(&self, _url: &str) -> LinkResult<Box<dyn SqlConnection>> {
        Ok(Box::new(MemoryConnection { db: self.clone() }))
    }
}

/// One connection to a [`MemoryDb`].
#[derive(Debug)]
pub struct MemoryConnection {
    db: MemoryDb,
}

enum Projection {
    All,
    Columns(Vec<String>),
}

impl SqlConnection for MemoryConnection {
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> LinkResult<u64> {
        match parse_single(sql)? {
            sql_ast::Statement::CreateTable { name, columns, .. } => {
                let columns = columns
                    .iter()
                    .map(|def| {
                        Ok(MemColumn {
                            name: def.name.value.clone(),
                            ty: column_type(&def.data_type)?,
                        })
                    })
                    .collect::<LinkResult<Vec<_>>>()?;
                self.db.create_table_inner(name.to_string(), columns)?;
                Ok(0)
            }
            sql_ast::Statement::Drop {
                object_type: sql_ast::ObjectType::Table,
                names,
                ..
            } => {
                for name in &names {
                    self.db.drop_table_inner(&name.to_string())?;
                }
                Ok(0)
            }
            sql_ast::Statement::Insert {
                table_name,
                columns,
                source,
                ..
            } => {
                let table = table_name.to_string();
                let rows = insert_rows(source)?;
                let mut inserted = 0u64;
                let mut params = params.iter();
                for row in &rows {
                    let values = row
                        .iter()
                        .map(|expr| literal_value(expr, &mut params))
                        .collect::<LinkResult<Vec<_>>>()?;
                    let full_row = self.arrange(&table, &columns, values)?;
                    self.db.insert_inner(&table, full_row)?;
                    inserted += 1;
                }
                Ok(inserted)
            }
            other => Err(LinkError::database(format!(
                "unsupported statement: {}",
                other
            ))),
        }
    }

    fn query<'a>(&'a mut self, sql: &str) -> LinkResult<Box<dyn RowCursor + 'a>> {
        let query = match parse_single(sql)? {
            sql_ast::Statement::Query(query) => query,
            other => {
                return Err(LinkError::database(format!(
                    "not a query statement: {}",
                    other
                )))
            }
        };
        let select = match *query.body {
            sql_ast::SetExpr::Select(select) => select,
            _ => return Err(LinkError::database("unsupported query shape".to_string())),
        };
        if select.selection.is_some() {
            return Err(LinkError::database(
                "WHERE clauses are not supported".to_string(),
            ));
        }
        let table = single_table(&select)?;
        let projection = projection_columns(&select)?;
        let (header, rows) = self.db.select(&table, &projection)?;
        Ok(Box::new(MemoryCursor {
            header,
            rows: rows.into_iter(),
        }))
    }
}

impl MemoryConnection {
    /// Arranges INSERT values into full table-column order, filling
    /// unnamed columns with NULL.
    fn arrange(
        &self,
        table: &str,
        columns: &[sql_ast::Ident],
        values: Vec<SqlValue>,
    ) -> LinkResult<Vec<SqlValue>> {
        let state = self.db.state.lock();
        let mem_table = state
            .tables
            .get(table)
            .ok_or_else(|| LinkError::database(format!("no such table: {}", table)))?;

        if columns.is_empty() {
            return Ok(values);
        }
        if columns.len() != values.len() {
            return Err(LinkError::database(format!(
                "INSERT names {} columns but provides {} values",
                columns.len(),
                values.len()
            )));
        }
        let mut full_row = vec![SqlValue::Null; mem_table.columns.len()];
        for (ident, value) in columns.iter().zip(values) {
            let idx = mem_table.column_index(&ident.value).ok_or_else(|| {
                LinkError::database(format!("no such column: {}.{}", table, ident.value))
            })?;
            full_row[idx] = value;
        }
        Ok(full_row)
    }
}

struct MemoryCursor {
    header: Arc<[String]>,
    rows: std::vec::IntoIter<Vec<SqlValue>>,
}

impl RowCursor for MemoryCursor {
    fn next_row(&mut self) -> LinkResult<Option<SqlRow>> {
        Ok(self
            .rows
            .next()
            .map(|values| SqlRow::new(self.header.clone(), values)))
    }
}

fn parse_single(sql: &str) -> LinkResult<sql_ast::Statement> {
    let mut statements = Parser::parse_sql(&GenericDialect {}, sql)
        .map_err(|e| LinkError::database(format!("parse error: {}", e)))?;
    if statements.len() != 1 {
        return Err(LinkError::database(format!(
            "expected a single statement, got {}",
            statements.len()
        )));
    }
    Ok(statements.remove(0))
}

/// Maps a parsed column type to a storage type; mirrors the subset of
/// SQL types optlink generates.
fn column_type(data_type: &sql_ast::DataType) -> LinkResult<ColumnType> {
    match data_type {
        sql_ast::DataType::Int(_)
        | sql_ast::DataType::Integer(_)
        | sql_ast::DataType::SmallInt(_)
        | sql_ast::DataType::BigInt(_) => Ok(ColumnType::Int),
        sql_ast::DataType::Float(_)
        | sql_ast::DataType::Real
        | sql_ast::DataType::Double
        | sql_ast::DataType::DoublePrecision => Ok(ColumnType::Float),
        sql_ast::DataType::Varchar(_)
        | sql_ast::DataType::Char(_)
        | sql_ast::DataType::CharacterVarying(_)
        | sql_ast::DataType::Text => Ok(ColumnType::Text),
        other => Err(LinkError::database(format!(
            "unsupported column type: {}",
            other
        ))),
    }
}

fn insert_rows(source: Option<Box<sql_ast::Query>>) -> LinkResult<Vec<Vec<sql_ast::Expr>>> {
    let query = source.ok_or_else(|| LinkError::database("INSERT without values".to_string()))?;
    match *query.body {
        sql_ast::SetExpr::Values(values) => Ok(values.rows),
        _ => Err(LinkError::database(
            "only VALUES inserts are supported".to_string(),
        )),
    }
}

/// Resolves one VALUES expression, pulling bound parameters for
/// placeholders in order.
fn literal_value(
    expr: &sql_ast::Expr,
    params: &mut std::slice::Iter<'_, SqlValue>,
) -> LinkResult<SqlValue> {
    match expr {
        sql_ast::Expr::Value(sql_ast::Value::Placeholder(_)) => params
            .next()
            .cloned()
            .ok_or_else(|| LinkError::database("too few bound parameters".to_string())),
        sql_ast::Expr::Value(sql_ast::Value::Null) => Ok(SqlValue::Null),
        sql_ast::Expr::Value(sql_ast::Value::Number(text, _)) => number_value(text),
        sql_ast::Expr::Value(sql_ast::Value::SingleQuotedString(s)) => {
            Ok(SqlValue::Text(s.clone()))
        }
        sql_ast::Expr::UnaryOp {
            op: sql_ast::UnaryOperator::Minus,
            expr,
        } => match literal_value(expr, params)? {
            SqlValue::Int(i) => Ok(SqlValue::Int(-i)),
            SqlValue::Float(f) => Ok(SqlValue::Float(-f)),
            other => Err(LinkError::database(format!("cannot negate {}", other))),
        },
        other => Err(LinkError::database(format!(
            "unsupported VALUES expression: {}",
            other
        ))),
    }
}

fn number_value(text: &str) -> LinkResult<SqlValue> {
    if text.contains(['.', 'e', 'E']) {
        text.parse::<f64>()
            .map(SqlValue::Float)
            .map_err(|_| LinkError::database(format!("bad numeric literal: {}", text)))
    } else {
        text.parse::<i64>()
            .map(SqlValue::Int)
            .map_err(|_| LinkError::database(format!("bad numeric literal: {}", text)))
    }
}

fn single_table(select: &sql_ast::Select) -> LinkResult<String> {
    if select.from.len() != 1 || !select.from[0].joins.is_empty() {
        return Err(LinkError::database(
            "only single-table queries are supported".to_string(),
        ));
    }
    match &select.from[0].relation {
        sql_ast::TableFactor::Table { name, .. } => Ok(name.to_string()),
        _ => Err(LinkError::database(
            "only plain table references are supported".to_string(),
        )),
    }
}

fn projection_columns(select: &sql_ast::Select) -> LinkResult<Projection> {
    let mut names = Vec::with_capacity(select.projection.len());
    for item in &select.projection {
        match item {
            sql_ast::SelectItem::Wildcard(_) => return Ok(Projection::All),
            sql_ast::SelectItem::UnnamedExpr(sql_ast::Expr::Identifier(ident)) => {
                names.push(ident.value.clone());
            }
            other => {
                return Err(LinkError::database(format!(
                    "unsupported projection: {}",
                    other
                )))
            }
        }
    }
    Ok(Projection::Columns(names))
}
