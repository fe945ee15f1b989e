//! FILENAME: core/datasource/src/lib.rs
//! SQLite implementation of the engine's tabular data source.
//!
//! Values are always bound parameters; column names come from the engine's
//! fixed allow-list and are validated before they are interpolated, since
//! identifiers cannot be parameterized. The connection is scoped to the
//! source and released on drop, success or failure.

use std::path::Path;

use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, ToSql};

use engine::{schema, EngineError, RowSet, Selection, TabularSource, Value};

/// A handle on the registration database.
pub struct SqliteSource {
    conn: Connection,
}

impl SqliteSource {
    /// Opens the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let conn = Connection::open(path.as_ref()).map_err(unavailable)?;
        log::debug!("opened sqlite source at {:?}", path.as_ref());
        Ok(SqliteSource { conn })
    }

    /// Wraps an already opened connection (useful for in-memory fixtures).
    pub fn from_connection(conn: Connection) -> Self {
        SqliteSource { conn }
    }

    /// Names of all tables in the database.
    pub fn table_names(&self) -> Result<Vec<String>, EngineError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .map_err(unavailable)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(unavailable)?
            .collect::<Result<Vec<String>, _>>()
            .map_err(unavailable)?;
        Ok(names)
    }

    /// Column names of `table`, in declaration order.
    pub fn table_columns(&self, table: &str) -> Result<Vec<String>, EngineError> {
        let sql = format!("PRAGMA table_info({})", quote_ident(table));
        let mut stmt = self.conn.prepare(&sql).map_err(unavailable)?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .map_err(unavailable)?
            .collect::<Result<Vec<String>, _>>()
            .map_err(unavailable)?;
        Ok(columns)
    }

    /// The first `limit` rows of `table`, for the inspection utility.
    pub fn preview(&self, table: &str, limit: u32) -> Result<RowSet, EngineError> {
        let sql = format!("SELECT * FROM {} LIMIT ?", quote_ident(table));
        let mut stmt = self.conn.prepare(&sql).map_err(unavailable)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut rows = Vec::new();
        let mut result = stmt.query([limit]).map_err(unavailable)?;
        while let Some(row) = result.next().map_err(unavailable)? {
            rows.push(read_row(row, columns.len())?);
        }
        Ok(RowSet { columns, rows })
    }
}

impl TabularSource for SqliteSource {
    fn list_distinct(
        &self,
        column: &str,
        constraint: Option<(&str, &str)>,
    ) -> Result<Vec<String>, EngineError> {
        schema::validate_column(column)?;
        let mut sql = format!(
            "SELECT DISTINCT {} FROM {}",
            quote_ident(column),
            quote_ident(schema::TABLE)
        );
        let mut params_vec: Vec<Box<dyn ToSql>> = vec![];

        if let Some((filter_column, filter_value)) = constraint {
            schema::validate_column(filter_column)?;
            sql.push_str(&format!(" WHERE {} = ?", quote_ident(filter_column)));
            params_vec.push(Box::new(filter_value.to_string()));
        }

        let mut stmt = self.conn.prepare(&sql).map_err(unavailable)?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let values = stmt
            .query_map(params_refs.as_slice(), |row| row.get::<_, SqlValue>(0))
            .map_err(unavailable)?
            .collect::<Result<Vec<SqlValue>, _>>()
            .map_err(unavailable)?;

        // NULL is not offered as an option: it cannot be re-selected as an
        // equality constraint.
        let mut out = Vec::new();
        for value in values {
            if !matches!(value, SqlValue::Null) {
                out.push(to_engine_value(value).to_string());
            }
        }
        Ok(out)
    }

    fn query_rows(&self, selection: &Selection) -> Result<RowSet, EngineError> {
        selection.validate()?;
        let mut sql = format!("SELECT * FROM {}", quote_ident(schema::TABLE));
        let mut params_vec: Vec<Box<dyn ToSql>> = vec![];

        for (column, value) in selection.entries() {
            sql.push_str(if params_vec.is_empty() {
                " WHERE "
            } else {
                " AND "
            });
            sql.push_str(&format!("{} = ?", quote_ident(column)));
            params_vec.push(Box::new(value.to_string()));
        }

        let mut stmt = self.conn.prepare(&sql).map_err(unavailable)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();

        let mut rows = Vec::new();
        let mut result = stmt.query(params_refs.as_slice()).map_err(unavailable)?;
        while let Some(row) = result.next().map_err(unavailable)? {
            rows.push(read_row(row, columns.len())?);
        }
        log::debug!(
            "query over {} constraint(s) matched {} row(s)",
            selection.len(),
            rows.len()
        );
        Ok(RowSet { columns, rows })
    }
}

/// Double-quotes an identifier, doubling any embedded quotes. Schema names
/// are already allow-listed; table names from introspection pass through
/// here as well.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn unavailable(err: rusqlite::Error) -> EngineError {
    EngineError::DataSourceUnavailable(err.to_string())
}

fn read_row(row: &rusqlite::Row<'_>, width: usize) -> Result<Vec<Value>, EngineError> {
    let mut out = Vec::with_capacity(width);
    for i in 0..width {
        let value: SqlValue = row.get(i).map_err(unavailable)?;
        out.push(to_engine_value(value));
    }
    Ok(out)
}

fn to_engine_value(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => Value::Integer(i),
        SqlValue::Real(r) => Value::Real(r),
        SqlValue::Text(s) => Value::Text(s),
        SqlValue::Blob(b) => Value::Text(String::from_utf8_lossy(&b).into_owned()),
    }
}
