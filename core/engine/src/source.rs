//! FILENAME: core/engine/src/source.rs
//! The tabular data source contract and row-set types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;
use crate::selection::Selection;

/// A single stored value. Mirrors the storage classes of the underlying
/// relational source; the resolver flattens these to strings for uniform
/// sorting and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A transient, fully materialized query result: one header row plus typed
/// data rows. Computed on demand and never persisted except as an exported
/// artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Access to the one fixed dataset table. Implementations must treat every
/// value as a bound parameter, never interpolated text; column names are
/// validated against the schema allow-list before use.
pub trait TabularSource {
    /// Distinct values of `column`, restricted to rows matching the
    /// constraint when one is given. Order is unspecified; the resolver
    /// applies the presentation ordering.
    fn list_distinct(
        &self,
        column: &str,
        constraint: Option<(&str, &str)>,
    ) -> Result<Vec<String>, EngineError>;

    /// All rows matching every constraint in `selection` conjunctively.
    /// An empty selection returns the whole table.
    fn query_rows(&self, selection: &Selection) -> Result<RowSet, EngineError>;
}
