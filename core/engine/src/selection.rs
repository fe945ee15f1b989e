//! FILENAME: core/engine/src/selection.rs
//! The user's effective filter: a column -> value constraint map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::schema;

/// Sentinel value meaning "no constraint applied for this column".
/// Selections never store it; setting a column to `Any` removes the entry.
pub const ANY: &str = "Any";

/// A conjunctive equality filter over the dataset. Each column appears at
/// most once; iteration order is deterministic (sorted by column name),
/// though clause order has no semantic effect on the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    constraints: BTreeMap<String, String>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Builds a selection from arbitrary (column, value) pairs, dropping
    /// every entry whose value is the `Any` sentinel.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut selection = Selection::new();
        for (column, value) in pairs {
            selection.set(column.as_ref(), value.as_ref());
        }
        selection
    }

    /// Records a constraint. The `Any` sentinel clears the column instead.
    pub fn set(&mut self, column: &str, value: &str) {
        if value == ANY {
            self.constraints.remove(column);
        } else {
            self.constraints
                .insert(column.to_string(), value.to_string());
        }
    }

    /// Removes the constraint on `column`, if any.
    pub fn clear(&mut self, column: &str) {
        self.constraints.remove(column);
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.constraints.get(column).map(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// The constrained (column, value) pairs, sorted by column name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constraints
            .iter()
            .map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// Checks every constrained column against the schema allow-list.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (column, _) in self.entries() {
            schema::validate_column(column)?;
        }
        Ok(())
    }
}
