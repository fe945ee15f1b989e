//! FILENAME: core/engine/src/fixture.rs
//! In-memory test sources shared by the engine unit tests.

use crate::error::EngineError;
use crate::schema;
use crate::selection::Selection;
use crate::source::{RowSet, TabularSource, Value};

/// A tiny in-memory rendition of the registration table. Distinct values
/// come back in insertion order; the resolver owns the presentation sort.
pub(crate) struct MemorySource {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<&'static str>>,
}

impl MemorySource {
    fn column_index(&self, name: &str) -> Result<usize, EngineError> {
        self.columns
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| EngineError::InvalidColumn(name.to_string()))
    }
}

impl TabularSource for MemorySource {
    fn list_distinct(
        &self,
        column: &str,
        constraint: Option<(&str, &str)>,
    ) -> Result<Vec<String>, EngineError> {
        let target = self.column_index(column)?;
        let filter = match constraint {
            Some((c, v)) => Some((self.column_index(c)?, v)),
            None => None,
        };

        let mut seen = Vec::new();
        for row in &self.rows {
            if let Some((idx, value)) = filter {
                if row[idx] != value {
                    continue;
                }
            }
            let candidate = row[target].to_string();
            if !seen.contains(&candidate) {
                seen.push(candidate);
            }
        }
        Ok(seen)
    }

    fn query_rows(&self, selection: &Selection) -> Result<RowSet, EngineError> {
        let mut filters = Vec::new();
        for (column, value) in selection.entries() {
            filters.push((self.column_index(column)?, value));
        }

        let rows = self
            .rows
            .iter()
            .filter(|row| filters.iter().all(|(idx, value)| row[*idx] == *value))
            .map(|row| {
                row.iter()
                    .map(|v| Value::Text(v.to_string()))
                    .collect::<Vec<Value>>()
            })
            .collect();

        Ok(RowSet {
            columns: self.columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }
}

/// The Acme/Zenith scenario: Make depends on Manufacturer with
/// Acme -> {A1, A2} and Zenith -> {Z1}.
pub(crate) fn vehicle_fixture() -> MemorySource {
    MemorySource {
        columns: schema::COLUMNS.to_vec(),
        rows: vec![
            // Manufacturer, Make, Model-full, Technology, Model Year,
            // Category, Use Case, Class, Zip Code
            vec![
                "Acme", "A1", "A1 Alpha", "BEV", "2020", "Passenger", "Personal", "Class 1",
                "90210",
            ],
            vec![
                "Acme", "A1", "A1 Beta", "BEV", "2021", "Passenger", "Personal", "Class 1",
                "90210",
            ],
            vec![
                "Acme", "A2", "A2 Alpha", "PHEV", "2021", "Truck", "Commercial", "Class 2",
                "10001",
            ],
            vec![
                "Zenith", "Z1", "Z1 Alpha", "BEV", "2020", "Passenger", "Personal", "Class 1",
                "60601",
            ],
        ],
    }
}

/// A source whose every call fails, for previous-valid-state tests.
pub(crate) struct FailingSource;

impl TabularSource for FailingSource {
    fn list_distinct(
        &self,
        _column: &str,
        _constraint: Option<(&str, &str)>,
    ) -> Result<Vec<String>, EngineError> {
        Err(EngineError::DataSourceUnavailable(
            "fixture outage".to_string(),
        ))
    }

    fn query_rows(&self, _selection: &Selection) -> Result<RowSet, EngineError> {
        Err(EngineError::DataSourceUnavailable(
            "fixture outage".to_string(),
        ))
    }
}
