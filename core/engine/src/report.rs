//! FILENAME: core/engine/src/report.rs
//! Aggregate count series for the reporting utility.
//!
//! These feed the static chart summaries (pie/bar/stacked-bar); rendering
//! itself lives outside the engine. Counts are computed from a full table
//! scan through [`TabularSource::query_rows`], keeping the source trait to
//! its two query operations.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::EngineError;
use crate::schema;
use crate::selection::Selection;
use crate::source::TabularSource;

/// One slice/bar of a single-column distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: u64,
}

/// Occurrence counts of each distinct value of `column`, largest first
/// (ties broken case-insensitively by label).
pub fn value_counts(
    source: &dyn TabularSource,
    column: &str,
) -> Result<Vec<CountEntry>, EngineError> {
    schema::validate_column(column)?;
    let rows = source.query_rows(&Selection::new())?;
    let index = rows
        .column_index(column)
        .ok_or_else(|| EngineError::InvalidColumn(column.to_string()))?;

    let mut counts: HashMap<String, u64> = HashMap::new();
    for row in &rows.rows {
        *counts.entry(row[index].to_string()).or_insert(0) += 1;
    }

    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry { label, count })
        .collect();
    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
    });
    Ok(entries)
}

/// A rows-by-columns count matrix, e.g. Model Year by Make for a stacked
/// bar chart. Labels are sorted case-insensitively ascending; cells with
/// no matching rows are zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotCounts {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub counts: Vec<Vec<u64>>,
}

impl PivotCounts {
    pub fn get(&self, row_label: &str, col_label: &str) -> u64 {
        let r = self.row_labels.iter().position(|l| l == row_label);
        let c = self.col_labels.iter().position(|l| l == col_label);
        match (r, c) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

/// Cross-tabulated occurrence counts of `row_column` against `col_column`.
pub fn pivot_counts(
    source: &dyn TabularSource,
    row_column: &str,
    col_column: &str,
) -> Result<PivotCounts, EngineError> {
    schema::validate_column(row_column)?;
    schema::validate_column(col_column)?;
    let rows = source.query_rows(&Selection::new())?;
    let row_index = rows
        .column_index(row_column)
        .ok_or_else(|| EngineError::InvalidColumn(row_column.to_string()))?;
    let col_index = rows
        .column_index(col_column)
        .ok_or_else(|| EngineError::InvalidColumn(col_column.to_string()))?;

    let mut cells: HashMap<(String, String), u64> = HashMap::new();
    for row in &rows.rows {
        let key = (row[row_index].to_string(), row[col_index].to_string());
        *cells.entry(key).or_insert(0) += 1;
    }

    let mut row_labels: Vec<String> = Vec::new();
    let mut col_labels: Vec<String> = Vec::new();
    for (r, c) in cells.keys() {
        if !row_labels.contains(r) {
            row_labels.push(r.clone());
        }
        if !col_labels.contains(c) {
            col_labels.push(c.clone());
        }
    }
    row_labels.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    col_labels.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));

    let counts = row_labels
        .iter()
        .map(|r| {
            col_labels
                .iter()
                .map(|c| {
                    cells
                        .get(&(r.clone(), c.clone()))
                        .copied()
                        .unwrap_or(0)
                })
                .collect()
        })
        .collect();

    Ok(PivotCounts {
        row_labels,
        col_labels,
        counts,
    })
}
