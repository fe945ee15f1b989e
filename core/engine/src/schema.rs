//! FILENAME: core/engine/src/schema.rs
//! Fixed dataset schema: table name, filterable columns, cascade chain.
//!
//! Column names are exact identifiers in the underlying table (case- and
//! punctuation-sensitive) and double as the allow-list for query building:
//! identifiers cannot be bound as parameters, so every column name is
//! checked against this list before it is interpolated into SQL.

use crate::error::EngineError;

/// The one table the tool operates on.
pub const TABLE: &str = "merged_currentvins_modified";

pub const MANUFACTURER: &str = "Vehicle Manufacturer";
pub const MAKE: &str = "Make";
pub const MODEL: &str = "Model-full";
pub const TECHNOLOGY: &str = "Technology";
pub const MODEL_YEAR: &str = "Model Year";
pub const CATEGORY: &str = "Vehicle Category";
pub const USE_CASE: &str = "Vehicle Use Case";
pub const CLASS: &str = "Vehicle Class";
pub const ZIP_CODE: &str = "Zip Code";

/// All filterable columns, in the order their selectors are presented.
pub const COLUMNS: [&str; 9] = [
    MANUFACTURER,
    MAKE,
    MODEL,
    TECHNOLOGY,
    MODEL_YEAR,
    CATEGORY,
    USE_CASE,
    CLASS,
    ZIP_CODE,
];

/// Direct dependency edges: a change to the left column invalidates the
/// option list (and selection) of the right column.
pub const CASCADE: [(&str, &str); 2] = [(MANUFACTURER, MAKE), (MAKE, MODEL)];

/// Returns true if `name` is a known filterable column.
pub fn is_column(name: &str) -> bool {
    COLUMNS.contains(&name)
}

/// Checks `name` against the allow-list.
pub fn validate_column(name: &str) -> Result<(), EngineError> {
    if is_column(name) {
        Ok(())
    } else {
        Err(EngineError::InvalidColumn(name.to_string()))
    }
}

/// The column directly downstream of `column`, if any.
pub fn dependent_of(column: &str) -> Option<&'static str> {
    CASCADE
        .iter()
        .find(|(upstream, _)| *upstream == column)
        .map(|(_, dependent)| *dependent)
}

/// The column directly upstream of `column`, if any.
pub fn upstream_of(column: &str) -> Option<&'static str> {
    CASCADE
        .iter()
        .find(|(_, dependent)| *dependent == column)
        .map(|(upstream, _)| *upstream)
}

/// Every column transitively downstream of `column`, nearest first.
pub fn downstream_of(column: &str) -> Vec<&'static str> {
    let mut chain = Vec::new();
    let mut current = column;
    while let Some(next) = dependent_of(current) {
        chain.push(next);
        current = next;
    }
    chain
}
