//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A column name was used that does not exist in the dataset schema.
    /// A malformed column is a hard error, never an empty result, so that
    /// typos cannot masquerade as empty option lists.
    #[error("unknown column: {0:?}")]
    InvalidColumn(String),

    /// The underlying dataset could not be reached or a query against it
    /// failed mid-flight.
    #[error("data source unavailable: {0}")]
    DataSourceUnavailable(String),
}
