//! FILENAME: core/engine/src/lib.rs
//! Vinscope filter engine.
//!
//! This crate holds the shared query core used by every presentation shell:
//! the fixed dataset schema, the option resolver, the cascade session, the
//! filtered-row retrieval contract, and the report aggregations. It performs
//! no I/O of its own; all dataset access goes through the [`TabularSource`]
//! trait implemented by the `datasource` crate.
//!
//! Layers:
//! - `schema`: table name, column allow-list, cascade dependency chain
//! - `selection`: the column -> value constraint map ("Any" sentinel handling)
//! - `source`: the tabular data source trait and row-set types
//! - `resolver`: distinct-value option resolution with presentation ordering
//! - `session`: owned cascading selector state (the desktop/web shell model)
//! - `report`: aggregate count series for the reporting utility

pub mod error;
pub mod report;
pub mod resolver;
pub mod schema;
pub mod selection;
pub mod session;
pub mod source;

pub use error::EngineError;
pub use report::{pivot_counts, value_counts, CountEntry, PivotCounts};
pub use resolver::resolve_options;
pub use selection::{Selection, ANY};
pub use session::{FilterSession, SelectorState};
pub use source::{RowSet, TabularSource, Value};

#[cfg(test)]
pub(crate) mod fixture;
