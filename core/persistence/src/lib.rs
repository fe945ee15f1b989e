//! FILENAME: core/persistence/src/lib.rs
//! Vinscope persistence module.
//!
//! Turns a filtered row set into an immutable spreadsheet artifact: unique
//! timestamped naming, typed XLSX writing, and atomic temp-then-rename so a
//! failed export never leaves a partial file.

mod error;
mod export;
mod xlsx_writer;

pub use error::ExportError;
pub use export::{export_selection, ExportReceipt};
pub use xlsx_writer::write_rowset;
