//! FILENAME: core/persistence/src/error.rs

use engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
