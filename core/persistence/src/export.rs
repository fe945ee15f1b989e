//! FILENAME: core/persistence/src/export.rs
//! The Filtered Exporter: query the selection, write one artifact.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use crate::xlsx_writer::write_rowset;
use crate::ExportError;
use engine::{Selection, TabularSource};

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    /// Final artifact location.
    pub path: PathBuf,
    /// Data rows written (header row excluded).
    pub row_count: usize,
}

impl ExportReceipt {
    /// The artifact's file name, for user-facing messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Retrieves every row matching `selection` and writes a new spreadsheet
/// artifact into `out_dir`.
///
/// A selection matching zero rows still yields a valid artifact holding
/// only the header row; callers can surface `row_count == 0` to the user.
/// The artifact is written to a temporary file in `out_dir` and renamed
/// into place, so a failed export leaves nothing behind.
pub fn export_selection(
    source: &dyn TabularSource,
    selection: &Selection,
    out_dir: &Path,
) -> Result<ExportReceipt, ExportError> {
    let rows = source.query_rows(selection)?;
    if rows.is_empty() {
        log::warn!("selection matched no rows; writing a header-only artifact");
    }

    let path = unique_export_path(out_dir, Local::now());
    let tmp = tempfile::Builder::new()
        .prefix(".exported_data_")
        .suffix(".xlsx")
        .tempfile_in(out_dir)?;
    write_rowset(&rows, tmp.path())?;
    tmp.persist(&path).map_err(|e| ExportError::Io(e.error))?;

    log::info!(
        "exported {} row(s) with {} constraint(s) to {:?}",
        rows.row_count(),
        selection.len(),
        path
    );
    Ok(ExportReceipt {
        path,
        row_count: rows.row_count(),
    })
}

/// Timestamped artifact path with second resolution. When a same-second
/// artifact already exists a numeric suffix is appended, so sequential
/// exports never overwrite each other.
fn unique_export_path(dir: &Path, stamp: DateTime<Local>) -> PathBuf {
    let base = format!("exported_data_{}", stamp.format("%Y%m%d_%H%M%S"));
    let mut path = dir.join(format!("{}.xlsx", base));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{}_{}.xlsx", base, n));
        n += 1;
    }
    path
}
