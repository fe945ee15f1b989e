//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::ExportError;
use engine::{RowSet, Value};
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use std::path::Path;

/// Writes a row set as a single worksheet: bold header row, then one row
/// per record with cells typed to match their stored values.
pub fn write_rowset(rows: &RowSet, path: &Path) -> Result<(), ExportError> {
    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();

    let header = rust_xlsxwriter::Format::new().set_bold();
    for (col, name) in rows.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header)?;
    }

    for (r, row) in rows.rows.iter().enumerate() {
        let out_row = (r + 1) as u32;
        for (c, value) in row.iter().enumerate() {
            let out_col = c as u16;
            match value {
                Value::Null => {}
                Value::Integer(i) => {
                    worksheet.write_number(out_row, out_col, *i as f64)?;
                }
                Value::Real(n) => {
                    worksheet.write_number(out_row, out_col, *n)?;
                }
                Value::Text(s) => {
                    worksheet.write_string(out_row, out_col, s)?;
                }
            }
        }
    }

    xlsx.save(path)?;
    Ok(())
}
