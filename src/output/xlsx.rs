//! Excel workbook sink

use crate::output::traits::{OutputResult, TableSink};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Writes the record table to a single-sheet `.xlsx` workbook.
///
/// Every cell goes through `write_string`, which stores URL text as a plain
/// string cell instead of converting it to a hyperlink. Parent directories
/// of the target path are created on demand.
#[derive(Debug, Default)]
pub struct XlsxSink;

impl TableSink for XlsxSink {
    fn write(&self, header: &[&str], rows: &[Vec<String>], path: &Path) -> OutputResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let bold = Format::new().set_bold();

        for (col, name) in header.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *name, &bold)?;
        }

        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                worksheet.write_string((row + 1) as u32, col as u16, value.as_str())?;
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}
