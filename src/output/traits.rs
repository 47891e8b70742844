//! Output sink trait and error types

use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Sink consuming the finalized record table.
///
/// The finalizer calls this exactly once per run, with the header row and
/// the cleaned, id-stamped data rows. Implementations must store every cell
/// value verbatim: URL-looking strings are data, not hyperlinks.
pub trait TableSink {
    fn write(&self, header: &[&str], rows: &[Vec<String>], path: &Path) -> OutputResult<()>;
}
