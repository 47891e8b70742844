//! Output module for exporting the finalized dataset
//!
//! This module defines the sink seam the finalizer writes through and the
//! spreadsheet implementation used in production. Tests substitute their own
//! [`TableSink`] implementations to observe exports without filesystem
//! access.

mod traits;
mod xlsx;

pub use traits::{OutputError, OutputResult, TableSink};
pub use xlsx::XlsxSink;
