//! Dataset finalization
//!
//! The end-of-crawl stage: runs the dataset-wide cleaning pass, drops exact
//! duplicates, stamps 1-based ids, and hands the table to the output sink.
//! Runs exactly once, whether the crawl completed or aborted.

use crate::extract::ListingRecord;
use crate::output::TableSink;
use crate::text::{remove_diacritics, remove_extra_spaces, set_na, NA};
use std::collections::HashSet;
use std::path::Path;

/// Column header of the exported table. The id column is assigned at export
/// time, 1-based, in accumulation order.
pub const EXPORT_HEADER: [&str; 6] = ["id", "url", "headline", "date", "external_url", "source"];

/// The accumulated crawl result.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<ListingRecord>,
}

impl Dataset {
    /// Wraps the records handed over by the pagination controller.
    pub fn new(records: Vec<ListingRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    /// Runs the dataset-wide cleaning pass, then drops exact-duplicate rows
    /// keeping the first occurrence.
    ///
    /// Per field: sentinel substitution, diacritic stripping (headline only),
    /// whitespace normalization. Record order is otherwise preserved.
    pub fn clean(&mut self) {
        for record in &mut self.records {
            record.url = clean_field(&record.url, false);
            record.headline = clean_field(&record.headline, true);
            record.date = clean_field(&record.date, false);
            record.external_url = clean_field(&record.external_url, false);
            record.source = clean_field(&record.source, false);
        }

        let mut seen = HashSet::new();
        self.records.retain(|record| seen.insert(record.clone()));
    }

    /// Rows of the exported table, id column first.
    pub fn export_rows(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .zip(1..)
            .map(|(record, id)| {
                vec![
                    id.to_string(),
                    record.url.clone(),
                    record.headline.clone(),
                    record.date.clone(),
                    record.external_url.clone(),
                    record.source.clone(),
                ]
            })
            .collect()
    }

    /// Cleans, deduplicates, stamps ids, and writes the table to the sink.
    ///
    /// An empty dataset produces no file at all. Sink failures are logged
    /// and swallowed; the in-memory records are not disturbed either way.
    /// Returns whether a file was produced.
    pub fn finalize(&mut self, sink: &dyn TableSink, path: &Path) -> bool {
        if self.records.is_empty() {
            tracing::info!("No records accumulated, skipping export");
            return false;
        }

        self.clean();

        match sink.write(&EXPORT_HEADER, &self.export_rows(), path) {
            Ok(()) => {
                tracing::info!("Exported {} records to {}", self.records.len(), path.display());
                true
            }
            Err(e) => {
                tracing::error!("Failed to export workbook: {}", e);
                false
            }
        }
    }
}

/// Cleans one field: sentinel substitution, optional diacritic stripping,
/// whitespace normalization, and a final empty-marker backstop.
fn clean_field(value: &str, headline: bool) -> String {
    let mut value = set_na(value);
    if headline {
        value = remove_diacritics(&value);
    }
    let value = remove_extra_spaces(&value);
    if value.is_empty() {
        NA.to_string()
    } else {
        value
    }
}
