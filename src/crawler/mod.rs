//! Crawler module for fetching and paging through the listing endpoint
//!
//! This module contains the network side of the pipeline:
//! - HTTP client construction and page fetching
//! - The sequential pagination state machine

mod fetcher;
mod paginator;

pub use fetcher::{build_http_client, fetch_page, Hits, PageQuery, SearchEnvelope};
pub use paginator::{next_page_token, Paginator};

use crate::config::Config;
use crate::extract::ListingRecord;
use crate::FiAlertsError;

/// Runs a complete crawl and always yields whatever was accumulated.
///
/// A transport or decode failure ends the crawl at that page; records from
/// earlier pages are returned alongside the error so the caller can still
/// export a partial dataset.
pub async fn run_crawl(config: Config) -> (Vec<ListingRecord>, Option<FiAlertsError>) {
    let mut paginator = match Paginator::new(config) {
        Ok(paginator) => paginator,
        Err(e) => return (Vec::new(), Some(e)),
    };

    let error = paginator.run().await.err();
    (paginator.into_records(), error)
}
