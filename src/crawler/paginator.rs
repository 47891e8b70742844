//! Pagination controller
//!
//! Drives the sequential fetch -> extract -> next-token cycle. One request
//! is in flight at a time; the accumulated record collection is owned here
//! for the lifetime of the crawl and handed to the finalizer afterwards.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, PageQuery};
use crate::extract::{extract_records, ListingRecord};
use crate::Result;
use scraper::{Html, Selector};

/// Crawl loop state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CrawlState {
    /// A page token is pending a request
    Fetching(String),
    /// The server stopped handing out page tokens
    Done,
}

/// Sequential pagination controller.
///
/// Termination relies on the server eventually omitting the next-page token;
/// the optional `max-pages` config value bounds the loop for operators who
/// do not want to trust that.
pub struct Paginator {
    client: reqwest::Client,
    config: Config,
    records: Vec<ListingRecord>,
    pages_fetched: u32,
}

impl Paginator {
    /// Builds the controller and its HTTP client.
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.http, &config.search.listings_page)?;
        Ok(Self {
            client,
            config,
            records: Vec::new(),
            pages_fetched: 0,
        })
    }

    /// Runs the crawl until the server stops paging.
    ///
    /// On error the records accumulated so far stay in place, so the caller
    /// can still finalize a partial dataset.
    pub async fn run(&mut self) -> Result<()> {
        let mut state = CrawlState::Fetching("0".to_string());

        while let CrawlState::Fetching(token) = state {
            if self.page_limit_reached() {
                tracing::warn!(
                    "Stopping at configured max-pages bound ({}) with page token {} still pending",
                    self.config.search.max_pages,
                    token
                );
                break;
            }
            state = self.fetch_one(&token).await?;
        }

        tracing::info!(
            "Crawl finished: {} pages fetched, {} records accumulated",
            self.pages_fetched,
            self.records.len()
        );
        Ok(())
    }

    /// Fetches one page, accumulates its records, and derives the next state.
    async fn fetch_one(&mut self, token: &str) -> Result<CrawlState> {
        tracing::info!("Requesting page {}", token);

        let query = PageQuery::for_page(&self.config.search, token);
        let envelope = fetch_page(&self.client, &self.config.search, &self.config.http, &query).await?;
        self.pages_fetched += 1;

        if let Some(row) = envelope.hits.row.as_deref() {
            let mut page_records = extract_records(
                row,
                &self.config.search.listings_page,
                &self.config.search.base_origin,
            );
            tracing::debug!("Extracted {} records from page {}", page_records.len(), token);
            self.records.append(&mut page_records);
        }

        let next = envelope
            .hits
            .paging
            .as_deref()
            .filter(|paging| !paging.trim().is_empty())
            .and_then(next_page_token);

        match next {
            Some(next_token) => Ok(CrawlState::Fetching(next_token)),
            None => {
                tracing::info!("Pagination not found after page {}", token);
                Ok(CrawlState::Done)
            }
        }
    }

    fn page_limit_reached(&self) -> bool {
        let max_pages = self.config.search.max_pages;
        max_pages > 0 && self.pages_fetched >= max_pages
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Records accumulated so far, in page/document order.
    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    /// Consumes the controller and yields the accumulated records.
    pub fn into_records(self) -> Vec<ListingRecord> {
        self.records
    }
}

/// Reads the next page token from the pagination control fragment.
///
/// The control is a `div` with id `paging` carrying the token in its
/// `data-page` attribute; an absent element or blank attribute means the
/// listing is exhausted.
pub fn next_page_token(paging_html: &str) -> Option<String> {
    let fragment = Html::parse_fragment(paging_html);
    let selector = Selector::parse("div#paging").ok()?;

    fragment
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("data-page"))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
