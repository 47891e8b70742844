//! HTTP fetcher for the paging endpoint
//!
//! This module handles the network side of the crawl:
//! - Building the HTTP client with the endpoint's expected headers and cookie
//! - Issuing one GET per page token
//! - Decoding the JSON envelope the endpoint wraps its HTML fragments in
//!
//! There is no retry logic: a transport failure surfaces to the pagination
//! controller and ends the crawl at that page.

use crate::config::{HttpConfig, SearchConfig};
use crate::{FiAlertsError, Result};
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, COOKIE, REFERER, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Query parameters for one paging request.
///
/// `q`, `take` and `lang` stay fixed across the crawl; `page` carries the
/// opaque token the server handed out for the next page, starting at "0".
#[derive(Debug, Clone, Serialize)]
pub struct PageQuery {
    pub q: String,
    pub page: String,
    pub take: String,
    pub lang: String,
}

impl PageQuery {
    /// Builds the query for the given page token.
    pub fn for_page(search: &SearchConfig, token: &str) -> Self {
        Self {
            q: search.query.clone(),
            page: token.to_string(),
            take: search.take.to_string(),
            lang: search.lang.clone(),
        }
    }
}

/// Decoded JSON body of a paging response.
///
/// Only the fields the crawler consumes are modeled; everything else in the
/// payload is ignored. A missing `hits` object decodes to an empty page
/// rather than an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub hits: Hits,
}

/// The `hits` object of a paging response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hits {
    /// HTML fragment containing zero or more listing elements
    #[serde(default)]
    pub row: Option<String>,

    /// HTML fragment containing the pagination control; absent or empty
    /// when no further pages exist
    #[serde(default)]
    pub paging: Option<String>,
}

/// Builds the HTTP client used for every paging request.
///
/// The endpoint is an XHR search API and only answers requests that look
/// like they come from its own listings page, so the client carries the
/// matching Accept, Referer, X-Requested-With and client-hint headers plus
/// the session cookie. The User-Agent is set per request, not here.
pub fn build_http_client(http: &HttpConfig, referer: &str) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
    headers.insert(REFERER, HeaderValue::from_str(referer)?);
    headers.insert(COOKIE, HeaderValue::from_str(&http.session_cookie)?);
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            "\"Google Chrome\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"",
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));

    let client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Issues one GET against the paging endpoint and decodes the envelope.
///
/// Each request impersonates a randomly chosen browser profile from the
/// configured User-Agent list. Non-success statuses and malformed JSON are
/// errors; both halt the crawl at this page.
pub async fn fetch_page(
    client: &Client,
    search: &SearchConfig,
    http: &HttpConfig,
    query: &PageQuery,
) -> Result<SearchEnvelope> {
    let user_agent = http
        .user_agents
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_default();

    let response = client
        .get(&search.endpoint)
        .header(USER_AGENT, user_agent)
        .query(query)
        .send()
        .await
        .map_err(|e| FiAlertsError::Http {
            url: search.endpoint.clone(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FiAlertsError::HttpStatus {
            url: search.endpoint.clone(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| FiAlertsError::Http {
        url: search.endpoint.clone(),
        source: e,
    })?;

    serde_json::from_str(&body).map_err(|e| FiAlertsError::Json {
        url: search.endpoint.clone(),
        source: e,
    })
}
