//! fi-alerts: investor-alert register scraper
//!
//! This crate implements a sequential crawler for the Swedish FSA's public
//! investor-alert search endpoint. It pages through the endpoint's JSON
//! responses, extracts alert records from the HTML fragments embedded in
//! them, and exports the cleaned, deduplicated result to a spreadsheet.

pub mod config;
pub mod crawler;
pub mod dataset;
pub mod extract;
pub mod output;
pub mod text;
pub mod vpn;

use thiserror::Error;

/// Main error type for fi-alerts operations
#[derive(Debug, Error)]
pub enum FiAlertsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to decode search response from {url}: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for fi-alerts operations
pub type Result<T> = std::result::Result<T, FiAlertsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use dataset::Dataset;
pub use extract::ListingRecord;
