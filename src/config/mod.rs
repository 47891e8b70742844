//! Configuration module for fi-alerts
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every field carries a default matching the production endpoint, so
//! the crawler also runs with no config file at all.
//!
//! # Example
//!
//! ```no_run
//! use fi_alerts::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Paging endpoint: {}", config.search.endpoint);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, SearchConfig, VpnConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation entry point
pub use validation::validate;
