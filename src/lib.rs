//! uik-scrape: a precinct-level election results harvester
//!
//! This crate implements a depth-first crawler over a hierarchical tree of
//! election-commission region pages. It descends until it reaches a leaf page
//! that links directly to a precinct-commission site, extracts the fixed
//! 27-row results table found there, and emits one `;`-delimited record per
//! precinct to stdout or a file.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod schema;

use thiserror::Error;

/// Main error type for uik-scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to decode {url} as {encoding}")]
    Decode { url: String, encoding: String },

    #[error("Unknown page encoding label: {0}")]
    UnknownEncoding(String),

    #[error("Ambiguous leaf page {url}: found {count} commission links, expected exactly 1")]
    AmbiguousLeaf { url: String, count: usize },

    #[error("Table structure violation at {url}: {source}")]
    Table {
        url: String,
        source: extract::TableStructureError,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output sink error: {0}")]
    Sink(#[from] std::io::Error),
}

impl ScrapeError {
    /// Whether this error is eligible for the single leaf-processing retry.
    ///
    /// Fetch, decode, and table-structure failures are transient at the leaf
    /// level. Ambiguous leaf links and sink write failures are not: the first
    /// is a broken schema assumption, the second would re-fail identically.
    pub fn is_leaf_retryable(&self) -> bool {
        matches!(
            self,
            ScrapeError::Fetch { .. }
                | ScrapeError::HttpStatus { .. }
                | ScrapeError::Decode { .. }
                | ScrapeError::Reqwest(_)
                | ScrapeError::Table { .. }
        )
    }
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
}

/// Result type alias for uik-scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{PrecinctRecord, TableStructureError};
pub use output::RecordEmitter;
