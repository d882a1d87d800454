//! HTTP fetcher implementation
//!
//! This module handles all page retrieval for the crawler:
//! - Building the HTTP client with user agent and timeouts
//! - GET requests with status checking
//! - Decoding the legacy single-byte page encoding into UTF-8
//! - Parsing the decoded body into a document tree
//!
//! The fetcher never retries; the crawl engine owns the retry policy.

use crate::config::FetchConfig;
use crate::{Result, ScrapeError};
use encoding_rs::Encoding;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

/// Builds the HTTP client used for the whole crawl
///
/// # Arguments
///
/// * `config` - Fetch configuration with user agent and timeouts
pub fn build_http_client(config: &FetchConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Resolves a configured encoding label to a concrete encoding.
///
/// The label applies to every page of the crawl; there is no per-page
/// auto-detection.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| ScrapeError::UnknownEncoding(label.to_string()))
}

/// Fetches a page and returns its parsed document tree.
///
/// The raw response bytes are decoded with the declared encoding; the
/// Content-Type charset of the response is ignored (the source site declares
/// it inconsistently). A non-success status, transport failure, or byte
/// sequence invalid in the declared encoding all fail the fetch.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - Address to fetch
/// * `encoding` - Declared page encoding for the crawl
pub async fn fetch_document(
    client: &Client,
    url: &str,
    encoding: &'static Encoding,
) -> Result<Html> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(|source| ScrapeError::Fetch {
        url: url.to_string(),
        source,
    })?;

    let (text, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(ScrapeError::Decode {
            url: url.to_string(),
            encoding: encoding.name().to_string(),
        });
    }

    Ok(Html::parse_document(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = FetchConfig::default();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_resolve_known_encoding() {
        let encoding = resolve_encoding("windows-1251").unwrap();
        assert_eq!(encoding.name(), "windows-1251");

        // The historical alias resolves to the same encoding
        let alias = resolve_encoding("cp1251").unwrap();
        assert_eq!(alias, encoding);
    }

    #[test]
    fn test_resolve_unknown_encoding() {
        let result = resolve_encoding("definitely-not-an-encoding");
        assert!(matches!(result, Err(ScrapeError::UnknownEncoding(_))));
    }

    #[test]
    fn test_cyrillic_decodes_from_cp1251_bytes() {
        let encoding = resolve_encoding("windows-1251").unwrap();
        // "УИК" in windows-1251
        let bytes = [0xD3, 0xC8, 0xCA];
        let (text, _, had_errors) = encoding.decode(&bytes);
        assert!(!had_errors);
        assert_eq!(text, "УИК");
    }
}
