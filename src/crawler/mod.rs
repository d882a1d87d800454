//! Crawler module for region-tree traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and legacy-encoding decode
//! - Leaf/branch page classification
//! - Depth-first traversal with deduplication and the leaf retry policy

mod engine;
mod fetcher;
mod navigator;

pub use engine::{crawl, Engine};
pub use fetcher::{build_http_client, fetch_document, resolve_encoding};
pub use navigator::{classify, PageKind, RegionLink};
