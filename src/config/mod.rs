//! Configuration module for uik-scrape
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. All settings have built-in defaults for the reference election
//! site, so a config file is only needed to point the crawler elsewhere or
//! tune fetch behavior.
//!
//! # Example
//!
//! ```no_run
//! use uik_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawl root: {}", config.site.root_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, SiteConfig};

// Re-export parser functions
pub use parser::{default_config, load_config};
