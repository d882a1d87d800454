//! Crawl engine - traversal orchestration
//!
//! This module drives the depth-first descent over the region tree:
//! - Maintaining the worklist and the visited set
//! - Fetching branch pages (failures here are fatal, no retry)
//! - Processing leaf pages under the retry-once policy
//! - Emitting records through the record emitter
//! - Per-node progress logging
//!
//! The traversal uses an explicit stack rather than call recursion, so a
//! deep or malformed tree cannot overflow the call stack. Children are
//! pushed in reverse so they pop in document order, which keeps the output
//! identical to a recursive depth-first walk.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_document, resolve_encoding};
use crate::crawler::navigator::{classify, PageKind};
use crate::extract::{extract_precincts, PrecinctRecord};
use crate::output::RecordEmitter;
use crate::schema::REGION_NAME_SEPARATOR;
use crate::{Result, ScrapeError};
use encoding_rs::Encoding;
use reqwest::Client;
use std::collections::HashSet;
use std::io::Write;

/// One pending node of the region tree
#[derive(Debug)]
struct WorkItem {
    /// Absolute address of the region page
    url: String,
    /// Region path name accumulated from the root, owned by this entry
    name: String,
}

/// Crawl engine holding all traversal state.
///
/// The visited set deduplicates by exact string equality on the resolved
/// absolute address. Near-duplicate addresses (query-parameter reordering)
/// bypass it; this matches the source behavior and is a documented
/// limitation.
pub struct Engine<'a, W: Write> {
    config: &'a Config,
    client: Client,
    encoding: &'static Encoding,
    visited: HashSet<String>,
    emitter: RecordEmitter<W>,
}

impl<'a, W: Write> Engine<'a, W> {
    /// Creates an engine writing records to the given sink
    pub fn new(config: &'a Config, client: Client, sink: W) -> Result<Self> {
        let encoding = resolve_encoding(&config.site.page_encoding)?;
        Ok(Self {
            config,
            client,
            encoding,
            visited: HashSet::new(),
            emitter: RecordEmitter::new(sink),
        })
    }

    /// Runs the full traversal from the configured root.
    ///
    /// Terminal on completion or on the first error that survives the leaf
    /// retry budget. Records emitted before a fatal error stay in the sink;
    /// a partial output stream is more useful than none.
    pub async fn run(&mut self) -> Result<()> {
        self.emitter.write_header()?;

        let root_url = self.config.site.root_url.clone();
        let mut stack: Vec<WorkItem> = Vec::new();
        self.visited.insert(root_url.clone());
        stack.push(WorkItem {
            url: root_url,
            name: String::new(),
        });

        let mut leaves_processed = 0usize;

        while let Some(item) = stack.pop() {
            tracing::info!("{}: {}", display_name(&item.name), item.url);

            // Branch-page fetch failures are fatal by design; only leaf
            // processing below gets the retry
            let document = fetch_document(&self.client, &item.url, self.encoding).await?;

            match classify(&document, &item.url, &self.config.site)? {
                PageKind::Leaf(commission_url) => {
                    let records = self.process_leaf(&commission_url, &item.name).await?;
                    for record in &records {
                        self.emitter.write_record(record)?;
                    }
                    leaves_processed += 1;
                    tracing::info!("Done {}", display_name(&item.name));
                }
                PageKind::Branch(links) => {
                    // Reverse push so the first link in document order is
                    // processed first; insert into the visited set at
                    // dispatch, before the child is ever fetched
                    for link in links.into_iter().rev() {
                        if self.visited.insert(link.url.clone()) {
                            stack.push(WorkItem {
                                name: child_name(&item.name, &link.name),
                                url: link.url,
                            });
                        }
                    }
                }
            }
        }

        self.emitter.flush()?;
        tracing::info!(
            "Crawl complete: {} pages visited, {} leaves extracted",
            self.visited.len(),
            leaves_processed
        );
        Ok(())
    }

    /// Processes a leaf's precinct-commission page under the retry policy:
    /// one attempt, and on any retryable failure exactly one more from
    /// scratch. A second failure propagates and aborts the crawl.
    async fn process_leaf(&self, url: &str, name: &str) -> Result<Vec<PrecinctRecord>> {
        match self.attempt_leaf(url, name).await {
            Ok(records) => Ok(records),
            Err(first) if first.is_leaf_retryable() => {
                tracing::warn!("Leaf {} failed ({}), retrying once", url, first);
                self.attempt_leaf(url, name).await
            }
            Err(other) => Err(other),
        }
    }

    /// One full fetch-and-extract attempt against a commission page
    async fn attempt_leaf(&self, url: &str, name: &str) -> Result<Vec<PrecinctRecord>> {
        let document = fetch_document(&self.client, url, self.encoding).await?;
        extract_precincts(&document, name).map_err(|source| ScrapeError::Table {
            url: url.to_string(),
            source,
        })
    }

    /// Consumes the engine and returns the emitter (and its sink)
    pub fn into_emitter(self) -> RecordEmitter<W> {
        self.emitter
    }
}

/// Builds a child's region path name from its parent's
fn child_name(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}{REGION_NAME_SEPARATOR}{child}")
    }
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(root)"
    } else {
        name
    }
}

/// Runs a complete crawl with the given configuration, writing delimited
/// records to `sink`
///
/// # Arguments
///
/// * `config` - The crawl configuration
/// * `sink` - Output destination for the header and records
///
/// # Example
///
/// ```no_run
/// use uik_scrape::config::Config;
/// use uik_scrape::crawler::crawl;
///
/// # async fn example() -> uik_scrape::Result<()> {
/// let config = Config::default();
/// let mut out = Vec::new();
/// crawl(&config, &mut out).await?;
/// # Ok(())
/// # }
/// ```
pub async fn crawl<W: Write>(config: &Config, sink: W) -> Result<()> {
    let client = build_http_client(&config.fetch)?;
    let mut engine = Engine::new(config, client, sink)?;
    engine.run().await
}
