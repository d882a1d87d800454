//! Region page classification
//!
//! A page in the region tree is either a branch (it links to further
//! sub-region pages) or a leaf (it carries exactly one link, identified by
//! its anchor text, to the precinct-commission site holding the results
//! table). Classification looks only at link structure; fetching and
//! deduplication happen in the engine.

use crate::config::SiteConfig;
use crate::{Result, ScrapeError};
use scraper::{Html, Selector};
use url::Url;

/// A sub-region link discovered on a branch page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLink {
    /// Absolute address of the sub-region page
    pub url: String,
    /// The link's anchor text, used as the child's local name
    pub name: String,
}

/// The role of a fetched region page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    /// The page links to a precinct-commission site at this address
    Leaf(String),
    /// The page links to sub-region pages, in document order and unfiltered.
    /// Deduplication against the visited set is the engine's concern.
    Branch(Vec<RegionLink>),
}

/// Classifies a region page as leaf or branch.
///
/// A leaf is identified by exactly one hyperlink whose visible text equals
/// the configured commission-link phrase. More than one such link breaks the
/// source schema assumption and is fatal. With none, every link whose
/// resolved address starts with the region prefix becomes a child.
///
/// # Arguments
///
/// * `document` - The parsed region page
/// * `page_url` - Address the page was fetched from, used to resolve
///   relative hrefs and to name the page in errors
/// * `site` - Site configuration with the leaf phrase and region prefix
pub fn classify(document: &Html, page_url: &str, site: &SiteConfig) -> Result<PageKind> {
    let base = Url::parse(page_url)?;
    let anchor_selector = Selector::parse("a[href]").expect("static selector is valid");

    let mut commission_links = Vec::new();
    let mut region_links = Vec::new();

    for anchor in document.select(&anchor_selector) {
        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => continue,
        };

        let resolved = match resolve_link(href, &base) {
            Some(url) => url,
            None => continue,
        };

        let text = anchor.text().collect::<String>().trim().to_string();

        if text == site.leaf_link_text {
            commission_links.push(resolved);
            continue;
        }

        if resolved.starts_with(&site.region_link_prefix) {
            region_links.push(RegionLink {
                url: resolved,
                name: text,
            });
        }
    }

    match commission_links.len() {
        0 => Ok(PageKind::Branch(region_links)),
        1 => Ok(PageKind::Leaf(commission_links.remove(0))),
        count => Err(ScrapeError::AmbiguousLeaf {
            url: page_url.to_string(),
            count,
        }),
    }
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None for special schemes (javascript:, mailto:, tel:, data:),
/// fragment-only anchors, unparseable hrefs, and non-HTTP(S) results.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
