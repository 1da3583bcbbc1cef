//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with outcome classification
//! - HTML parsing and raw link extraction
//! - The breadth-first frontier
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use fetcher::{build_http_client, fetch_page, is_html_content_type, FetchResult};
pub use frontier::Frontier;
pub use parser::{extract_links, parse_html, ParsedPage};

use crate::config::Config;
use crate::CrawlError;
use url::Url;

/// Discovers the in-domain HTML pages reachable from a seed URL
///
/// This is the main entry point for library callers. It will:
/// 1. Validate and canonicalize the seed
/// 2. Load robots.txt for the seed's host
/// 3. Walk the site breadth-first, at most `max_pages` accepted pages
/// 4. Return accepted page URLs in fetch order
///
/// # Arguments
///
/// * `seed_url` - Absolute http(s) URL to start from
/// * `config` - The crawler configuration (its own seed is ignored)
///
/// # Returns
///
/// * `Ok(urls)` - Accepted pages, seed first when it was accepted
/// * `Err(CrawlError)` - The seed was invalid or the client could not be built
///
/// Per-page failures never surface here; they only shrink the result.
pub async fn discover_site_urls(seed_url: &str, config: &Config) -> Result<Vec<Url>, CrawlError> {
    let report = run_crawl(seed_url, config).await?;
    Ok(report.pages)
}
