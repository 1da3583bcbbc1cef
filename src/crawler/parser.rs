//! HTML parser for extracting links and metadata
//!
//! This module handles parsing HTML content to extract:
//! - Raw anchor targets, in document order
//! - Page title (for logging)
//!
//! Links are returned exactly as written in the markup. Resolution,
//! scheme filtering and fragment removal happen in the canonicalizer.

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Raw `href` values of every `<a>` element, empty for anchors without one
    pub links: Vec<String>,
}

/// Parses HTML content and extracts the title and raw anchor targets
///
/// # Link Extraction Rules
///
/// - Every `<a>` element contributes one entry, in document order
/// - A missing `href` contributes an empty string
/// - `<link>`, `<img>`, `<script>` and other elements are ignored
///
/// The HTML5 parser recovers from malformed markup, so an error here means
/// the selectors themselves could not be built.
///
/// # Example
///
/// ```
/// use minicrawler::crawler::parse_html;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a><a>x</a></body></html>"#;
/// let parsed = parse_html(html).unwrap();
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["/page".to_string(), String::new()]);
/// ```
pub fn parse_html(html: &str) -> Result<ParsedPage, String> {
    let anchor_selector =
        Selector::parse("a").map_err(|e| format!("invalid anchor selector: {:?}", e))?;

    let document = Html::parse_document(html);

    let links = document
        .select(&anchor_selector)
        .map(|element| element.value().attr("href").unwrap_or("").to_string())
        .collect();

    Ok(ParsedPage {
        title: extract_title(&document),
        links,
    })
}

/// Convenience function for extracting just the raw links from HTML
pub fn extract_links(html: &str) -> Result<Vec<String>, String> {
    parse_html(html).map(|parsed| parsed.links)
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
