//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - One GET per URL, never retried
//! - Content-Type inspection before the body is read
//! - Error classification into skip reasons
//!
//! Pages are classified by Content-Type alone. An error page served as
//! `text/html` is still a page; the coordinator decides whether its status
//! disqualifies it.

use crate::config::UserAgentConfig;
use crate::state::SkipReason;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum number of redirects followed for one request
const MAX_REDIRECTS: usize = 10;

/// Upper bound on the connect phase of a request
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Fetched an HTML page (any status code)
    Page {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value
        content_type: String,
        /// Page body content
        body: String,
    },

    /// Page is not HTML (Content-Type mismatch); the body was not read
    NotHtml {
        /// HTTP status code
        status_code: u16,
        /// The actual Content-Type received (empty when missing)
        content_type: String,
    },

    /// Network error (connection refused, timeout, DNS, TLS, body read)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// The skip reason for every non-page result
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Page { .. } => None,
            Self::NotHtml { .. } => Some(SkipReason::NotHtml),
            Self::NetworkError { .. } => Some(SkipReason::Network),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Overall timeout for each request, body included
///
/// # Example
///
/// ```no_run
/// use minicrawler::config::UserAgentConfig;
/// use minicrawler::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(15)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true if a Content-Type header value declares HTML
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

/// Fetches a URL once and classifies the response
///
/// # Request Flow
///
/// | Condition | Result |
/// |-----------|--------|
/// | Transport failure (DNS, connect, TLS, timeout) | NetworkError |
/// | Content-Type without `text/html` | NotHtml (body not read) |
/// | Body cannot be read or decoded | NetworkError |
/// | Otherwise | Page |
///
/// Never returns an error: every outcome is a skip or a page.
pub async fn fetch_page(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchResult::NetworkError {
                error: describe_network_error(&e),
            }
        }
    };

    let status = response.status();

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html_content_type(&content_type) {
        return FetchResult::NotHtml {
            status_code: status.as_u16(),
            content_type,
        };
    }

    let final_url = response.url().to_string();

    match response.text().await {
        Ok(body) => FetchResult::Page {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: describe_network_error(&e),
        },
    }
}

fn describe_network_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_redirect() {
        format!("Redirect error: {}", e)
    } else {
        e.to_string()
    }
}
