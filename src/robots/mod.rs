//! Robots.txt handling module
//!
//! The robots policy of a crawl is loaded once, from the seed root's
//! `/robots.txt`, and consulted for every URL popped from the frontier.
//!
//! # Load Outcomes
//!
//! | Response | Policy |
//! |----------|--------|
//! | 2xx | Parsed rules |
//! | 401 / 403 | Deny everything |
//! | Other 4xx | No policy published: allow everything |
//! | 5xx, network error, unreadable body | Load failure: allow everything when failing open, else deny everything |

mod parser;

pub use parser::ParsedRobots;

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Longest Crawl-delay honored from a robots.txt file
const MAX_CRAWL_DELAY: Duration = Duration::from_secs(60);

/// Reasons a robots.txt file could not be loaded
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("cannot derive robots.txt location from {0}")]
    InvalidRoot(String),

    #[error("request for {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Returns the robots.txt URL for the root of the given URL's site
///
/// # Examples
///
/// ```
/// use minicrawler::robots::robots_url;
/// use url::Url;
///
/// let seed = Url::parse("https://example.com:8443/docs/intro?x=1").unwrap();
/// let robots = robots_url(&seed).unwrap();
/// assert_eq!(robots.as_str(), "https://example.com:8443/robots.txt");
/// ```
pub fn robots_url(root: &Url) -> Option<Url> {
    root.join("/robots.txt").ok()
}

/// Fetches and parses robots.txt for the site of `root`
///
/// Status codes are mapped per the table in the module docs. Anything that
/// counts as a load failure is returned as an error so the caller can pick
/// the fallback policy.
pub async fn fetch_robots(client: &Client, root: &Url) -> Result<ParsedRobots, RobotsError> {
    let url = robots_url(root).ok_or_else(|| RobotsError::InvalidRoot(root.to_string()))?;

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| RobotsError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();

    if status.is_success() {
        let body = response.text().await.map_err(|source| RobotsError::Request {
            url: url.to_string(),
            source,
        })?;
        return Ok(ParsedRobots::from_content(&body));
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        tracing::info!("{} is access-restricted (HTTP {}), denying all", url, status);
        return Ok(ParsedRobots::disallow_all());
    }

    if status.is_client_error() {
        tracing::debug!("No robots.txt at {} (HTTP {})", url, status);
        return Ok(ParsedRobots::allow_all());
    }

    Err(RobotsError::Status {
        url: url.to_string(),
        status: status.as_u16(),
    })
}

/// Per-crawl robots.txt gate
///
/// Owns the policy loaded at crawl start and the agent token used to match
/// `User-agent` groups.
#[derive(Debug, Clone)]
pub struct RobotsGate {
    robots: ParsedRobots,
    agent: String,
}

impl RobotsGate {
    /// Wraps an already loaded policy
    pub fn new(robots: ParsedRobots, agent: &str) -> Self {
        Self {
            robots,
            agent: agent.to_string(),
        }
    }

    /// Loads the policy for the site of `root`, exactly once
    ///
    /// Never fails: a load failure falls back to allow-all when `fail_open`
    /// is set and to deny-all otherwise.
    pub async fn load(client: &Client, root: &Url, agent: &str, fail_open: bool) -> Self {
        let robots = match fetch_robots(client, root).await {
            Ok(robots) => robots,
            Err(e) if fail_open => {
                tracing::warn!("Could not load robots.txt ({}); allowing all URLs", e);
                ParsedRobots::allow_all()
            }
            Err(e) => {
                tracing::warn!("Could not load robots.txt ({}); denying all URLs", e);
                ParsedRobots::disallow_all()
            }
        };

        Self::new(robots, agent)
    }

    /// Checks if the URL may be fetched by our agent
    pub fn allowed(&self, url: &Url) -> bool {
        self.robots.is_allowed(url.as_str(), &self.agent)
    }

    /// The Crawl-delay published for our agent (or `*`), capped at one minute
    pub fn crawl_delay(&self) -> Option<Duration> {
        self.robots
            .crawl_delay(&self.agent)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .map(|delay| delay.min(MAX_CRAWL_DELAY))
    }
}
