//! Robots.txt parser implementation
//!
//! This module wraps the robotstxt crate's matcher behind a small policy type
//! that also covers the two blanket policies: allow everything and deny
//! everything.

use robotstxt::DefaultMatcher;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Policy {
    AllowAll,
    DisallowAll,
    Rules(String),
}

/// Parsed robots.txt data
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    policy: Policy,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            policy: Policy::Rules(content.to_string()),
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    ///
    /// Used when the site publishes no robots.txt, and when loading fails
    /// while failing open.
    pub fn allow_all() -> Self {
        Self {
            policy: Policy::AllowAll,
        }
    }

    /// Creates a restrictive ParsedRobots that denies everything
    ///
    /// Used for 401/403 responses, and when loading fails while failing
    /// closed.
    pub fn disallow_all() -> Self {
        Self {
            policy: Policy::DisallowAll,
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The product token matched against `User-agent` lines
    ///
    /// A panic inside the matcher is treated as permission.
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        let content = match &self.policy {
            Policy::AllowAll => return true,
            Policy::DisallowAll => return false,
            Policy::Rules(content) if content.trim().is_empty() => return true,
            Policy::Rules(content) => content,
        };

        let verdict = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut matcher = DefaultMatcher::default();
            matcher.one_agent_allowed_by_robots(content, user_agent, url)
        }));

        verdict.unwrap_or_else(|_| {
            tracing::warn!("robots.txt matcher failed on {}; treating as allowed", url);
            true
        })
    }

    /// Gets the crawl delay for a specific user agent
    ///
    /// # Returns
    ///
    /// * `Some(f64)` - The crawl delay in seconds
    /// * `None` - If no crawl delay is specified
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        let content = match &self.policy {
            Policy::Rules(content) => content,
            _ => return None,
        };

        // Crawl-delay applies to the user-agent group it appears in. Consecutive
        // User-agent lines form one group; any other directive closes the list
        // of agents so the next User-agent line starts a new group.
        let agent = user_agent.to_lowercase();
        let mut group: Vec<String> = Vec::new();
        let mut group_open = false;
        let mut wildcard_delay: Option<f64> = None;
        let mut agent_delay: Option<f64> = None;

        for line in content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    if !group_open {
                        group.clear();
                        group_open = true;
                    }
                    group.push(value.to_lowercase());
                }
                "crawl-delay" => {
                    group_open = false;
                    let Ok(delay) = value.parse::<f64>() else {
                        continue;
                    };
                    if !delay.is_finite() || delay < 0.0 {
                        continue;
                    }
                    if group.iter().any(|ua| ua == &agent) {
                        agent_delay = Some(delay);
                    } else if group.iter().any(|ua| ua == "*") {
                        wildcard_delay = Some(delay);
                    }
                }
                _ => group_open = false,
            }
        }

        // Prefer specific user-agent delay over wildcard delay
        agent_delay.or(wildcard_delay)
    }
}
