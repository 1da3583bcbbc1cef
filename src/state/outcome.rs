//! Per-step outcome definitions for the crawl loop
//!
//! Every URL popped from the frontier ends in exactly one of these outcomes.
//! Nothing in here is fatal: the only crawl-aborting condition is an invalid
//! seed, which is reported before the loop starts.

use std::fmt;

/// Why a popped URL did not become a result page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    // ===== Gate Rejections (no request sent) =====
    /// robots.txt disallows the URL for our agent
    RobotsDenied,

    /// URL path fails the allow/deny prefix rules
    PathPolicy,

    /// URL host is outside the crawl domain
    OutOfDomain,

    /// URL path ends in a known non-HTML extension
    BinaryAsset,

    // ===== Fetch Rejections (request sent) =====
    /// Transport failure: DNS, connect, TLS, timeout or body read
    Network,

    /// Server answered with a non-success status code
    HttpStatus,

    /// Response Content-Type is not HTML
    NotHtml,
}

impl SkipReason {
    /// Returns true if a request was sent before the URL was rejected
    ///
    /// The coordinator paces after these, and only these, skips.
    pub fn is_fetch_rejection(&self) -> bool {
        matches!(self, Self::Network | Self::HttpStatus | Self::NotHtml)
    }

    /// Short snake_case label used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RobotsDenied => "robots_denied",
            Self::PathPolicy => "path_policy",
            Self::OutOfDomain => "out_of_domain",
            Self::BinaryAsset => "binary_asset",
            Self::Network => "network",
            Self::HttpStatus => "http_status",
            Self::NotHtml => "not_html",
        }
    }

    /// Returns all skip reasons in reporting order
    pub fn all() -> [Self; 7] {
        [
            Self::RobotsDenied,
            Self::PathPolicy,
            Self::OutOfDomain,
            Self::BinaryAsset,
            Self::Network,
            Self::HttpStatus,
            Self::NotHtml,
        ]
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of processing one frontier entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The page was fetched as HTML and appended to the results
    Accepted {
        /// Number of new URLs pushed onto the frontier from this page
        links_queued: usize,
    },

    /// The URL was dropped
    Skipped(SkipReason),
}

impl StepOutcome {
    /// Returns true if an HTTP request was made for this step
    pub fn made_request(&self) -> bool {
        match self {
            Self::Accepted { .. } => true,
            Self::Skipped(reason) => reason.is_fetch_rejection(),
        }
    }
}
