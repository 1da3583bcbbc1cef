use serde::Deserialize;
use std::time::Duration;

/// Default page cap for a crawl
pub const DEFAULT_MAX_PAGES: usize = 200;

/// Default per-request timeout (milliseconds)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

/// Default pause after every fetch attempt (milliseconds)
pub const DEFAULT_DELAY_MS: u64 = 500;

/// Main configuration structure for Minicrawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub robots: RobotsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Default seed URL; the command line may override it
    #[serde(rename = "seed-url", default)]
    pub seed_url: Option<String>,

    /// Maximum number of HTML pages to return
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Timeout for each HTTP request (milliseconds)
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Pause after every fetch attempt (milliseconds)
    #[serde(rename = "delay-ms", default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Drop HTML responses with a non-2xx status instead of accepting them
    #[serde(rename = "skip-error-status", default)]
    pub skip_error_status: bool,
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed_url: None,
            max_pages: DEFAULT_MAX_PAGES,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            delay_ms: DEFAULT_DELAY_MS,
            skip_error_status: false,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Product token; also the agent name matched against robots.txt groups
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `Mozilla/5.0 (compatible; Name/Version[; +ContactURL])`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "Mozilla/5.0 (compatible; {}/{}; +{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!(
                "Mozilla/5.0 (compatible; {}/{})",
                self.crawler_name, self.crawler_version
            ),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
        }
    }
}

/// Crawl boundary configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeConfig {
    /// Also crawl hosts ending in `.<seed host>`
    #[serde(rename = "include-subdomains", default)]
    pub include_subdomains: bool,

    /// If set, a path must start with at least one of these prefixes
    #[serde(rename = "allow-paths", default)]
    pub allow_paths: Option<Vec<String>>,

    /// If set, a path must start with none of these prefixes
    #[serde(rename = "deny-paths", default)]
    pub deny_paths: Option<Vec<String>>,
}

/// robots.txt handling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RobotsConfig {
    /// Allow everything when robots.txt cannot be loaded (otherwise deny everything)
    #[serde(rename = "fail-open", default = "default_true")]
    pub fail_open: bool,

    /// Raise the pacing delay to the site's Crawl-delay when it is larger
    #[serde(rename = "respect-crawl-delay", default)]
    pub respect_crawl_delay: bool,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            fail_open: true,
            respect_crawl_delay: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// File to write the discovered URL list to (stdout when unset)
    pub path: Option<String>,
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_crawler_name() -> String {
    "MiniCrawler".to_string()
}

fn default_crawler_version() -> String {
    "1.0".to_string()
}

fn default_true() -> bool {
    true
}
