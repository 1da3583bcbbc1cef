//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop that coordinates:
//! - Loading the robots.txt policy once per crawl
//! - Popping URLs from the frontier and gating them through robots and scope
//! - Fetching pages and recording the HTML ones as results
//! - Expanding links back into the frontier
//! - Pacing requests with a fixed delay

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_html;
use crate::output::CrawlStats;
use crate::robots::RobotsGate;
use crate::state::{SkipReason, StepOutcome};
use crate::url::{canonicalize, parse_seed, ScopeFilter};
use crate::CrawlError;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// Outcome of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Accepted page URLs, in the order they were fetched
    pub pages: Vec<Url>,

    /// Per-step counters
    pub stats: CrawlStats,
}

/// State owned by one crawl invocation
#[derive(Debug, Default)]
struct CrawlState {
    frontier: Frontier,
    pages: Vec<Url>,
    stats: CrawlStats,
}

/// Main crawler coordinator structure
///
/// A coordinator runs exactly one crawl; `run` consumes it. Nothing is
/// shared between coordinators, so independent crawls can run side by side.
pub struct Coordinator {
    seed: Url,
    client: Client,
    scope: ScopeFilter,
    agent: String,
    max_pages: usize,
    delay: Duration,
    fail_open: bool,
    respect_crawl_delay: bool,
    skip_error_status: bool,
}

impl Coordinator {
    /// Creates a new coordinator for the given seed
    ///
    /// Fails before any network I/O if the seed is not an absolute http(s)
    /// URL or the HTTP client cannot be built.
    pub fn new(seed_url: &str, config: &Config) -> Result<Self, CrawlError> {
        let seed = parse_seed(seed_url)?;
        let client = build_http_client(&config.user_agent, config.crawler.request_timeout())?;
        let scope = ScopeFilter::new(&seed, &config.scope);

        Ok(Self {
            seed,
            client,
            scope,
            agent: config.user_agent.crawler_name.clone(),
            max_pages: config.crawler.max_pages,
            delay: config.crawler.delay(),
            fail_open: config.robots.fail_open,
            respect_crawl_delay: config.robots.respect_crawl_delay,
            skip_error_status: config.crawler.skip_error_status,
        })
    }

    /// The canonical seed URL
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// Runs the crawl loop until the page cap is reached or the frontier
    /// is exhausted
    pub async fn run(self) -> CrawlReport {
        let start_time = Instant::now();
        let mut state = CrawlState::default();

        if self.max_pages == 0 {
            tracing::info!("max_pages is 0, nothing to crawl");
            return CrawlReport {
                pages: state.pages,
                stats: state.stats,
            };
        }

        tracing::info!("Starting crawl of {} (max {} pages)", self.seed, self.max_pages);

        let robots = RobotsGate::load(&self.client, &self.seed, &self.agent, self.fail_open).await;
        let delay = self.pace_delay(&robots);

        state.frontier.push(self.seed.clone());

        while state.pages.len() < self.max_pages {
            let url = match state.frontier.pop() {
                Some(url) => url,
                None => {
                    tracing::info!("Frontier is empty, crawl complete");
                    break;
                }
            };

            let outcome = self.process_url(url, &robots, &mut state).await;
            state.stats.record(&outcome);

            if state.stats.processed % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages accepted, {} URLs processed, {} in frontier",
                    state.pages.len(),
                    state.stats.processed,
                    state.frontier.pending()
                );
            }

            // Pace after every request; gate rejections sent nothing
            if outcome.made_request() && state.pages.len() < self.max_pages {
                tokio::time::sleep(delay).await;
            }
        }

        if state.pages.len() >= self.max_pages {
            tracing::info!("Reached page cap of {}", self.max_pages);
        }

        state.stats.frontier_remaining = state.frontier.pending();
        state.stats.urls_seen = state.frontier.seen_count();

        tracing::info!(
            "Crawl completed: {} pages accepted in {:?}",
            state.pages.len(),
            start_time.elapsed()
        );

        CrawlReport {
            pages: state.pages,
            stats: state.stats,
        }
    }

    /// Processes a single frontier entry
    ///
    /// This method:
    /// 1. Checks robots.txt
    /// 2. Checks path rules, domain and asset extension
    /// 3. Fetches the page
    /// 4. Records HTML pages as results (error statuses too, unless
    ///    `skip-error-status` is set)
    /// 5. Extracts links and pushes the in-scope ones
    async fn process_url(
        &self,
        url: Url,
        robots: &RobotsGate,
        state: &mut CrawlState,
    ) -> StepOutcome {
        if !robots.allowed(&url) {
            tracing::debug!("Skipping {}: disallowed by robots.txt", url);
            return StepOutcome::Skipped(SkipReason::RobotsDenied);
        }

        if let Err(reason) = self.scope.check_frontier_entry(&url) {
            tracing::debug!("Skipping {}: {}", url, reason);
            return StepOutcome::Skipped(reason);
        }

        let (status_code, body) = match fetch_page(&self.client, &url).await {
            FetchResult::Page { status_code, body, .. } => (status_code, body),
            skipped => {
                // Every non-page result carries a reason
                let reason = skipped.skip_reason().unwrap_or(SkipReason::Network);
                tracing::debug!("Skipping {}: {} ({:?})", url, reason, skipped);
                return StepOutcome::Skipped(reason);
            }
        };

        if self.skip_error_status && !(200..300).contains(&status_code) {
            tracing::debug!("Skipping {}: HTTP {}", url, status_code);
            return StepOutcome::Skipped(SkipReason::HttpStatus);
        }

        let parsed = match parse_html(&body) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Failed to parse HTML for {}: {}", url, e);
                None
            }
        };

        match parsed.as_ref().and_then(|p| p.title.as_deref()) {
            Some(title) => tracing::info!("Accepted {} ({})", url, title),
            None => tracing::info!("Accepted {}", url),
        }

        let links_queued = match &parsed {
            Some(parsed) => self.enqueue_links(&url, &parsed.links, &mut state.frontier),
            None => 0,
        };

        state.pages.push(url);

        StepOutcome::Accepted { links_queued }
    }

    /// Canonicalizes raw hrefs against the page URL and pushes the new,
    /// in-scope ones onto the frontier
    ///
    /// Returns the number of URLs pushed.
    fn enqueue_links(&self, page: &Url, hrefs: &[String], frontier: &mut Frontier) -> usize {
        let mut queued = 0;

        for href in hrefs {
            let link = match canonicalize(page, href) {
                Some(link) => link,
                None => {
                    tracing::trace!("Dropping link {:?} on {}: not a web URL", href, page);
                    continue;
                }
            };

            if frontier.contains(&link) {
                continue;
            }

            if !self.scope.accepts_link(&link) {
                tracing::trace!("Dropping link {} on {}: out of scope", link, page);
                continue;
            }

            if frontier.push(link) {
                queued += 1;
            }
        }

        queued
    }

    /// The pause applied after every request
    fn pace_delay(&self, robots: &RobotsGate) -> Duration {
        if !self.respect_crawl_delay {
            return self.delay;
        }

        match robots.crawl_delay() {
            Some(crawl_delay) if crawl_delay > self.delay => {
                tracing::info!("Using robots.txt Crawl-delay of {:?}", crawl_delay);
                crawl_delay
            }
            _ => self.delay,
        }
    }
}

/// Runs a crawl and returns the full report
///
/// # Example
///
/// ```no_run
/// use minicrawler::config::Config;
/// use minicrawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), minicrawler::CrawlError> {
/// let report = run_crawl("https://example.com/", &Config::default()).await?;
/// println!("{} pages, {} skipped", report.pages.len(), report.stats.total_skipped());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(seed_url: &str, config: &Config) -> Result<CrawlReport, CrawlError> {
    let coordinator = Coordinator::new(seed_url, config)?;
    Ok(coordinator.run().await)
}
