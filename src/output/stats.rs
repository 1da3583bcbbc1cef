//! Statistics gathered while a crawl runs
//!
//! The coordinator records every step outcome here; the CLI prints the
//! result after the crawl when asked to.

use crate::state::{SkipReason, StepOutcome};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStats {
    /// URLs popped from the frontier
    pub processed: u64,

    /// HTTP requests made for pages (robots.txt excluded)
    pub requests: u64,

    /// Pages accepted as results
    pub accepted: u64,

    /// New URLs pushed onto the frontier from accepted pages
    pub links_queued: u64,

    /// Count of dropped URLs per reason
    pub skipped: HashMap<SkipReason, u64>,

    /// Entries still waiting in the frontier when the crawl stopped
    pub frontier_remaining: usize,

    /// Distinct URLs ever enqueued
    pub urls_seen: usize,
}

impl CrawlStats {
    /// Records the outcome of one frontier entry
    pub fn record(&mut self, outcome: &StepOutcome) {
        self.processed += 1;

        if outcome.made_request() {
            self.requests += 1;
        }

        match outcome {
            StepOutcome::Accepted { links_queued } => {
                self.accepted += 1;
                self.links_queued += *links_queued as u64;
            }
            StepOutcome::Skipped(reason) => {
                *self.skipped.entry(*reason).or_insert(0) += 1;
            }
        }
    }

    /// Number of URLs dropped for the given reason
    pub fn skipped_for(&self, reason: SkipReason) -> u64 {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Number of URLs dropped for any reason
    pub fn total_skipped(&self) -> u64 {
        self.skipped.values().sum()
    }
}

/// Renders statistics as a human-readable block of text
pub fn format_statistics(stats: &CrawlStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Crawl Statistics ===\n");

    let _ = writeln!(out, "Overview:");
    let _ = writeln!(out, "  URLs processed: {}", stats.processed);
    let _ = writeln!(out, "  Page requests: {}", stats.requests);
    let _ = writeln!(out, "  Pages accepted: {}", stats.accepted);
    let _ = writeln!(out, "  Links queued: {}", stats.links_queued);
    let _ = writeln!(out, "  Distinct URLs seen: {}", stats.urls_seen);
    let _ = writeln!(out, "  Left in frontier: {}", stats.frontier_remaining);

    if stats.total_skipped() > 0 {
        let _ = writeln!(out, "\nSkipped:");
        for reason in SkipReason::all() {
            let count = stats.skipped_for(reason);
            if count > 0 {
                let _ = writeln!(out, "  {}: {}", reason, count);
            }
        }
    }

    let acceptance = if stats.requests > 0 {
        (stats.accepted as f64 / stats.requests as f64) * 100.0
    } else {
        0.0
    };

    let _ = writeln!(
        out,
        "\nAcceptance Rate: {:.1}% ({} / {} requests returned HTML pages)",
        acceptance, stats.accepted, stats.requests
    );

    out
}

/// Prints statistics to stderr, keeping stdout free for the URL list
pub fn print_statistics(stats: &CrawlStats) {
    eprint!("{}", format_statistics(stats));
}
