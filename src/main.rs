//! Minicrawler main entry point
//!
//! This is the command-line interface for the Minicrawler page discoverer.

use anyhow::{bail, Context};
use clap::Parser;
use minicrawler::config::{load_config_with_hash, validate, Config};
use minicrawler::crawler::run_crawl;
use minicrawler::output::{print_statistics, write_url_list, write_url_list_to_path};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Minicrawler: a polite same-site page discoverer
///
/// Minicrawler walks a website breadth-first from a seed URL while
/// respecting robots.txt, path rules and a fixed request pace, and prints
/// the HTML pages it finds, one URL per line.
#[derive(Parser, Debug)]
#[command(name = "minicrawler")]
#[command(version = "1.0.0")]
#[command(about = "A polite same-site page discoverer", long_about = None)]
struct Cli {
    /// Seed URL (overrides crawler.seed-url)
    #[arg(value_name = "SEED")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to accept
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Also crawl subdomains of the seed host
    #[arg(long)]
    include_subdomains: bool,

    /// Only crawl paths under this prefix (repeatable)
    #[arg(long = "allow-path", value_name = "P")]
    allow_paths: Vec<String>,

    /// Never crawl paths under this prefix (repeatable)
    #[arg(long = "deny-path", value_name = "P")]
    deny_paths: Vec<String>,

    /// Pause between requests, in milliseconds
    #[arg(long, value_name = "N")]
    delay_ms: Option<u64>,

    /// Per-request timeout, in milliseconds
    #[arg(long, value_name = "N")]
    timeout_ms: Option<u64>,

    /// Drop HTML pages served with a non-2xx status
    #[arg(long)]
    skip_error_status: bool,

    /// Write the URL list to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print crawl statistics to stderr when done
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    let seed = match config.crawler.seed_url.clone() {
        Some(seed) => seed,
        None => bail!("No seed URL given; pass SEED or set crawler.seed-url"),
    };

    if cli.dry_run {
        handle_dry_run(&config, &seed);
        return Ok(());
    }

    handle_crawl(&config, &seed, cli.stats).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the URL list.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("minicrawler=info,warn"),
            1 => EnvFilter::new("minicrawler=debug,info"),
            2 => EnvFilter::new("minicrawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Folds command-line flags over the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(seed) = &cli.seed {
        config.crawler.seed_url = Some(seed.clone());
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.delay_ms = delay_ms;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.crawler.request_timeout_ms = timeout_ms;
    }
    if cli.skip_error_status {
        config.crawler.skip_error_status = true;
    }
    if cli.include_subdomains {
        config.scope.include_subdomains = true;
    }
    if !cli.allow_paths.is_empty() {
        config.scope.allow_paths = Some(cli.allow_paths.clone());
    }
    if !cli.deny_paths.is_empty() {
        config.scope.deny_paths = Some(cli.deny_paths.clone());
    }
    if let Some(output) = &cli.output {
        config.output.path = Some(output.display().to_string());
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config, seed: &str) {
    println!("=== Minicrawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", seed);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Request timeout: {}ms", config.crawler.request_timeout_ms);
    println!("  Delay between requests: {}ms", config.crawler.delay_ms);
    println!("  Skip error statuses: {}", config.crawler.skip_error_status);

    println!("\nUser Agent:");
    println!("  Header: {}", config.user_agent.header_value());

    println!("\nScope:");
    println!("  Include subdomains: {}", config.scope.include_subdomains);
    println!("  Allow paths: {}", describe_paths(&config.scope.allow_paths));
    println!("  Deny paths: {}", describe_paths(&config.scope.deny_paths));

    println!("\nRobots:");
    println!("  Fail open: {}", config.robots.fail_open);
    println!("  Respect Crawl-delay: {}", config.robots.respect_crawl_delay);

    println!("\nOutput:");
    println!("  URL list: {}", config.output.path.as_deref().unwrap_or("<stdout>"));

    println!("\n✓ Configuration is valid");
}

fn describe_paths(paths: &Option<Vec<String>>) -> String {
    match paths {
        Some(paths) if !paths.is_empty() => paths.join(", "),
        _ => "(none)".to_string(),
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, seed: &str, show_stats: bool) -> anyhow::Result<()> {
    let report = match run_crawl(seed, config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    match &config.output.path {
        Some(path) => {
            write_url_list_to_path(&report.pages, Path::new(path))
                .with_context(|| format!("Failed to write URL list to {}", path))?;
            tracing::info!("Wrote {} URLs to {}", report.pages.len(), path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_url_list(&report.pages, &mut handle).context("Failed to write URL list")?;
        }
    }

    if show_stats {
        print_statistics(&report.stats);
    }

    Ok(())
}
