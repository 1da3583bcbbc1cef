//! Configuration module for Minicrawler
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key has a default, so an empty file (or no file at all) is a
//! valid configuration once a seed URL is supplied.
//!
//! # Example
//!
//! ```no_run
//! use minicrawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("minicrawler.toml")).unwrap();
//! println!("Crawler will stop after {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, RobotsConfig, ScopeConfig, UserAgentConfig,
    DEFAULT_DELAY_MS, DEFAULT_MAX_PAGES, DEFAULT_REQUEST_TIMEOUT_MS,
};

// Re-export parser and validation functions
pub use parser::{
    hash_config_content, load_config, load_config_with_hash, parse_config,
};
pub use validation::{validate, validate_seed_url};
