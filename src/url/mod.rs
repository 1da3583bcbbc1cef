//! URL handling module for Minicrawler
//!
//! This module provides URL canonicalization (so each page has exactly one
//! frontier identity) and the scope filter that decides which canonical URLs
//! belong to a crawl.

mod canonical;
mod scope;

// Re-export main functions
pub use canonical::{canonicalize, is_web_scheme, parse_seed};
pub use scope::{is_probably_binary, ScopeFilter};
