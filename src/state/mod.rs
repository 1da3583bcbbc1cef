//! State module for tracking crawl progress
//!
//! This module provides the explicit per-step result type used by the crawl
//! loop in place of error-driven control flow.
//!
//! # Components
//!
//! - `StepOutcome`: What happened to one frontier entry (accepted or skipped)
//! - `SkipReason`: Why an entry was dropped

mod outcome;

pub use outcome::{SkipReason, StepOutcome};
