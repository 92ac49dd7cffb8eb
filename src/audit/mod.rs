//! Audit checks run against the declared and installed dependency sets
//!
//! This module provides:
//! - Drift check: installed packages the manifest does not declare
//! - Freshness check: bounded-concurrency lookup of the latest published versions

mod drift;
mod freshness;

pub use drift::find_undeclared;
pub use freshness::{FreshnessChecker, FreshnessReport, DEFAULT_CONCURRENCY};
