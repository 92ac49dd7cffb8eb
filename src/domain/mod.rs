//! Core domain models for pcheck
//!
//! This module contains the fundamental types used throughout the application:
//! - Declared and installed dependency sets
//! - npm version range validation
//! - Audit results (updates, lookup failures, configuration drift)

mod dependency;
mod update_result;
mod version_range;

pub use dependency::{DeclaredDependencies, InstalledPackages};
pub use update_result::{ConfigDrift, LookupFailure, UpdateResult};
pub use version_range::is_valid_range;
