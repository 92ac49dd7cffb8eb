//! pcheck - npm dependency audit library
//!
//! This library compares a project's package.json against:
//! - the packages actually installed (`npm ls --json`), reporting drift
//! - the latest versions published on the npm registry, reporting outdated packages

pub mod audit;
pub mod cli;
pub mod domain;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod package_manager;
pub mod progress;
pub mod registry;
