//! Registry adapters for fetching package version information
//!
//! This module provides:
//! - HTTP client shared foundation
//! - npm Registry adapter

mod client;
mod npm;

pub use client::HttpClient;
pub use npm::{NpmAdapter, NPM_REGISTRY_URL};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for registry adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch the latest published version of a package
    async fn fetch_latest(&self, package: &str) -> Result<String, RegistryError>;
}
