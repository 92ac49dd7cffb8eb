//! npm Registry adapter
//!
//! Fetches the latest published version of a package from the npm registry.
//! API endpoint: https://registry.npmjs.org/{package}/latest

use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use async_trait::async_trait;
use serde::Deserialize;

/// npm registry base URL
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// npm Registry adapter
pub struct NpmAdapter {
    client: HttpClient,
    base_url: String,
}

/// Manifest of the version behind the `latest` dist-tag
#[derive(Debug, Deserialize)]
struct NpmLatestResponse {
    version: String,
}

impl NpmAdapter {
    /// Create a new npm adapter against the public registry
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, NPM_REGISTRY_URL)
    }

    /// Create a new npm adapter against a custom registry
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}/latest", self.base_url, package)
    }
}

#[async_trait]
impl RegistryAdapter for NpmAdapter {
    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn fetch_latest(&self, package: &str) -> Result<String, RegistryError> {
        let url = self.build_url(package);
        let response: NpmLatestResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        Ok(response.version)
    }
}
