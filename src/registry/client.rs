//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Optional request timeout (none by default) and User-Agent
//! - Status and JSON decoding errors mapped to `RegistryError`
//!
//! Requests are never retried; a failed lookup is reported once.

use crate::error::{ConfigError, RegistryError};
use reqwest::Client;
use std::time::Duration;

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("pcheck/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(None, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Option<Duration>, user_agent: &str) -> Result<Self, ConfigError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| ConfigError::HttpClient {
            message: e.to_string(),
        })?;

        Ok(Self { client })
    }

    /// Create a new HTTP client with a request timeout
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, ConfigError> {
        Self::with_config(timeout, DEFAULT_USER_AGENT)
    }

    /// Perform a GET request with error context
    pub async fn get_with_context(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<reqwest::Response, RegistryError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::timeout(package, registry)
            } else {
                RegistryError::network_error(package, registry, e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::package_not_found(package, registry));
        }
        if !status.is_success() {
            return Err(RegistryError::network_error(
                package,
                registry,
                format!("HTTP {}", status),
            ));
        }

        Ok(response)
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get_with_context(url, package, registry).await?;

        response.json::<T>().await.map_err(|e| {
            RegistryError::invalid_response(
                package,
                registry,
                format!("failed to parse JSON: {}", e),
            )
        })
    }
}
