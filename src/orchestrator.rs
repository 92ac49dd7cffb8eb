//! Audit orchestrator for coordinating the entire workflow
//!
//! This module provides:
//! - Workflow coordination: load manifest → resolve installed → drift → freshness
//! - Short-circuit on fatal errors before any check runs
//! - Construction of the registry client, adapter and resolver from configuration

use crate::audit::{find_undeclared, FreshnessChecker, FreshnessReport, DEFAULT_CONCURRENCY};
use crate::cli::CliArgs;
use crate::domain::ConfigDrift;
use crate::error::{AppError, ConfigError};
use crate::manifest::{load_manifest, manifest_path};
use crate::package_manager::{InstalledResolver, NpmResolver};
use crate::progress::Progress;
use crate::registry::{HttpClient, NpmAdapter, NPM_REGISTRY_URL};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Project directory holding package.json
    pub project_dir: PathBuf,
    /// Registry base URL
    pub registry_url: String,
    /// Maximum concurrent registry lookups
    pub concurrency: usize,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// npm executable used to list installed packages
    pub npm_program: String,
    /// Whether to draw a progress bar
    pub show_progress: bool,
}

impl AuditConfig {
    /// Create an audit configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Self {
        Self {
            project_dir: args.path.clone(),
            registry_url: args.registry.clone(),
            concurrency: args.concurrency,
            timeout: args.timeout,
            npm_program: args.npm.clone(),
            show_progress: !args.quiet && !args.verbose,
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            registry_url: NPM_REGISTRY_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout: None,
            npm_program: "npm".to_string(),
            show_progress: false,
        }
    }
}

/// Result of a completed audit
#[derive(Debug)]
pub struct AuditReport {
    /// Installed packages missing from package.json
    pub drift: Option<ConfigDrift>,
    /// Outdated packages and failed lookups
    pub freshness: FreshnessReport,
}

/// Orchestrator for coordinating the audit workflow
pub struct Orchestrator<R: InstalledResolver = NpmResolver> {
    config: AuditConfig,
    resolver: R,
    checker: FreshnessChecker,
}

impl Orchestrator<NpmResolver> {
    /// Create a new orchestrator talking to npm and the configured registry
    pub fn new(config: AuditConfig) -> Result<Self, AppError> {
        validate_registry_url(&config.registry_url)?;
        let client = HttpClient::with_timeout(config.timeout)?;
        let adapter = NpmAdapter::with_base_url(client, &config.registry_url);
        let checker = FreshnessChecker::with_concurrency(Box::new(adapter), config.concurrency);
        let resolver = NpmResolver::with_program(config.npm_program.clone());

        Ok(Self::with_parts(config, resolver, checker))
    }
}

/// The registry must be an absolute http(s) URL
fn validate_registry_url(value: &str) -> Result<(), ConfigError> {
    let url =
        Url::parse(value).map_err(|e| ConfigError::invalid_registry(value, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::invalid_registry(
            value,
            format!("unsupported scheme '{}'", other),
        )),
    }
}

impl<R: InstalledResolver> Orchestrator<R> {
    /// Create an orchestrator with a custom resolver and checker (for testing)
    pub fn with_parts(config: AuditConfig, resolver: R, checker: FreshnessChecker) -> Self {
        Self {
            config,
            resolver,
            checker,
        }
    }

    /// Run the audit
    pub async fn run(&self) -> Result<AuditReport, AppError> {
        let dir = &self.config.project_dir;

        // Step 1: Load declared dependencies
        let declared = load_manifest(&manifest_path(dir))?;
        debug!(count = declared.len(), "loaded declared dependencies");

        // Step 2: Resolve installed packages; missing ones abort the run
        let installed = self.resolver.resolve(dir)?;
        debug!(count = installed.len(), "resolved installed packages");

        // Step 3: Configuration drift
        let drift = find_undeclared(&declared, &installed);

        // Step 4: Freshness against the registry
        let mut progress = Progress::new(self.config.show_progress);
        let freshness = self
            .checker
            .check_updates_with_progress(&declared, &installed, &mut progress)
            .await;
        info!(
            checked = freshness.checked,
            outdated = freshness.updates.len(),
            failed = freshness.failures.len(),
            "freshness check complete"
        );

        Ok(AuditReport { drift, freshness })
    }
}
