//! Freshness check: installed versions against the latest published ones
//!
//! Lookups run concurrently, gated by a semaphore so that no more than
//! `concurrency` registry requests are in flight. A failed lookup only
//! affects its own package.

use crate::domain::{
    is_valid_range, DeclaredDependencies, InstalledPackages, LookupFailure, UpdateResult,
};
use crate::error::RegistryError;
use crate::progress::Progress;
use crate::registry::RegistryAdapter;
use futures::future::join_all;
use semver::Version;
use std::cmp::Ordering;
use tokio::sync::Semaphore;
use tracing::debug;

/// Default limit of simultaneous registry lookups
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Result of a freshness check
#[derive(Debug, Default)]
pub struct FreshnessReport {
    /// Packages behind their latest published version, sorted by name
    pub updates: Vec<UpdateResult>,
    /// Packages whose lookup failed, sorted by name
    pub failures: Vec<LookupFailure>,
    /// Number of lookups issued
    pub checked: usize,
}

impl FreshnessReport {
    /// Outdated packages, or `None` when everything is current
    pub fn outdated(&self) -> Option<&[UpdateResult]> {
        if self.updates.is_empty() {
            None
        } else {
            Some(&self.updates)
        }
    }

    /// Returns true if any lookup failed
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    fn from_outcomes(outcomes: Vec<LookupOutcome>) -> Self {
        let mut report = FreshnessReport {
            checked: outcomes.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome {
                LookupOutcome::Outdated(update) => report.updates.push(update),
                LookupOutcome::Failed(failure) => report.failures.push(failure),
                LookupOutcome::Current => {}
            }
        }

        report.updates.sort_by(|a, b| a.name.cmp(&b.name));
        report.failures.sort_by(|a, b| a.name.cmp(&b.name));
        report
    }
}

/// A package that qualifies for a registry lookup
struct Candidate<'a> {
    name: &'a str,
    installed_raw: &'a str,
    installed: Version,
}

enum LookupOutcome {
    Outdated(UpdateResult),
    Current,
    Failed(LookupFailure),
}

/// Bounded-concurrency checker for newer published versions
pub struct FreshnessChecker {
    adapter: Box<dyn RegistryAdapter>,
    semaphore: Semaphore,
    concurrency: usize,
}

impl FreshnessChecker {
    /// Create a checker with the default concurrency limit
    pub fn new(adapter: Box<dyn RegistryAdapter>) -> Self {
        Self::with_concurrency(adapter, DEFAULT_CONCURRENCY)
    }

    /// Create a checker with a custom concurrency limit (at least 1)
    pub fn with_concurrency(adapter: Box<dyn RegistryAdapter>, concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        Self {
            adapter,
            semaphore: Semaphore::new(concurrency),
            concurrency,
        }
    }

    /// Maximum number of lookups in flight
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Check every installed, declared package for a newer published version
    pub async fn check_updates(
        &self,
        declared: &DeclaredDependencies,
        installed: &InstalledPackages,
    ) -> FreshnessReport {
        self.check_updates_with_progress(declared, installed, &mut Progress::disabled())
            .await
    }

    /// Same as `check_updates`, ticking `progress` as lookups complete
    pub async fn check_updates_with_progress(
        &self,
        declared: &DeclaredDependencies,
        installed: &InstalledPackages,
        progress: &mut Progress,
    ) -> FreshnessReport {
        let candidates = select_candidates(declared, installed);

        progress.start(candidates.len() as u64, "Checking latest versions");
        let ticker = &*progress;

        let lookups = candidates.into_iter().map(move |candidate| async move {
            let outcome = self.check_one(candidate).await;
            ticker.inc();
            outcome
        });
        let outcomes = join_all(lookups).await;

        progress.finish_and_clear();
        FreshnessReport::from_outcomes(outcomes)
    }

    async fn check_one(&self, candidate: Candidate<'_>) -> LookupOutcome {
        let registry = self.adapter.registry_name();

        let Ok(_permit) = self.semaphore.acquire().await else {
            return LookupOutcome::Failed(LookupFailure::new(
                candidate.name,
                RegistryError::network_error(candidate.name, registry, "lookup pool closed"),
            ));
        };

        debug!(package = candidate.name, "fetching latest version");
        let latest_raw = match self.adapter.fetch_latest(candidate.name).await {
            Ok(version) => version,
            Err(e) => {
                debug!(package = candidate.name, error = %e, "version lookup failed");
                return LookupOutcome::Failed(LookupFailure::new(candidate.name, e));
            }
        };

        let latest = match parse_version(&latest_raw) {
            Ok(version) => version,
            Err(e) => {
                debug!(
                    package = candidate.name,
                    version = %latest_raw,
                    "unparseable latest version"
                );
                return LookupOutcome::Failed(LookupFailure::new(
                    candidate.name,
                    RegistryError::invalid_response(
                        candidate.name,
                        registry,
                        format!("invalid version '{}': {}", latest_raw, e),
                    ),
                ));
            }
        };

        if is_newer(&latest, &candidate.installed) {
            LookupOutcome::Outdated(UpdateResult::new(
                candidate.name,
                candidate.installed_raw,
                latest_raw,
            ))
        } else {
            LookupOutcome::Current
        }
    }
}

/// Installed packages that are declared with a valid range and carry a
/// parseable version; nothing else is looked up
fn select_candidates<'a>(
    declared: &'a DeclaredDependencies,
    installed: &'a InstalledPackages,
) -> Vec<Candidate<'a>> {
    installed
        .iter()
        .filter_map(|(name, installed_raw)| {
            let range = declared.range(name)?;
            if !is_valid_range(range) {
                return None;
            }
            match parse_version(installed_raw) {
                Ok(installed) => Some(Candidate {
                    name,
                    installed_raw,
                    installed,
                }),
                Err(_) => {
                    debug!(
                        package = name,
                        version = installed_raw,
                        "skipping unparseable installed version"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Parse a concrete version, tolerating a leading `=` or `v`
fn parse_version(raw: &str) -> Result<Version, semver::Error> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('=').unwrap_or(trimmed);
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(trimmed)
}

/// Semantic-version precedence; build metadata does not count
fn is_newer(latest: &Version, installed: &Version) -> bool {
    latest.cmp_precedence(installed) == Ordering::Greater
}
