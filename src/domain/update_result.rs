//! Audit result types
//!
//! - `UpdateResult`: an installed package with a newer published version
//! - `LookupFailure`: a package whose latest version could not be determined
//! - `ConfigDrift`: installed packages that the manifest does not declare

use crate::error::RegistryError;
use std::collections::BTreeSet;
use std::fmt;

/// An installed package that is behind the latest published version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    /// Package name
    pub name: String,
    /// Version found in node_modules
    pub installed_version: String,
    /// Latest version published on the registry
    pub available_version: String,
}

impl UpdateResult {
    /// Creates a new UpdateResult
    pub fn new(
        name: impl Into<String>,
        installed_version: impl Into<String>,
        available_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            installed_version: installed_version.into(),
            available_version: available_version.into(),
        }
    }
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.name, self.installed_version, self.available_version
        )
    }
}

/// A package whose registry lookup failed
#[derive(Debug)]
pub struct LookupFailure {
    /// Package name
    pub name: String,
    /// What went wrong
    pub error: RegistryError,
}

impl LookupFailure {
    pub fn new(name: impl Into<String>, error: RegistryError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

/// Installed packages with no entry in the manifest
///
/// Never empty: an audit without drift yields no `ConfigDrift` at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDrift {
    packages: BTreeSet<String>,
}

impl ConfigDrift {
    /// Wraps a set of undeclared names, returning `None` when the set is empty
    pub fn from_packages(packages: BTreeSet<String>) -> Option<Self> {
        if packages.is_empty() {
            None
        } else {
            Some(Self { packages })
        }
    }

    /// Undeclared package names in name order
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(String::as_str)
    }

    /// Returns true if the given package is part of the drift
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
