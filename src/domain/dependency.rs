//! Declared and installed dependency sets

use std::collections::BTreeMap;

/// Dependencies declared in the manifest: package name to version range
///
/// Built by merging the manifest's dependency groups in order. A name that
/// appears in several groups keeps the value from the last group. A package
/// declared with a non-string value has no range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredDependencies {
    ranges: BTreeMap<String, Option<String>>,
}

impl DeclaredDependencies {
    /// Creates an empty set of declarations
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a package with a version range, replacing any earlier entry
    pub fn insert(&mut self, name: impl Into<String>, range: impl Into<String>) {
        self.ranges.insert(name.into(), Some(range.into()));
    }

    /// Declares a package whose manifest value is not a string
    pub fn insert_unranged(&mut self, name: impl Into<String>) {
        self.ranges.insert(name.into(), None);
    }

    /// Merges one dependency group; entries already present are overwritten
    pub fn merge_group<I, K, V>(&mut self, group: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, range) in group {
            self.insert(name, range);
        }
    }

    /// Returns the declared range for a package, `None` when the package is
    /// undeclared or has no range
    pub fn range(&self, name: &str) -> Option<&str> {
        self.ranges.get(name)?.as_deref()
    }

    /// Returns true if the package is declared
    pub fn contains(&self, name: &str) -> bool {
        self.ranges.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DeclaredDependencies {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut declared = Self::new();
        declared.merge_group(iter);
        declared
    }
}

/// First-level packages actually present: package name to concrete version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledPackages {
    versions: BTreeMap<String, String>,
}

impl InstalledPackages {
    /// Creates an empty installed set
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an installed package
    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) {
        self.versions.insert(name.into(), version.into());
    }

    /// Returns the installed version of a package
    pub fn version(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    /// Iterates over `(name, version)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.versions.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InstalledPackages {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut installed = Self::new();
        for (name, version) in iter {
            installed.insert(name, version);
        }
        installed
    }
}
