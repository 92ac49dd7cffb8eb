//! Configuration drift: installed packages missing from the manifest

use crate::domain::{ConfigDrift, DeclaredDependencies, InstalledPackages};
use std::collections::BTreeSet;

/// Returns the installed packages that package.json does not declare
///
/// `None` means there is nothing to report.
pub fn find_undeclared(
    declared: &DeclaredDependencies,
    installed: &InstalledPackages,
) -> Option<ConfigDrift> {
    let undeclared: BTreeSet<String> = installed
        .iter()
        .filter(|(name, _)| !declared.contains(name))
        .map(|(name, _)| name.to_string())
        .collect();

    ConfigDrift::from_packages(undeclared)
}
