//! npm version range validation
//!
//! A declared value is a range when npm's range grammar accepts it:
//! exact versions, partials and wildcards, caret and tilde, hyphen ranges,
//! comparator sets and `||` unions. An empty value matches any version.
//!
//! Dist-tags (`latest`), URLs, paths and git or alias specifiers are not ranges.

use node_semver::Range;

/// Returns true if `range` is a syntactically valid npm version range
pub fn is_valid_range(range: &str) -> bool {
    range.trim().is_empty() || Range::parse(range).is_ok()
}
