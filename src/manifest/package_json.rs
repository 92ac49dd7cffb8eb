//! package.json parser
//!
//! Declared dependencies are merged from, in order:
//! - dependencies
//! - devDependencies

use crate::domain::DeclaredDependencies;
use crate::error::ManifestError;
use serde_json::{Map, Value};

/// Dependency groups read from package.json, later groups win on conflicts
pub const DEPENDENCY_GROUPS: [&str; 2] = ["dependencies", "devDependencies"];

/// Parser for package.json files
pub struct PackageJsonParser;

impl PackageJsonParser {
    /// Parse the declared dependencies out of package.json content
    pub fn parse(&self, content: &str) -> Result<DeclaredDependencies, ManifestError> {
        let json: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error("package.json", e.to_string()))?;

        let Some(root) = json.as_object() else {
            return Err(ManifestError::json_parse_error(
                "package.json",
                "expected a JSON object at the top level",
            ));
        };

        let mut declared = DeclaredDependencies::new();
        for group in DEPENDENCY_GROUPS {
            if let Some(deps) = root.get(group).and_then(|v| v.as_object()) {
                merge_dependencies(&mut declared, deps);
            }
        }

        Ok(declared)
    }
}

/// Non-string values still count as declared, but carry no range
fn merge_dependencies(declared: &mut DeclaredDependencies, deps: &Map<String, Value>) {
    for (name, value) in deps {
        match value.as_str() {
            Some(range) => declared.insert(name.as_str(), range),
            None => declared.insert_unranged(name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<DeclaredDependencies, ManifestError> {
        PackageJsonParser.parse(content)
    }

    #[test]
    fn test_parse_simple_dependencies() {
        let content = r#"{
            "dependencies": {
                "lodash": "^4.17.21",
                "express": "~4.18.2"
            }
        }"#;

        let declared = parse(content).unwrap();
        assert_eq!(declared.len(), 2);
        assert_eq!(declared.range("lodash"), Some("^4.17.21"));
        assert_eq!(declared.range("express"), Some("~4.18.2"));
    }

    #[test]
    fn test_parse_dev_dependencies_merged() {
        let content = r#"{
            "dependencies": { "react": "^18.2.0" },
            "devDependencies": { "typescript": "^5.0.0" }
        }"#;

        let declared = parse(content).unwrap();
        assert_eq!(declared.len(), 2);
        assert!(declared.contains("react"));
        assert!(declared.contains("typescript"));
    }

    #[test]
    fn test_dev_dependencies_override_dependencies() {
        let content = r#"{
            "dependencies": { "lodash": "^4.0.0" },
            "devDependencies": { "lodash": "^4.17.0" }
        }"#;

        let declared = parse(content).unwrap();
        assert_eq!(declared.len(), 1);
        assert_eq!(declared.range("lodash"), Some("^4.17.0"));
    }

    #[test]
    fn test_other_groups_ignored() {
        let content = r#"{
            "peerDependencies": { "react": "^18.0.0" },
            "optionalDependencies": { "fsevents": "^2.3.0" }
        }"#;

        let declared = parse(content).unwrap();
        assert!(declared.is_empty());
    }

    #[test]
    fn test_non_range_values_still_declared() {
        let content = r#"{
            "dependencies": {
                "local-lib": "file:../local-lib",
                "tagged": "latest",
                "odd": { "version": "1.0.0" },
                "num": 1,
                "flag": true
            }
        }"#;

        let declared = parse(content).unwrap();
        assert_eq!(declared.len(), 5);
        assert_eq!(declared.range("local-lib"), Some("file:../local-lib"));
        assert_eq!(declared.range("tagged"), Some("latest"));
        assert!(declared.contains("odd"));
        assert_eq!(declared.range("odd"), None);
        assert!(declared.contains("num"));
        assert_eq!(declared.range("num"), None);
        assert_eq!(declared.range("flag"), None);
    }

    #[test]
    fn test_parse_without_dependencies() {
        let declared = parse(r#"{ "name": "empty" }"#).unwrap();
        assert!(declared.is_empty());
    }

    #[test]
    fn test_parse_null_group() {
        let declared = parse(r#"{ "dependencies": null }"#).unwrap();
        assert!(declared.is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse("{ not json");
        assert!(matches!(result, Err(ManifestError::JsonParseError { .. })));
    }

    #[test]
    fn test_parse_non_object_root() {
        let result = parse("[1, 2, 3]");
        assert!(matches!(result, Err(ManifestError::JsonParseError { .. })));
    }
}
