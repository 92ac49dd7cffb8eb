//! Manifest loading
//!
//! This module provides functionality to:
//! - Locate package.json in a project directory
//! - Read and parse its declared dependencies

mod package_json;

pub use package_json::{PackageJsonParser, DEPENDENCY_GROUPS};

use crate::domain::DeclaredDependencies;
use crate::error::ManifestError;
use std::path::{Path, PathBuf};

/// Name of the manifest file looked up in the project directory
pub const MANIFEST_FILENAME: &str = "package.json";

/// Path of the manifest inside a project directory
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILENAME)
}

/// Load the declared dependencies from a package.json path
pub fn load_manifest(path: &Path) -> Result<DeclaredDependencies, ManifestError> {
    if !path.is_file() {
        return Err(ManifestError::not_found(path));
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;

    PackageJsonParser.parse(&content).map_err(|e| match e {
        ManifestError::JsonParseError { message, .. } => {
            ManifestError::json_parse_error(path, message)
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_path() {
        assert_eq!(
            manifest_path(Path::new("/project")),
            PathBuf::from("/project/package.json")
        );
    }

    #[test]
    fn test_load_manifest() {
        let dir = TempDir::new().unwrap();
        let path = manifest_path(dir.path());
        fs::write(&path, r#"{ "dependencies": { "lodash": "^4.0.0" } }"#).unwrap();

        let declared = load_manifest(&path).unwrap();
        assert_eq!(declared.range("lodash"), Some("^4.0.0"));
    }

    #[test]
    fn test_load_manifest_not_found() {
        let dir = TempDir::new().unwrap();
        let result = load_manifest(&manifest_path(dir.path()));
        assert!(matches!(result, Err(ManifestError::NotFound { .. })));
    }

    #[test]
    fn test_load_manifest_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("package.json")).unwrap();

        let result = load_manifest(&manifest_path(dir.path()));
        assert!(matches!(result, Err(ManifestError::NotFound { .. })));
    }

    #[test]
    fn test_load_manifest_parse_error_carries_path() {
        let dir = TempDir::new().unwrap();
        let path = manifest_path(dir.path());
        fs::write(&path, "not json").unwrap();

        match load_manifest(&path) {
            Err(ManifestError::JsonParseError { path: err_path, .. }) => {
                assert_eq!(err_path, path)
            }
            other => panic!("expected JsonParseError, got {:?}", other),
        }
    }
}
