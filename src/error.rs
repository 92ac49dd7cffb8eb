//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues reading or parsing package.json
//! - InstalledError: Issues resolving the installed package set
//! - RegistryError: Issues with npm registry communication
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Installed package resolution errors
    #[error(transparent)]
    Installed(#[from] InstalledError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to the package.json manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },
}

/// Errors related to resolving what is actually installed
#[derive(Error, Debug)]
pub enum InstalledError {
    /// Declared packages are not present on disk
    #[error("the following packages are not installed: {}", .packages.join(", "))]
    MissingDependencies { packages: Vec<String> },

    /// The package manager could not be started
    #[error("failed to run '{command}': {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The package manager printed something that is not a dependency tree
    #[error("failed to parse output of '{command}': {message}")]
    InvalidOutput { command: String, message: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid duration format
    #[error("invalid duration format '{value}': expected format like '30s', '2m', '500ms'")]
    InvalidDuration { value: String },

    /// Invalid registry URL
    #[error("invalid registry URL '{value}': {message}")]
    InvalidRegistry { value: String, message: String },

    /// Failed to build the HTTP client
    #[error("failed to create HTTP client: {message}")]
    HttpClient { message: String },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl InstalledError {
    /// Creates a new MissingDependencies error
    pub fn missing(packages: Vec<String>) -> Self {
        InstalledError::MissingDependencies { packages }
    }

    /// Creates a new CommandFailed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        InstalledError::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Creates a new InvalidOutput error
    pub fn invalid_output(command: impl Into<String>, message: impl Into<String>) -> Self {
        InstalledError::InvalidOutput {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new InvalidRegistry error
    pub fn invalid_registry(value: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidRegistry {
            value: value.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}
