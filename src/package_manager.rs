//! Package manager integration for resolving what is actually installed
//!
//! This module provides:
//! - A resolver trait so the audit can run against any installed-set source
//! - The system resolver that shells out to `npm ls --json`
//! - Parsing of the `npm ls --json` dependency tree (first level only)

use crate::domain::InstalledPackages;
use crate::error::InstalledError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

/// Default npm executable
const DEFAULT_NPM_PROGRAM: &str = "npm";

/// Arguments passed to npm to list the dependency tree
const NPM_LS_ARGS: [&str; 2] = ["ls", "--json"];

/// Trait for resolving the installed first-level packages of a project
pub trait InstalledResolver {
    /// Resolve installed packages in the specified directory
    ///
    /// Fails with `InstalledError::MissingDependencies` when any declared
    /// first-level package is absent.
    fn resolve(&self, working_dir: &Path) -> Result<InstalledPackages, InstalledError>;
}

/// Default resolver that runs `npm ls --json`
#[derive(Debug, Clone)]
pub struct NpmResolver {
    program: String,
}

impl NpmResolver {
    /// Create a resolver using `npm` from PATH
    pub fn new() -> Self {
        Self::with_program(DEFAULT_NPM_PROGRAM)
    }

    /// Create a resolver using a specific npm executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The command line shown in logs and errors
    pub fn command_line(&self) -> String {
        format!("{} {}", self.program, NPM_LS_ARGS.join(" "))
    }

    fn run_command(&self, working_dir: &Path) -> std::io::Result<Output> {
        Command::new(&self.program)
            .args(NPM_LS_ARGS)
            .current_dir(working_dir)
            .output()
    }
}

impl Default for NpmResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl InstalledResolver for NpmResolver {
    fn resolve(&self, working_dir: &Path) -> Result<InstalledPackages, InstalledError> {
        let command = self.command_line();
        debug!(command = %command, dir = %working_dir.display(), "listing installed packages");

        let output = self
            .run_command(working_dir)
            .map_err(|e| InstalledError::command_failed(&command, e))?;

        // npm ls exits non-zero when packages are missing but still prints the tree
        if !output.status.success() {
            debug!(command = %command, status = %output.status, "npm ls reported problems");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_npm_ls(&stdout, &command)
    }
}

/// `npm ls --json` document, first level only
#[derive(Debug, Deserialize)]
struct NpmLsOutput {
    #[serde(default)]
    dependencies: BTreeMap<String, NpmLsEntry>,
}

#[derive(Debug, Deserialize)]
struct NpmLsEntry {
    version: Option<String>,
    #[serde(default)]
    missing: bool,
}

/// Parse the output of `npm ls --json` produced by `command`
pub fn parse_npm_ls(json: &str, command: &str) -> Result<InstalledPackages, InstalledError> {
    let tree: NpmLsOutput = serde_json::from_str(json)
        .map_err(|e| InstalledError::invalid_output(command, e.to_string()))?;

    let mut installed = InstalledPackages::new();
    let mut missing = Vec::new();

    for (name, entry) in tree.dependencies {
        match entry.version {
            Some(version) if !entry.missing => installed.insert(name, version),
            _ => missing.push(name),
        }
    }

    if !missing.is_empty() {
        return Err(InstalledError::missing(missing));
    }

    Ok(installed)
}
