//! Line-oriented text output
//!
//! Every message is one line on stdout prefixed with `ERROR:` or `WARN:`.
//! Empty results print nothing.

use crate::domain::{ConfigDrift, LookupFailure, UpdateResult};
use crate::error::{AppError, InstalledError, ManifestError};
use crate::orchestrator::AuditReport;
use colored::Colorize;
use std::io::{self, Write};

/// Text formatter for audit results
pub struct TextReporter {
    /// Whether to use colors
    color: bool,
}

impl TextReporter {
    /// Create a new text reporter
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn error_tag(&self) -> String {
        if self.color {
            "ERROR:".red().bold().to_string()
        } else {
            "ERROR:".to_string()
        }
    }

    fn warn_tag(&self) -> String {
        if self.color {
            "WARN:".yellow().bold().to_string()
        } else {
            "WARN:".to_string()
        }
    }

    /// Write the whole audit: drift, lookup failures, then outdated packages
    pub fn report(&self, report: &AuditReport, writer: &mut dyn Write) -> io::Result<()> {
        if let Some(drift) = &report.drift {
            self.drift(drift, writer)?;
        }
        self.failures(&report.freshness.failures, writer)?;
        if let Some(updates) = report.freshness.outdated() {
            self.updates(updates, writer)?;
        }
        Ok(())
    }

    /// Installed packages missing from package.json
    pub fn drift(&self, drift: &ConfigDrift, writer: &mut dyn Write) -> io::Result<()> {
        let names: Vec<&str> = drift.packages().collect();
        writeln!(
            writer,
            "{} The following packages are installed, but do not exist in package.json: {}",
            self.warn_tag(),
            names.join(", ")
        )
    }

    /// One line per outdated package
    pub fn updates(&self, updates: &[UpdateResult], writer: &mut dyn Write) -> io::Result<()> {
        for update in updates {
            writeln!(
                writer,
                "{} Package: {}, installed version: {}, latest available version: {}",
                self.warn_tag(),
                update.name,
                update.installed_version,
                update.available_version
            )?;
        }
        Ok(())
    }

    /// One line per failed lookup
    pub fn failures(&self, failures: &[LookupFailure], writer: &mut dyn Write) -> io::Result<()> {
        for failure in failures {
            writeln!(
                writer,
                "{} Failed to check package version for {}",
                self.error_tag(),
                failure.name
            )?;
        }
        Ok(())
    }

    /// Fatal errors that stop the audit before any check runs
    pub fn fatal(&self, error: &AppError, writer: &mut dyn Write) -> io::Result<()> {
        match error {
            AppError::Manifest(ManifestError::NotFound { .. }) => writeln!(
                writer,
                "{} No package.json file exists in this directory",
                self.error_tag()
            ),
            AppError::Installed(InstalledError::MissingDependencies { packages }) => {
                writeln!(
                    writer,
                    "{} The following packages are not installed: {}",
                    self.error_tag(),
                    packages.join(", ")
                )?;
                writeln!(
                    writer,
                    "{} Please run npm install before using pcheck",
                    self.error_tag()
                )
            }
            other => writeln!(writer, "{} {}", self.error_tag(), other),
        }
    }
}
