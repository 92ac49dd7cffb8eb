//! CLI argument parsing module for pcheck

use crate::audit::DEFAULT_CONCURRENCY;
use crate::error::ConfigError;
use crate::registry::NPM_REGISTRY_URL;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parse duration string in format: Nms (milliseconds), Ns (seconds), Nm (minutes)
fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration {
        value: s.to_string(),
    };

    let trimmed = s.trim();
    let (num_str, millis_per_unit) = if let Some(n) = trimmed.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = trimmed.strip_suffix('s') {
        (n, 1000)
    } else if let Some(n) = trimmed.strip_suffix('m') {
        (n, 60 * 1000)
    } else {
        return Err(invalid());
    };

    let num: u64 = num_str.parse().map_err(|_| invalid())?;
    if num == 0 {
        return Err(invalid());
    }

    Ok(Duration::from_millis(num * millis_per_unit))
}

/// Parse a concurrency limit, which must be at least 1
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if value == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    Ok(value)
}

/// Check installed npm packages against package.json and the registry
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pcheck",
    version,
    about = "Check installed npm packages against package.json and the registry"
)]
pub struct CliArgs {
    /// Project directory containing package.json (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Registry used to look up the latest versions
    #[arg(long, default_value = NPM_REGISTRY_URL)]
    pub registry: String,

    /// Maximum number of registry lookups in flight
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    pub concurrency: usize,

    /// Per-request timeout (e.g., 30s, 2m, 500ms); no timeout by default
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// npm executable used to list installed packages
    #[arg(long, default_value = "npm")]
    pub npm: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose diagnostics on stderr
    #[arg(long)]
    pub verbose: bool,
}
