//! pcheck - npm dependency audit CLI tool
//!
//! Reports installed packages missing from package.json and installed
//! packages that are behind their latest published version.

use clap::Parser;
use pcheck::cli::CliArgs;
use pcheck::logging;
use pcheck::orchestrator::{AuditConfig, Orchestrator};
use pcheck::output::OutputConfig;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init(args.verbose);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        path = %args.path.display(),
        registry = %args.registry,
        "starting pcheck"
    );

    let result = match Orchestrator::new(AuditConfig::from_cli(&args)) {
        Ok(orchestrator) => orchestrator.run().await,
        Err(e) => Err(e),
    };

    let reporter = OutputConfig::from_cli(args.no_color).reporter();
    let mut stdout = io::stdout().lock();

    // Warnings never change the exit status; only fatal errors do
    let exit_code = match result {
        Ok(report) => {
            reporter.report(&report, &mut stdout)?;
            ExitCode::SUCCESS
        }
        Err(e) => {
            reporter.fatal(&e, &mut stdout)?;
            ExitCode::FAILURE
        }
    };

    stdout.flush()?;
    Ok(exit_code)
}
