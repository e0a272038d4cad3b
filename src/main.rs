//! uppd - Python dependency pin updater CLI tool
//!
//! Reads pyproject.toml files, queries the package index for the
//! latest eligible release of each dependency, and rewrites pinned
//! version specifiers in place.

use clap::Parser;
use std::process::ExitCode;
use uppd::cli::CliArgs;
use uppd::orchestrator::Orchestrator;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

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
    if args.verbose {
        eprintln!("uppd v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Index: {}", args.index_url);
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let orchestrator = Orchestrator::new(args.clone())?;
    let summary = orchestrator.run().await?;

    if args.verbose {
        eprintln!();
        eprintln!(
            "Processed {} file(s), {} requirement(s) updated",
            summary.files_processed, summary.changes
        );
    }

    if !summary.errors.is_empty() {
        eprintln!();
        eprintln!("Errors encountered:");
        for error in &summary.errors {
            eprintln!("  - {}", error);
        }
        // Partial success - some requirements could not be upgraded
        return Ok(ExitCode::from(2));
    }

    Ok(ExitCode::SUCCESS)
}
