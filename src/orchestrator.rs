//! Orchestrator for the upgrade workflow
//!
//! Loads each manifest, upgrades its dependency groups in concurrent
//! batches, writes results back, and aggregates per-requirement
//! failures without aborting the run.

use crate::cli::CliArgs;
use crate::error::{AppError, ConfigError, ManifestError};
use crate::manifest::Pyproject;
use crate::progress::Progress;
use crate::registry::{HttpClient, PackageIndex, PyPiIndex};
use crate::update::{ChangeReporter, ConsoleReporter, NullReporter, Upgrader};
use std::sync::Arc;

/// Coordinates manifest processing
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Package index adapter
    index: Arc<dyn PackageIndex>,
    /// Change notification sink
    reporter: Arc<dyn ChangeReporter>,
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct RunSummary {
    /// Number of manifest files processed
    pub files_processed: usize,
    /// Number of rewritten requirements across all files
    pub changes: usize,
    /// Per-requirement failure descriptions
    pub errors: Vec<String>,
}

impl Orchestrator {
    /// Create an orchestrator from CLI arguments
    pub fn new(args: CliArgs) -> Result<Self, AppError> {
        reqwest::Url::parse(&args.index_url).map_err(|e| ConfigError::InvalidIndexUrl {
            url: args.index_url.clone(),
            message: e.to_string(),
        })?;

        let client = HttpClient::new()?;
        let index: Arc<dyn PackageIndex> =
            Arc::new(PyPiIndex::with_base_url(client, &args.index_url));
        let reporter: Arc<dyn ChangeReporter> = if args.quiet {
            Arc::new(NullReporter::new())
        } else {
            Arc::new(ConsoleReporter::new())
        };
        Ok(Self {
            args,
            index,
            reporter,
        })
    }

    /// Create an orchestrator with a custom index adapter (for testing)
    pub fn with_index(args: CliArgs, index: Arc<dyn PackageIndex>) -> Self {
        let reporter: Arc<dyn ChangeReporter> = if args.quiet {
            Arc::new(NullReporter::new())
        } else {
            Arc::new(ConsoleReporter::new())
        };
        Self {
            args,
            index,
            reporter,
        }
    }

    /// Run the upgrade workflow
    pub async fn run(&self) -> Result<RunSummary, AppError> {
        if self.args.outfile.len() > self.args.infile.len() {
            return Err(ConfigError::TooManyOutputFiles {
                outfiles: self.args.outfile.len(),
                infiles: self.args.infile.len(),
            }
            .into());
        }

        let upgrader = Arc::new(Upgrader::new(
            Arc::clone(&self.index),
            self.args.build_filter(),
        ));

        let mut summary = RunSummary {
            files_processed: 0,
            changes: 0,
            errors: Vec::new(),
        };
        let mut progress = Progress::new(!self.args.quiet);

        for (position, infile) in self.args.infile.iter().enumerate() {
            // Extra inputs without a paired output are written in place
            let outfile = self.args.outfile.get(position).unwrap_or(infile);

            let mut manifest = Pyproject::load(infile)?;

            progress.spinner(&format!("Checking {}", infile.display()));
            let mut sections =
                vec![("[project.dependencies]".to_string(), manifest.dependencies())];
            for (group, entries) in manifest.optional_dependencies() {
                sections.push((
                    format!("[project.optional-dependencies.{}]", group),
                    entries,
                ));
            }

            let mut upgraded_sections = Vec::with_capacity(sections.len());
            for (heading, entries) in sections {
                let outcome = upgrader.upgrade_all(&entries).await;
                upgraded_sections.push((heading, entries, outcome));
            }
            progress.finish_and_clear();

            for (heading, entries, outcome) in upgraded_sections {
                let mut announced = false;
                for error in &outcome.errors {
                    summary
                        .errors
                        .push(format!("{}: {}", error.input, error.error));
                }
                for (original, upgraded) in entries.iter().zip(&outcome.requirements) {
                    if original == upgraded {
                        continue;
                    }
                    if !announced {
                        self.reporter.section(&heading);
                        announced = true;
                    }
                    self.reporter.report(original, upgraded);
                    if manifest.replace_requirement(original, upgraded) {
                        summary.changes += 1;
                    } else {
                        summary.errors.push(
                            ManifestError::RequirementNotFound {
                                path: infile.clone(),
                                requirement: original.clone(),
                            }
                            .to_string(),
                        );
                    }
                }
            }

            if !self.args.dry_run {
                manifest.write_to(outfile)?;
            }
            summary.files_processed += 1;
        }

        Ok(summary)
    }
}
