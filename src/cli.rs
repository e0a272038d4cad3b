//! CLI argument parsing module for uppd

use crate::domain::Operator;
use crate::update::UpdateFilter;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Parse a comparison operator from an argument value
fn parse_operator(s: &str) -> Result<Operator, String> {
    Operator::parse(s.trim()).ok_or_else(|| format!("unknown operator: {}", s))
}

/// Python dependency pin updater
#[derive(Parser, Debug, Clone)]
#[command(
    name = "uppd",
    version,
    about = "Update pinned dependency versions in pyproject.toml"
)]
pub struct CliArgs {
    /// Input pyproject.toml files (can be specified multiple times)
    #[arg(short, long, action = ArgAction::Append, default_value = "pyproject.toml")]
    pub infile: Vec<PathBuf>,

    /// Output files, paired with input files by position (default: in place)
    #[arg(short, long, action = ArgAction::Append)]
    pub outfile: Vec<PathBuf>,

    /// Specifier operators eligible for rewriting
    #[arg(
        short,
        long,
        action = ArgAction::Append,
        value_parser = parse_operator,
        default_values = ["==", "<=", "~="]
    )]
    pub match_operators: Vec<Operator>,

    /// Packages to leave untouched (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub skip: Vec<String>,

    /// Packages allowed to upgrade to dev releases ("*" for all)
    #[arg(long, action = ArgAction::Append)]
    pub dev: Vec<String>,

    /// Packages allowed to upgrade to pre-releases ("*" for all)
    #[arg(long, action = ArgAction::Append)]
    pub pre: Vec<String>,

    /// Packages allowed to upgrade to post-releases ("*" for all)
    #[arg(long, action = ArgAction::Append, default_value = "*")]
    pub post: Vec<String>,

    /// Dry run mode - show what would be updated without writing files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Base URL of the package index
    #[arg(long, default_value = "https://pypi.org")]
    pub index_url: String,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Build the upgrade filter from the parsed arguments
    pub fn build_filter(&self) -> UpdateFilter {
        UpdateFilter::new()
            .with_match_operators(self.match_operators.clone())
            .with_skip(self.skip.clone())
            .with_dev(self.dev.clone())
            .with_pre(self.pre.clone())
            .with_post(self.post.clone())
    }
}
