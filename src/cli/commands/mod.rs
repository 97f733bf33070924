//! CLI commands module

pub mod check;
pub mod dump;
pub mod generate_man;
pub mod normalize;

use clap::Args;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::ConfigDocument;
use crate::error::KeepRulesError;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Only print the totals, not every rule
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the dump command
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Output format (json, terminal)
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the normalize command
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Class names or filters in external form
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,

    /// Treat each argument as a comma-separated filter and print one pattern per line
    #[arg(long)]
    pub filter: bool,
}

/// Arguments for the generate-man command
#[derive(Args, Debug)]
pub struct GenerateManArgs {
    /// Output directory for the man page
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// Output format for the dump command
#[derive(Debug, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// Load the document named on the command line, or the default one
pub(crate) fn load_document(path: Option<&Path>) -> Result<ConfigDocument, KeepRulesError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration document");
            ConfigDocument::load_from_file(path)
        }
        None => ConfigDocument::load_or_default(),
    }
}
