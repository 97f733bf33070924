//! # CLI Module
//!
//! This module defines the command-line interface for keeprules using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `check` | Apply a configuration document and summarize the result |
//! | `dump` | Apply a configuration document and emit the configuration |
//! | `normalize` | Print the internal form of class names and filters |
//!
//! ## Submodules
//!
//! - [`commands`] - Command implementations
//! - [`exit_codes`] - Standardized exit codes
//! - [`output`] - Configuration output formatters (JSON, Terminal)
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `-c, --config <FILE>` - Path to the configuration document
//!
//! ## Examples
//!
//! ```bash
//! # Validate keeprules.toml in the current directory
//! keeprules check
//!
//! # Emit the configuration for the processing engine
//! keeprules dump --format json -o build/keeprules.json
//!
//! # Show internal name forms
//! keeprules normalize com.example.Main java.lang.String[]
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{CheckArgs, DumpArgs, GenerateManArgs, NormalizeArgs};

/// keeprules - Accumulate shrinker keep rules and settings from build configuration
#[derive(Parser, Debug)]
#[command(name = "keeprules")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration document (defaults to ./keeprules.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a configuration document and print a summary
    Check(CheckArgs),

    /// Apply a configuration document and emit the resulting configuration
    Dump(DumpArgs),

    /// Print the internal form of class names or name filters
    Normalize(NormalizeArgs),

    /// Generate man page (hidden, for packaging)
    #[command(hide = true)]
    GenerateMan(GenerateManArgs),
}
