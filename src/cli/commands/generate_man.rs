//! Generate man page command

use crate::cli::exit_codes;
use crate::cli::Cli;
use crate::error::{KeepRulesError, OutputError};
use clap::CommandFactory;
use std::fs;

use super::GenerateManArgs;

/// Execute the generate-man command
pub fn execute(args: GenerateManArgs) -> Result<i32, KeepRulesError> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);

    let output_path = args.output.join("keeprules.1");

    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer).map_err(|e| {
        KeepRulesError::Output(OutputError::ManPage(e.to_string()))
    })?;

    fs::write(&output_path, buffer).map_err(|e| {
        KeepRulesError::Output(OutputError::FileWrite {
            path: output_path.display().to_string(),
            source: e,
        })
    })?;

    println!("Man page generated: {}", output_path.display());

    Ok(exit_codes::SUCCESS)
}
