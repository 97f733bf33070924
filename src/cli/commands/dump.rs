//! Dump command - Emit the configuration for the processing engine

use colored::Colorize;
use std::path::Path;

use super::{load_document, DumpArgs, OutputFormat};
use crate::cli::exit_codes;
use crate::cli::output::{ConfigurationRenderer, JsonOutput, TerminalOutput};
use crate::error::{ConfigError, KeepRulesError, OutputError};
use crate::rules::UnsupportedParser;

pub fn execute(args: DumpArgs, config_path: Option<&Path>) -> Result<i32, KeepRulesError> {
    let document = load_document(config_path)?;

    let configuration = match document.build(UnsupportedParser) {
        Ok(configuration) => configuration,
        Err(e @ ConfigError::RuleRejected { .. }) => {
            eprintln!("{} {}", "Invalid rule:".red().bold(), e);
            return Ok(exit_codes::INVALID_RULES);
        }
        Err(e) => return Err(e.into()),
    };

    let renderer: Box<dyn ConfigurationRenderer> = match args.format {
        OutputFormat::Json => Box::new(JsonOutput::new()),
        OutputFormat::Terminal => Box::new(TerminalOutput::new(true)),
    };
    let rendered = renderer.render_configuration(&configuration)?;

    match args.output {
        Some(output_path) => {
            std::fs::write(&output_path, &rendered).map_err(|e| {
                KeepRulesError::Output(OutputError::FileWrite {
                    path: output_path.display().to_string(),
                    source: e,
                })
            })?;
            eprintln!(
                "{} Configuration written to: {}",
                "Success:".green().bold(),
                output_path.display().to_string().cyan()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(exit_codes::SUCCESS)
}
