//! Check command - Apply a configuration document and summarize it

use colored::Colorize;
use std::path::Path;

use super::{load_document, CheckArgs};
use crate::cli::exit_codes;
use crate::cli::output::{ConfigurationRenderer, TerminalOutput};
use crate::error::{ConfigError, KeepRulesError};
use crate::rules::UnsupportedParser;

pub fn execute(args: CheckArgs, config_path: Option<&Path>) -> Result<i32, KeepRulesError> {
    let document = load_document(config_path)?;

    let configuration = match document.build(UnsupportedParser) {
        Ok(configuration) => configuration,
        Err(e @ ConfigError::RuleRejected { .. }) => {
            eprintln!("{} {}", "Invalid rule:".red().bold(), e);
            return Ok(exit_codes::INVALID_RULES);
        }
        Err(e) => return Err(e.into()),
    };

    let renderer = TerminalOutput::new(!args.quiet);
    print!("{}", renderer.render_configuration(&configuration)?);

    println!(
        "\n{} {} rule(s) accumulated.",
        "Success:".green().bold(),
        configuration.rules().total()
    );

    Ok(exit_codes::SUCCESS)
}
