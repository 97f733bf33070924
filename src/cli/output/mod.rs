//! Output formatting module for CLI

pub mod json;
mod terminal;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

use crate::configuration::Configuration;
use crate::error::KeepRulesError;

/// Trait for rendering a finished configuration
pub trait ConfigurationRenderer {
    fn render_configuration(&self, config: &Configuration) -> Result<String, KeepRulesError>;
}
