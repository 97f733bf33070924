//! Terminal output formatting with colors

use colored::Colorize;

use super::ConfigurationRenderer;
use crate::classpath::FilteredEntry;
use crate::configuration::{Configuration, ResourceRole};
use crate::error::KeepRulesError;
use crate::rules::RuleCategory;
use crate::settings::{FilterState, NameSetting};

pub struct TerminalOutput {
    detailed: bool,
}

impl TerminalOutput {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }

    fn format_header(&self) -> String {
        format!(
            "\n{} v{}\n",
            "keeprules".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        )
    }

    fn section(title: &str) -> String {
        format!("\n{}\n{}\n\n", "━".repeat(50).dimmed(), title.bold())
    }

    fn format_rules(&self, config: &Configuration) -> String {
        let mut output = Self::section("  RULES");
        let rules = config.rules();

        if rules.total() == 0 {
            output.push_str(&format!("  {}\n", "No rules.".dimmed()));
            return output;
        }

        for category in RuleCategory::ALL {
            let Some(list) = rules.get(category) else {
                continue;
            };
            output.push_str(&format!(
                "  {} ({})\n",
                category.name().cyan(),
                list.len()
            ));
            if self.detailed {
                for spec in list.to_vec() {
                    let members = if spec.members.is_empty() {
                        String::new()
                    } else {
                        format!(" {{{} member(s)}}", spec.members.len())
                    };
                    output.push_str(&format!(
                        "      {} {}{}\n",
                        "└─".dimmed(),
                        spec.label(),
                        members.dimmed()
                    ));
                }
            }
        }

        output
    }

    fn format_entry(entry: &FilteredEntry) -> String {
        let mut line = format!("  {} {}", "•".dimmed(), entry.resource);
        if let Some(filter) = &entry.filter {
            let parts: Vec<String> = filter
                .snapshot()
                .into_iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            if !parts.is_empty() {
                line.push_str(&format!(" ({})", parts.join("; ").dimmed()));
            }
        }
        line.push('\n');
        line
    }

    fn format_resources(&self, config: &Configuration) -> String {
        let mut output = Self::section("  RESOURCES");

        for role in ResourceRole::ALL {
            let list = config.resources(role);
            output.push_str(&format!("  {} ({})\n", role.name().cyan(), list.len()));
            if self.detailed {
                for entry in list.entries() {
                    output.push_str(&Self::format_entry(entry));
                }
            }
        }

        output
    }

    fn format_names(&self, config: &Configuration) -> String {
        let mut output = Self::section("  NAMES");
        let names = config.names();
        let mut empty = true;

        for (setting, filter) in names.enabled_filters() {
            empty = false;
            let value = match filter.state() {
                FilterState::Patterns(patterns) => patterns.join(","),
                _ => "*".to_string(),
            };
            output.push_str(&format!("  {} {}\n", setting.name().cyan(), value));
        }

        for setting in NameSetting::ALL {
            if let Some(name) = config.name(setting) {
                empty = false;
                let name = if name.is_empty() { "<root>" } else { name };
                output.push_str(&format!("  {} {}\n", setting.name().cyan(), name));
            }
        }

        if empty {
            output.push_str(&format!("  {}\n", "No name settings.".dimmed()));
        }

        output
    }

    fn format_flags(&self, config: &Configuration) -> String {
        let mut output = Self::section("  PHASES");
        let flags = config.flags();

        for (phase, enabled) in [
            ("shrink", flags.shrink),
            ("optimize", flags.optimize),
            ("obfuscate", flags.obfuscate),
            ("preverify", flags.preverify),
        ] {
            let state = if enabled { "on".green() } else { "off".red() };
            output.push_str(&format!("  {:<10} {}\n", phase, state));
        }
        if flags.optimize {
            output.push_str(&format!(
                "  {:<10} {}\n",
                "passes",
                flags.optimization_passes
            ));
        }

        output
    }
}

impl ConfigurationRenderer for TerminalOutput {
    fn render_configuration(&self, config: &Configuration) -> Result<String, KeepRulesError> {
        let mut output = String::new();

        output.push_str(&self.format_header());
        output.push_str(&self.format_rules(config));
        output.push_str(&self.format_resources(config));
        output.push_str(&self.format_names(config));
        output.push_str(&self.format_flags(config));

        Ok(output)
    }
}
