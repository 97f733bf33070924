//! JSON output formatting

use serde::Serialize;

use super::ConfigurationRenderer;
use crate::configuration::Configuration;
use crate::error::{KeepRulesError, OutputError};

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct DumpOutput<'a> {
    version: &'static str,
    rule_count: usize,
    configuration: &'a Configuration,
}

impl ConfigurationRenderer for JsonOutput {
    fn render_configuration(&self, config: &Configuration) -> Result<String, KeepRulesError> {
        let output = DumpOutput {
            version: env!("CARGO_PKG_VERSION"),
            rule_count: config.rules().total(),
            configuration: config,
        };

        serde_json::to_string_pretty(&output)
            .map_err(|e| KeepRulesError::Output(OutputError::Json(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classpath::{FilterMap, Resource};
    use crate::configurator::Configurator;
    use crate::rules::{Attributes, RuleCategory, UnsupportedParser};

    #[test]
    fn test_render_configuration() {
        let mut configurator = Configurator::new(UnsupportedParser);
        configurator
            .keep(Some(&Attributes::new().with("name", "com.example.Main")))
            .unwrap();
        let filter = FilterMap::new().with("jarfilter", "!**.jar");
        configurator.library_jars(Resource::path("libs/rt.jar"), Some(filter.clone()));
        filter.insert("filter", "java/**");

        let json = JsonOutput::new()
            .render_configuration(configurator.configuration())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["rule_count"], 1);
        let keep = &value["configuration"]["rules"][RuleCategory::Keep.name()];
        assert_eq!(keep[0]["name_pattern"], "com/example/Main");
        let library = &value["configuration"]["library_jars"][0];
        assert_eq!(library["filter"]["filter"], "java/**");
    }
}
