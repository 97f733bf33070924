//! Configuration document loader

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::classpath::{FilterMap, Resource, ResourceRef};
use crate::configuration::{Configuration, ResourceRole};
use crate::configurator::Configurator;
use crate::error::{ConfigError, KeepRulesError, RuleError};
use crate::rules::{MemberBlock, RuleCategory, RuleParser};
use crate::settings::{FilterSetting, Flags, NameSetting};

use super::{MemberEntry, MemberEntryKind, NameValue, ResourceEntry, RuleEntry};

pub const CONFIG_FILENAME: &str = "keeprules.toml";

/// A complete configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Scalar flags; omitted keys keep their defaults
    #[serde(default)]
    pub flags: Flags,

    /// Name filters and single names, keyed by setting name.
    ///
    /// Every key addresses a different setting, so applying them key by key
    /// gives the same result as document order.
    #[serde(default)]
    pub names: BTreeMap<String, NameValue>,

    /// Program inputs
    #[serde(default)]
    pub injars: Vec<ResourceEntry>,

    /// Program outputs
    #[serde(default)]
    pub outjars: Vec<ResourceEntry>,

    /// Library resources
    #[serde(default)]
    pub library_jars: Vec<ResourceEntry>,

    /// Rules, applied in document order
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

impl ConfigDocument {
    /// Load the document from the working directory, or an empty one
    pub fn load_or_default() -> Result<Self, KeepRulesError> {
        let config_path = Path::new(CONFIG_FILENAME);

        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            debug!("No {} found, using an empty document", CONFIG_FILENAME);
            Ok(Self::default())
        }
    }

    /// Load the document from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, KeepRulesError> {
        let content = fs::read_to_string(path).map_err(|e| {
            KeepRulesError::Config(ConfigError::FileRead {
                path: path.display().to_string(),
                source: e,
            })
        })?;

        Self::parse(&content)
    }

    /// Decode a document from TOML text
    pub fn parse(content: &str) -> Result<Self, KeepRulesError> {
        toml::from_str(content).map_err(Into::into)
    }

    /// Serialize the document to TOML
    pub fn to_toml(&self) -> Result<String, KeepRulesError> {
        toml::to_string_pretty(self).map_err(Into::into)
    }

    /// Apply every entry to `configurator`, in document order.
    ///
    /// Stops at the first failing entry. Entries applied before it stay
    /// applied.
    pub fn apply_to(&self, configurator: &mut Configurator) -> Result<(), ConfigError> {
        info!(
            rules = self.rules.len(),
            names = self.names.len(),
            "Applying configuration document"
        );

        check_name_keys(&self.names)?;
        *configurator.flags() = self.flags.clone();

        for (key, value) in &self.names {
            apply_name(configurator, key, value)?;
        }

        let sections = [
            ("injars", ResourceRole::InJars, &self.injars),
            ("outjars", ResourceRole::OutJars, &self.outjars),
            ("library_jars", ResourceRole::LibraryJars, &self.library_jars),
        ];
        for (section, role, entries) in sections {
            for (index, entry) in entries.iter().enumerate() {
                let resource = entry_resource(section, index, entry)?;
                configurator.resource(role, resource, entry_filter(entry));
            }
        }

        for (index, entry) in self.rules.iter().enumerate() {
            apply_rule(configurator, index, entry)?;
        }

        Ok(())
    }

    /// Build a fresh configuration from this document
    pub fn build(&self, parser: impl RuleParser + 'static) -> Result<Configuration, ConfigError> {
        let mut configurator = Configurator::new(parser);
        self.apply_to(&mut configurator)?;
        Ok(configurator.into_configuration())
    }
}

/// Setting name a `[names]` key refers to; `_` and `-` are interchangeable
fn setting_key(key: &str) -> String {
    key.trim().replace('_', "-")
}

/// Reject two spellings of the same setting
fn check_name_keys(names: &BTreeMap<String, NameValue>) -> Result<(), ConfigError> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for key in names.keys() {
        if let Some(first) = seen.insert(setting_key(key), key) {
            return Err(ConfigError::InvalidName {
                key: key.clone(),
                message: format!("same setting as '{first}'"),
            });
        }
    }
    Ok(())
}

fn apply_name(
    configurator: &mut Configurator,
    raw_key: &str,
    value: &NameValue,
) -> Result<(), ConfigError> {
    let key = setting_key(raw_key);

    if let Some(setting) = FilterSetting::ALL.into_iter().find(|s| s.name() == key) {
        let filter = configurator.filter(setting);
        match value {
            NameValue::Switch(true) => filter.enable_default(),
            NameValue::Switch(false) => {}
            NameValue::One(pattern) => filter.set_pattern(Some(pattern)),
            NameValue::Many(patterns) => {
                for pattern in patterns {
                    filter.set_pattern(Some(pattern));
                }
            }
        }
        return Ok(());
    }

    let Some(setting) = NameSetting::ALL.into_iter().find(|s| s.name() == key) else {
        return Err(ConfigError::InvalidName {
            key: raw_key.to_string(),
            message: "unknown name setting".to_string(),
        });
    };

    let name = match value {
        NameValue::Switch(false) => return Ok(()),
        NameValue::Switch(true) => None,
        NameValue::One(name) => Some(name.as_str()),
        NameValue::Many(_) => {
            return Err(ConfigError::InvalidName {
                key: raw_key.to_string(),
                message: "takes a single name, not a list".to_string(),
            })
        }
    };
    match setting {
        NameSetting::FlattenPackageHierarchy => configurator.flatten_package_hierarchy(name),
        NameSetting::RepackageClasses => configurator.repackage_classes(name),
    }
    Ok(())
}

fn entry_resource(
    section: &'static str,
    index: usize,
    entry: &ResourceEntry,
) -> Result<ResourceRef, ConfigError> {
    match (&entry.path, &entry.descriptor, &entry.paths) {
        (Some(path), None, None) => Ok(Resource::path(path.clone())),
        (None, Some(descriptor), None) => Ok(Resource::descriptor(descriptor.clone())),
        (None, None, Some(paths)) => Ok(Resource::aggregate(
            paths.iter().cloned().map(Resource::path),
        )),
        _ => Err(ConfigError::InvalidEntry {
            section,
            index,
            message: "exactly one of 'path', 'descriptor' or 'paths' is required".to_string(),
        }),
    }
}

fn entry_filter(entry: &ResourceEntry) -> Option<FilterMap> {
    entry
        .filter
        .as_ref()
        .map(|filter| filter.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
}

fn apply_rule(
    configurator: &mut Configurator,
    index: usize,
    entry: &RuleEntry,
) -> Result<(), ConfigError> {
    let category: RuleCategory = entry.category.parse()?;

    let result = match (&entry.text, &entry.attributes, &entry.members) {
        (Some(text), None, None) => configurator.rule_text(category, text),
        (Some(_), _, _) => {
            return Err(ConfigError::InvalidEntry {
                section: "rules",
                index,
                message: "'text' cannot be combined with 'attributes' or 'members'".to_string(),
            })
        }
        (None, attributes, None) => configurator.rule(category, attributes.as_ref()),
        (None, attributes, Some(members)) => configurator.rule_with_members(
            category,
            attributes.as_ref(),
            Some(|block: &mut MemberBlock| fill_members(block, members)),
        ),
    };

    result.map_err(|source| ConfigError::RuleRejected {
        index,
        category: category.name().to_string(),
        source,
    })
}

fn fill_members(block: &mut MemberBlock, members: &[MemberEntry]) -> Result<(), RuleError> {
    for member in members {
        let attributes = Some(&member.attributes);
        match member.kind {
            MemberEntryKind::Field => {
                block.field(attributes)?;
            }
            MemberEntryKind::Method => {
                block.method(attributes)?;
            }
            MemberEntryKind::Constructor => {
                block.constructor(attributes)?;
            }
            MemberEntryKind::All => {
                block.all();
            }
            MemberEntryKind::AllFields => {
                block.all_fields();
            }
            MemberEntryKind::AllMethods => {
                block.all_methods();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::UnsupportedParser;
    use crate::settings::FilterState;
    use pretty_assertions::assert_eq;

    const DOCUMENT: &str = r#"
[flags]
optimization_passes = 3
obfuscate = false

[names]
keep-package-names = "com.example.api"
dont-warn = ["javax.**", "kotlin.**"]
keep-attributes = true
repackage-classes = "com.example.internal"

[[injars]]
path = "build/classes"

[[library_jars]]
path = "libs/rt.jar"
filter = { jarfilter = "!**.jar", filter = "java/**" }

[[rules]]
category = "keep"
attributes = { access = "public", name = "com.example.Main" }
members = [
    { kind = "method", name = "main", parameters = "java.lang.String[]" },
]

[[rules]]
category = "keep-names"
"#;

    #[test]
    fn test_parse_document() {
        let doc = ConfigDocument::parse(DOCUMENT).unwrap();
        assert_eq!(doc.flags.optimization_passes, 3);
        assert!(doc.flags.shrink);
        assert_eq!(doc.rules.len(), 2);
        assert_eq!(doc.rules[0].members.as_ref().map(Vec::len), Some(1));
        assert!(doc.rules[1].attributes.is_none());
    }

    #[test]
    fn test_build_configuration() {
        let config = ConfigDocument::parse(DOCUMENT)
            .unwrap()
            .build(UnsupportedParser)
            .unwrap();

        assert!(!config.flags().obfuscate);
        assert_eq!(config.rules().count(RuleCategory::Keep), 1);
        assert_eq!(config.rules().count(RuleCategory::KeepNames), 1);
        assert_eq!(
            config.filter(FilterSetting::DontWarn).patterns(),
            ["javax/**", "kotlin/**"]
        );
        assert_eq!(
            config.filter(FilterSetting::KeepAttributes).state(),
            &FilterState::All
        );
        assert_eq!(
            config.name(NameSetting::RepackageClasses),
            Some("com/example/internal")
        );

        let libraries = config.resources(ResourceRole::LibraryJars);
        let filter = libraries.get(0).and_then(|e| e.filter.clone()).unwrap();
        assert_eq!(filter.get("jarfilter").as_deref(), Some("!**.jar"));
    }

    #[test]
    fn test_empty_members_selects_block_shape() {
        let doc = ConfigDocument::parse(
            "[[rules]]\ncategory = \"keep\"\nattributes = { name = \"a.B\" }\nmembers = []\n",
        )
        .unwrap();
        assert_eq!(doc.rules[0].members, Some(Vec::new()));
        let config = doc.build(UnsupportedParser).unwrap();
        let spec = config.rule_list(RuleCategory::Keep).unwrap().get(0).unwrap();
        assert!(spec.members.is_empty());
    }

    #[test]
    fn test_text_rule_without_grammar_is_rejected() {
        let doc = ConfigDocument::parse(
            "[[rules]]\ncategory = \"keep\"\ntext = \"class com.example.Main\"\n",
        )
        .unwrap();
        let err = doc.build(UnsupportedParser).unwrap_err();
        assert!(matches!(err, ConfigError::RuleRejected { index: 0, .. }));
        assert!(err.to_string().contains("com.example.Main"));
    }

    #[test]
    fn test_unknown_category() {
        let doc = ConfigDocument::parse("[[rules]]\ncategory = \"keep-everything\"\n").unwrap();
        let err = doc.build(UnsupportedParser).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCategory(_)));
    }

    #[test]
    fn test_resource_entry_needs_exactly_one_source() {
        let doc = ConfigDocument::parse(
            "[[outjars]]\npath = \"out.jar\"\ndescriptor = \"out\"\n",
        )
        .unwrap();
        let err = doc.build(UnsupportedParser).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEntry {
                section: "outjars",
                index: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_name_setting() {
        let doc = ConfigDocument::parse("[names]\nkeep-everything = true\n").unwrap();
        let err = doc.build(UnsupportedParser).unwrap_err();
        assert!(matches!(&err, ConfigError::InvalidName { key, .. } if key == "keep-everything"));
        assert!(err.to_string().contains("keep-everything"));
    }

    #[test]
    fn test_single_name_rejects_list() {
        let doc = ConfigDocument::parse("[names]\nrepackage_classes = [\"a\", \"b\"]\n").unwrap();
        let err = doc.build(UnsupportedParser).unwrap_err();
        assert!(matches!(&err, ConfigError::InvalidName { key, .. } if key == "repackage_classes"));
    }

    #[test]
    fn test_duplicate_name_aliases_are_rejected() {
        let doc = ConfigDocument::parse(
            "[names]\nkeep-package-names = \"com.a\"\nkeep_package_names = \"com.b\"\n",
        )
        .unwrap();
        let mut configurator = Configurator::new(UnsupportedParser);
        let err = doc.apply_to(&mut configurator).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidName { .. }));
        assert!(err.to_string().contains("keep-package-names"));
        assert!(!configurator
            .configuration()
            .filter(FilterSetting::KeepPackageNames)
            .is_enabled());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let doc = ConfigDocument::parse(DOCUMENT).unwrap();
        let toml = doc.to_toml().unwrap();
        assert_eq!(ConfigDocument::parse(&toml).unwrap(), doc);
    }
}
