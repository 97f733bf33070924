//! # Configuration
//!
//! The in-memory model a build script fills in and the processing engine
//! reads. It owns every rule list, resource list and setting it holds.
//! Caller-supplied resources and filter maps are shared with the caller, not
//! copied (see [`crate::classpath`]).
//!
//! There is no persistence. The configuration is handed to the engine as a
//! whole once the build script is done, either in memory or as JSON.

use serde::Serialize;

use crate::classpath::FilteredResourceList;
use crate::rules::{RuleAccumulator, RuleCategory, RuleList};
use crate::settings::{FilterSetting, Flags, NameFilter, NameSetting, NameSettings};

/// Which filtered resource list a resource goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceRole {
    /// Program inputs
    InJars,
    /// Program outputs
    OutJars,
    /// Library resources, read but not processed
    LibraryJars,
}

impl ResourceRole {
    pub const ALL: [ResourceRole; 3] = [Self::InJars, Self::OutJars, Self::LibraryJars];

    pub fn name(&self) -> &'static str {
        match self {
            Self::InJars => "injars",
            Self::OutJars => "outjars",
            Self::LibraryJars => "libraryjars",
        }
    }
}

/// Complete configuration for the processing engine
#[derive(Debug, Default, Serialize)]
pub struct Configuration {
    pub(crate) rules: RuleAccumulator,
    pub(crate) injars: FilteredResourceList,
    pub(crate) outjars: FilteredResourceList,
    pub(crate) library_jars: FilteredResourceList,
    pub(crate) names: NameSettings,
    pub(crate) flags: Flags,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule lists per category
    pub fn rules(&self) -> &RuleAccumulator {
        &self.rules
    }

    /// The list of `category`, or `None` if no rule targeted it yet
    pub fn rule_list(&self, category: RuleCategory) -> Option<RuleList> {
        self.rules.get(category)
    }

    pub fn resources(&self, role: ResourceRole) -> &FilteredResourceList {
        match role {
            ResourceRole::InJars => &self.injars,
            ResourceRole::OutJars => &self.outjars,
            ResourceRole::LibraryJars => &self.library_jars,
        }
    }

    pub(crate) fn resources_mut(&mut self, role: ResourceRole) -> &mut FilteredResourceList {
        match role {
            ResourceRole::InJars => &mut self.injars,
            ResourceRole::OutJars => &mut self.outjars,
            ResourceRole::LibraryJars => &mut self.library_jars,
        }
    }

    pub fn names(&self) -> &NameSettings {
        &self.names
    }

    /// Shorthand for one three-valued filter
    pub fn filter(&self, setting: FilterSetting) -> &NameFilter {
        self.names.filter(setting)
    }

    /// Shorthand for one single-name setting
    pub fn name(&self, setting: NameSetting) -> Option<&str> {
        self.names.name(setting).get()
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    /// JSON form for handing the configuration to the processing engine
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
