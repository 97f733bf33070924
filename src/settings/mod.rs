//! Settings module - name filters, single names and scalar flags

pub mod filters;
pub mod flags;

pub use filters::{FilterState, NameFilter, SingleName};
pub use flags::Flags;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The three-valued filter settings of a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterSetting {
    KeepPackageNames,
    AdaptClassStrings,
    DontNote,
    DontWarn,
    KeepAttributes,
    KeepDirectories,
    AdaptResourceFileNames,
    AdaptResourceFileContents,
    Optimizations,
}

impl FilterSetting {
    pub const ALL: [FilterSetting; 9] = [
        Self::KeepPackageNames,
        Self::AdaptClassStrings,
        Self::DontNote,
        Self::DontWarn,
        Self::KeepAttributes,
        Self::KeepDirectories,
        Self::AdaptResourceFileNames,
        Self::AdaptResourceFileContents,
        Self::Optimizations,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::KeepPackageNames => "keep-package-names",
            Self::AdaptClassStrings => "adapt-class-strings",
            Self::DontNote => "dont-note",
            Self::DontWarn => "dont-warn",
            Self::KeepAttributes => "keep-attributes",
            Self::KeepDirectories => "keep-directories",
            Self::AdaptResourceFileNames => "adapt-resource-file-names",
            Self::AdaptResourceFileContents => "adapt-resource-file-contents",
            Self::Optimizations => "optimizations",
        }
    }

    /// Whether the setting filters class or package names
    pub fn filters_class_names(&self) -> bool {
        matches!(
            self,
            Self::KeepPackageNames | Self::AdaptClassStrings | Self::DontNote | Self::DontWarn
        )
    }

    fn new_filter(&self) -> NameFilter {
        if self.filters_class_names() {
            NameFilter::for_class_names()
        } else {
            NameFilter::verbatim()
        }
    }
}

impl fmt::Display for FilterSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two single-name settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameSetting {
    /// Move renamed packages under this parent package
    FlattenPackageHierarchy,
    /// Move renamed classes into this single package
    RepackageClasses,
}

impl NameSetting {
    pub const ALL: [NameSetting; 2] = [Self::FlattenPackageHierarchy, Self::RepackageClasses];

    pub fn name(&self) -> &'static str {
        match self {
            Self::FlattenPackageHierarchy => "flatten-package-hierarchy",
            Self::RepackageClasses => "repackage-classes",
        }
    }
}

/// All name-based settings of a configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSettings {
    filters: Vec<(FilterSetting, NameFilter)>,
    flatten_package_hierarchy: SingleName,
    repackage_classes: SingleName,
}

impl Default for NameSettings {
    fn default() -> Self {
        Self {
            filters: FilterSetting::ALL
                .into_iter()
                .map(|s| (s, s.new_filter()))
                .collect(),
            flatten_package_hierarchy: SingleName::default(),
            repackage_classes: SingleName::default(),
        }
    }
}

impl Serialize for NameSettings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.filters.len() + 2))?;
        for (setting, filter) in &self.filters {
            map.serialize_entry(setting.name(), filter)?;
        }
        map.serialize_entry(
            NameSetting::FlattenPackageHierarchy.name(),
            &self.flatten_package_hierarchy,
        )?;
        map.serialize_entry(NameSetting::RepackageClasses.name(), &self.repackage_classes)?;
        map.end()
    }
}

impl NameSettings {
    pub fn filter(&self, setting: FilterSetting) -> &NameFilter {
        &self.filters[Self::slot(setting)].1
    }

    pub fn filter_mut(&mut self, setting: FilterSetting) -> &mut NameFilter {
        &mut self.filters[Self::slot(setting)].1
    }

    pub fn name(&self, setting: NameSetting) -> &SingleName {
        match setting {
            NameSetting::FlattenPackageHierarchy => &self.flatten_package_hierarchy,
            NameSetting::RepackageClasses => &self.repackage_classes,
        }
    }

    pub fn name_mut(&mut self, setting: NameSetting) -> &mut SingleName {
        match setting {
            NameSetting::FlattenPackageHierarchy => &mut self.flatten_package_hierarchy,
            NameSetting::RepackageClasses => &mut self.repackage_classes,
        }
    }

    /// Filters that are not unset
    pub fn enabled_filters(&self) -> impl Iterator<Item = (FilterSetting, &NameFilter)> + '_ {
        self.filters
            .iter()
            .filter(|(_, f)| f.is_enabled())
            .map(|(s, f)| (*s, f))
    }

    fn slot(setting: FilterSetting) -> usize {
        // ALL lists the settings in declaration order
        setting as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_follow_declaration_order() {
        let settings = NameSettings::default();
        for setting in FilterSetting::ALL {
            assert_eq!(settings.filters[NameSettings::slot(setting)].0, setting);
        }
    }

    #[test]
    fn test_class_name_filters_normalize() {
        let settings = NameSettings::default();
        assert!(settings.filter(FilterSetting::DontWarn).normalizes_names());
        assert!(!settings.filter(FilterSetting::KeepAttributes).normalizes_names());
    }

    #[test]
    fn test_enabled_filters() {
        let mut settings = NameSettings::default();
        assert_eq!(settings.enabled_filters().count(), 0);
        settings.filter_mut(FilterSetting::KeepAttributes).set_pattern(Some("Signature"));
        let enabled: Vec<_> = settings.enabled_filters().map(|(s, _)| s).collect();
        assert_eq!(enabled, vec![FilterSetting::KeepAttributes]);
    }

    #[test]
    fn test_serializes_as_named_map() {
        let mut settings = NameSettings::default();
        settings.filter_mut(FilterSetting::DontWarn).enable_default();
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["dont-warn"]["state"], "all");
        assert_eq!(json["keep-package-names"]["state"], "unset");
        assert!(json["repackage-classes"].is_null());
    }

    #[test]
    fn test_single_names_are_independent() {
        let mut settings = NameSettings::default();
        settings
            .name_mut(NameSetting::FlattenPackageHierarchy)
            .set(Some("a.b"));
        assert_eq!(
            settings.name(NameSetting::FlattenPackageHierarchy).get(),
            Some("a/b")
        );
        assert!(!settings.name(NameSetting::RepackageClasses).is_set());
    }
}
