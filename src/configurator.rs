//! # Configurator
//!
//! The call surface a build script drives. Every method is one configuration
//! call: it normalizes its input, builds what needs building, and appends the
//! result to the long-lived [`Configuration`]. Nothing is ever removed or
//! reordered.
//!
//! A failing call leaves the configuration exactly as it was, so the caller
//! can fix the input and retry.
//!
//! ## Examples
//!
//! ```rust
//! use keeprules::configurator::Configurator;
//! use keeprules::rules::{Attributes, RuleCategory, UnsupportedParser};
//! use keeprules::classpath::{FilterMap, Resource};
//!
//! let mut configurator = Configurator::new(UnsupportedParser);
//!
//! configurator
//!     .rule(RuleCategory::Keep, Some(&Attributes::new().with("name", "com.example.Main")))
//!     .unwrap();
//! configurator.library_jars(Resource::path("libs/rt.jar"), Some(FilterMap::new().with("filter", "java/**")));
//! configurator.keep_package_names(Some("com.example.api"));
//!
//! let config = configurator.into_configuration();
//! assert_eq!(config.rules().count(RuleCategory::Keep), 1);
//! ```

use tracing::{debug, warn};

use crate::classpath::{FilterMap, ResourceRef};
use crate::configuration::{Configuration, ResourceRole};
use crate::error::RuleError;
use crate::rules::{Attributes, MemberBlock, RuleCategory, RuleList, RuleParser, SpecificationBuilder};
use crate::settings::{FilterSetting, Flags, NameFilter, NameSetting};

/// Accumulates configuration calls into a [`Configuration`].
///
/// Not thread-safe: one configurator per build task invocation.
pub struct Configurator {
    parser: Box<dyn RuleParser>,
    configuration: Configuration,
}

impl Configurator {
    /// Create a configurator that hands rule text to `parser`
    pub fn new(parser: impl RuleParser + 'static) -> Self {
        Self {
            parser: Box::new(parser),
            configuration: Configuration::new(),
        }
    }

    /// The configuration built so far
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Finish configuring and hand the configuration over
    pub fn into_configuration(self) -> Configuration {
        self.configuration
    }

    fn builder(&self) -> SpecificationBuilder<'_> {
        SpecificationBuilder::new(self.parser.as_ref())
    }

    // ------------- rules -------------

    /// Append a rule given as text
    pub fn rule_text(&mut self, category: RuleCategory, text: &str) -> Result<(), RuleError> {
        let built = self.builder().from_text(text);
        self.append(category, built)
    }

    /// Append a rule given as an attribute map; `None` selects any class
    pub fn rule(
        &mut self,
        category: RuleCategory,
        attributes: Option<&Attributes>,
    ) -> Result<(), RuleError> {
        let built = self.builder().from_attributes(attributes);
        self.append(category, built)
    }

    /// Append a rule given as an attribute map plus a member block
    pub fn rule_with_members<F>(
        &mut self,
        category: RuleCategory,
        attributes: Option<&Attributes>,
        members: Option<F>,
    ) -> Result<(), RuleError>
    where
        F: FnOnce(&mut MemberBlock) -> Result<(), RuleError>,
    {
        let built = self
            .builder()
            .from_attributes_with_members(attributes, members);
        self.append(category, built)
    }

    fn append(
        &mut self,
        category: RuleCategory,
        built: Result<crate::rules::Specification, RuleError>,
    ) -> Result<(), RuleError> {
        match built {
            Ok(specification) => {
                self.configuration.rules.append(category, specification);
                Ok(())
            }
            Err(e) => {
                warn!(category = category.name(), error = %e, "Rule rejected");
                Err(e)
            }
        }
    }

    /// The list of `category`, or `None` if no rule targeted it yet
    pub fn rules(&self, category: RuleCategory) -> Option<RuleList> {
        self.configuration.rule_list(category)
    }

    /// Shorthand for `rule_text(RuleCategory::Keep, text)`
    pub fn keep_text(&mut self, text: &str) -> Result<(), RuleError> {
        self.rule_text(RuleCategory::Keep, text)
    }

    /// Shorthand for `rule(RuleCategory::Keep, attributes)`
    pub fn keep(&mut self, attributes: Option<&Attributes>) -> Result<(), RuleError> {
        self.rule(RuleCategory::Keep, attributes)
    }

    // ------------- resources -------------

    /// Append a resource with its filter record to the list for `role`.
    ///
    /// Both are stored by reference; later changes to `filter` through the
    /// caller's handle stay visible.
    pub fn resource(&mut self, role: ResourceRole, resource: ResourceRef, filter: Option<FilterMap>) {
        debug!(list = role.name(), "Adding resource");
        self.configuration.resources_mut(role).push(resource, filter);
    }

    pub fn injars(&mut self, resource: ResourceRef, filter: Option<FilterMap>) {
        self.resource(ResourceRole::InJars, resource, filter);
    }

    pub fn injars_unfiltered(&mut self, resource: ResourceRef) {
        self.injars(resource, None);
    }

    pub fn outjars(&mut self, resource: ResourceRef, filter: Option<FilterMap>) {
        self.resource(ResourceRole::OutJars, resource, filter);
    }

    pub fn outjars_unfiltered(&mut self, resource: ResourceRef) {
        self.outjars(resource, None);
    }

    pub fn library_jars(&mut self, resource: ResourceRef, filter: Option<FilterMap>) {
        self.resource(ResourceRole::LibraryJars, resource, filter);
    }

    pub fn library_jars_unfiltered(&mut self, resource: ResourceRef) {
        self.library_jars(resource, None);
    }

    // ------------- names -------------

    /// Mutable access to one three-valued filter
    pub fn filter(&mut self, setting: FilterSetting) -> &mut NameFilter {
        self.configuration.names.filter_mut(setting)
    }

    /// Enable package-name keeping for every package
    pub fn keep_package_names_default(&mut self) {
        self.filter(FilterSetting::KeepPackageNames).enable_default();
    }

    /// Add package-name patterns; `None` resets to "every package"
    pub fn keep_package_names(&mut self, filter: Option<&str>) {
        self.filter(FilterSetting::KeepPackageNames).set_pattern(filter);
    }

    pub fn keep_attributes(&mut self, filter: Option<&str>) {
        self.filter(FilterSetting::KeepAttributes).set_pattern(filter);
    }

    pub fn keep_directories(&mut self, filter: Option<&str>) {
        self.filter(FilterSetting::KeepDirectories).set_pattern(filter);
    }

    pub fn dont_warn(&mut self, filter: Option<&str>) {
        self.filter(FilterSetting::DontWarn).set_pattern(filter);
    }

    pub fn dont_note(&mut self, filter: Option<&str>) {
        self.filter(FilterSetting::DontNote).set_pattern(filter);
    }

    /// Replace the flattening target; `None` flattens into the root package
    pub fn flatten_package_hierarchy(&mut self, name: Option<&str>) {
        self.configuration
            .names
            .name_mut(NameSetting::FlattenPackageHierarchy)
            .set(name);
    }

    /// Replace the repackaging target; `None` repackages into the root package
    pub fn repackage_classes(&mut self, name: Option<&str>) {
        self.configuration
            .names
            .name_mut(NameSetting::RepackageClasses)
            .set(name);
    }

    // ------------- flags -------------

    /// Mutable access to the scalar flag store
    pub fn flags(&mut self) -> &mut Flags {
        &mut self.configuration.flags
    }

    pub fn dont_shrink(&mut self) {
        self.flags().shrink = false;
    }

    pub fn dont_optimize(&mut self) {
        self.flags().optimize = false;
    }

    pub fn dont_obfuscate(&mut self) {
        self.flags().obfuscate = false;
    }

    pub fn dont_preverify(&mut self) {
        self.flags().preverify = false;
    }

    pub fn optimization_passes(&mut self, passes: u32) {
        self.flags().optimization_passes = passes;
    }

    pub fn verbose(&mut self) {
        self.flags().verbose = true;
    }

    pub fn ignore_warnings(&mut self) {
        self.flags().ignore_warnings = true;
    }

    /// Set the source file attribute replacement; `None` clears the attribute
    pub fn rename_source_file_attribute(&mut self, name: Option<&str>) {
        self.flags().rename_source_file_attribute = Some(name.unwrap_or_default().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classpath::Resource;
    use crate::error::ParseError;
    use crate::rules::{Specification, UnsupportedParser};
    use crate::settings::FilterState;

    fn name_parser(text: &str) -> Result<Specification, ParseError> {
        match text.strip_prefix("class ") {
            Some(name) => Ok(Specification::named(name.trim())),
            None => Err(ParseError::at("expected 'class'", 0)),
        }
    }

    #[test]
    fn test_failed_rule_appends_nothing() {
        let mut configurator = Configurator::new(name_parser);
        configurator.keep_text("class a/A").unwrap();
        let keep = configurator.rules(RuleCategory::Keep).unwrap();

        assert!(configurator.keep_text("interface b/B").is_err());
        assert_eq!(keep.len(), 1);
    }

    #[test]
    fn test_failed_first_rule_leaves_category_absent() {
        let mut configurator = Configurator::new(UnsupportedParser);
        assert!(configurator.rule_text(RuleCategory::KeepNames, "class *").is_err());
        assert!(configurator.rules(RuleCategory::KeepNames).is_none());
    }

    #[test]
    fn test_rule_shapes_share_one_list() {
        let mut configurator = Configurator::new(name_parser);
        configurator.keep_text("class a/A").unwrap();
        configurator
            .keep(Some(&Attributes::new().with("name", "b.B")))
            .unwrap();
        configurator
            .rule_with_members(
                RuleCategory::Keep,
                Some(&Attributes::new().with("name", "c.C")),
                Some(|m: &mut MemberBlock| {
                    m.all();
                    Ok(())
                }),
            )
            .unwrap();

        let names: Vec<_> = configurator
            .rules(RuleCategory::Keep)
            .unwrap()
            .to_vec()
            .iter()
            .map(|s| s.label().to_string())
            .collect();
        assert_eq!(names, vec!["a/A", "b/B", "c/C"]);
    }

    #[test]
    fn test_resource_lists_are_separate() {
        let mut configurator = Configurator::new(UnsupportedParser);
        configurator.injars_unfiltered(Resource::path("in.jar"));
        configurator.outjars_unfiltered(Resource::path("out.jar"));
        configurator.library_jars(Resource::path("rt.jar"), Some(FilterMap::new()));

        let config = configurator.configuration();
        for role in ResourceRole::ALL {
            assert_eq!(config.resources(role).len(), 1);
        }
    }

    #[test]
    fn test_keep_package_names_transitions() {
        let mut configurator = Configurator::new(UnsupportedParser);
        configurator.keep_package_names_default();
        assert_eq!(
            configurator.configuration().filter(FilterSetting::KeepPackageNames).state(),
            &FilterState::All
        );
        configurator.keep_package_names(Some("com.example.api"));
        configurator.keep_package_names(None);
        assert_eq!(
            configurator.configuration().filter(FilterSetting::KeepPackageNames).state(),
            &FilterState::All
        );
    }

    #[test]
    fn test_flatten_is_last_write_wins() {
        let mut configurator = Configurator::new(UnsupportedParser);
        configurator.flatten_package_hierarchy(Some("com.a"));
        configurator.flatten_package_hierarchy(Some("com.b"));
        assert_eq!(
            configurator
                .configuration()
                .name(NameSetting::FlattenPackageHierarchy),
            Some("com/b")
        );
    }

    #[test]
    fn test_flag_calls() {
        let mut configurator = Configurator::new(UnsupportedParser);
        configurator.dont_shrink();
        configurator.optimization_passes(5);
        configurator.rename_source_file_attribute(None);
        let flags = configurator.configuration().flags();
        assert!(!flags.shrink);
        assert_eq!(flags.optimization_passes, 5);
        assert_eq!(flags.rename_source_file_attribute.as_deref(), Some(""));
    }
}
