//! # Specification Builder
//!
//! Converts the three rule shapes a build script may use into one
//! [`Specification`]:
//!
//! 1. rule text, routed unchanged to a [`RuleParser`];
//! 2. an attribute map ([`Attributes`]);
//! 3. an attribute map plus a member block (a closure filling a [`MemberBlock`]).
//!
//! Shape 2 is shape 3 with no member block, so both always agree.
//!
//! ## Examples
//!
//! ```rust
//! use keeprules::rules::builder::{Attributes, SpecificationBuilder, UnsupportedParser};
//!
//! let parser = UnsupportedParser;
//! let builder = SpecificationBuilder::new(&parser);
//!
//! let attributes = Attributes::new()
//!     .with("access", "public")
//!     .with("name", "com.example.**");
//! let spec = builder
//!     .from_attributes_with_members(Some(&attributes), Some(|members: &mut keeprules::rules::builder::MemberBlock| {
//!         members.method(Some(&Attributes::new().with("name", "get*")))?;
//!         Ok(())
//!     }))
//!     .unwrap();
//!
//! assert_eq!(spec.name_pattern.as_deref(), Some("com/example/**"));
//! assert_eq!(spec.members.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

use super::specification::{
    ClassKind, KeepOptions, MemberKind, MemberSpecification, Modifiers, Specification,
};
use crate::error::{ParseError, RuleError};
use crate::utils::names::{internal_name, split_top_level};

/// Boundary to the rule-text grammar.
///
/// The grammar itself lives with the processing engine. Implementations
/// receive the rule text exactly as the caller wrote it.
pub trait RuleParser {
    /// Parse one rule into a fully populated specification
    fn parse(&self, text: &str) -> Result<Specification, ParseError>;
}

impl<F> RuleParser for F
where
    F: Fn(&str) -> Result<Specification, ParseError>,
{
    fn parse(&self, text: &str) -> Result<Specification, ParseError> {
        self(text)
    }
}

/// A parser for setups that carry no rule grammar; it rejects all text.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedParser;

impl RuleParser for UnsupportedParser {
    fn parse(&self, text: &str) -> Result<Specification, ParseError> {
        let preview: String = text.chars().take(40).collect();
        Err(ParseError::at(
            format!("no rule grammar available to parse '{preview}'"),
            0,
        ))
    }
}

/// A single attribute value: text or a boolean switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Text(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// An attribute map describing a class or member pattern.
///
/// Keys are matched case-sensitively. Keys the builder does not know are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text value of `key`; a boolean under a text key is an error
    fn text(&self, key: &str) -> Result<Option<&str>, RuleError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(AttributeValue::Text(s)) => Ok(Some(s.as_str())),
            Some(AttributeValue::Flag(b)) => Err(RuleError::invalid_attribute(
                key,
                b.to_string(),
                "expected text",
            )),
        }
    }

    /// Boolean value of `key`; `"true"`/`"false"` text is accepted as well
    fn flag(&self, key: &str) -> Result<Option<bool>, RuleError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(AttributeValue::Flag(b)) => Ok(Some(*b)),
            Some(AttributeValue::Text(s)) => match s.trim() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(RuleError::invalid_attribute(key, s, "expected a boolean")),
            },
        }
    }

    /// Internal form of a name-like text value
    fn name(&self, key: &str) -> Result<Option<String>, RuleError> {
        Ok(self.text(key)?.map(internal_name))
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (k, v) in iter {
            attributes.insert(k, v);
        }
        attributes
    }
}

/// Receives the member patterns of a class specification.
///
/// Each call appends one pattern, in call order.
#[derive(Debug, Default)]
pub struct MemberBlock {
    members: Vec<MemberSpecification>,
}

impl MemberBlock {
    fn new() -> Self {
        Self::default()
    }

    /// Add a field pattern
    pub fn field(&mut self, attributes: Option<&Attributes>) -> Result<&mut Self, RuleError> {
        self.push(MemberKind::Field, attributes)
    }

    /// Add a method pattern
    pub fn method(&mut self, attributes: Option<&Attributes>) -> Result<&mut Self, RuleError> {
        self.push(MemberKind::Method, attributes)
    }

    /// Add a constructor pattern; `name` and `type` do not apply
    pub fn constructor(&mut self, attributes: Option<&Attributes>) -> Result<&mut Self, RuleError> {
        self.push(MemberKind::Constructor, attributes)
    }

    /// Add the `*` marker selecting every member
    pub fn all(&mut self) -> &mut Self {
        self.members.push(MemberSpecification::all_members());
        self
    }

    /// Add the `<fields>` marker
    pub fn all_fields(&mut self) -> &mut Self {
        self.members.push(MemberSpecification::all_fields());
        self
    }

    /// Add the `<methods>` marker
    pub fn all_methods(&mut self) -> &mut Self {
        self.members.push(MemberSpecification::all_methods());
        self
    }

    /// Patterns collected so far
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn push(
        &mut self,
        kind: MemberKind,
        attributes: Option<&Attributes>,
    ) -> Result<&mut Self, RuleError> {
        let member = build_member(kind, attributes)?;
        self.members.push(member);
        Ok(self)
    }

    fn into_members(self) -> Vec<MemberSpecification> {
        self.members
    }
}

fn build_member(
    kind: MemberKind,
    attributes: Option<&Attributes>,
) -> Result<MemberSpecification, RuleError> {
    let empty = Attributes::new();
    let attributes = attributes.unwrap_or(&empty);

    let mut member = MemberSpecification::new(kind);
    if let Some(access) = attributes.text("access")? {
        member.modifiers = Modifiers::parse("access", access)?;
    }
    member.annotation = attributes.name("annotation")?;
    if kind != MemberKind::Constructor {
        member.type_pattern = attributes.name("type")?;
        member.name_pattern = attributes.name("name")?;
    }
    member.arguments = attributes.text("parameters")?.map(|p| {
        split_top_level(p)
            .iter()
            .map(String::as_str)
            .map(argument_name)
            .collect()
    });
    member.value = attributes.text("value")?.map(str::to_string);

    Ok(member)
}

/// Internal form of one argument type; the `...` wildcard and a varargs
/// suffix are kept as written
fn argument_name(argument: &str) -> String {
    match argument.strip_suffix("...") {
        Some(element) => format!("{}...", internal_name(element)),
        None => internal_name(argument),
    }
}

/// Builds specifications from any of the three rule shapes.
///
/// Holds the rule-text parser for the text shape; the map shapes need none.
pub struct SpecificationBuilder<'p> {
    parser: &'p dyn RuleParser,
}

impl<'p> SpecificationBuilder<'p> {
    pub fn new(parser: &'p dyn RuleParser) -> Self {
        Self { parser }
    }

    /// Build from rule text; the text reaches the parser unchanged
    pub fn from_text(&self, text: &str) -> Result<Specification, RuleError> {
        trace!(rule = text, "Parsing rule text");
        self.parser.parse(text).map_err(RuleError::from)
    }

    /// Build from an attribute map; `None` behaves as an empty map
    pub fn from_attributes(
        &self,
        attributes: Option<&Attributes>,
    ) -> Result<Specification, RuleError> {
        self.from_attributes_with_members(attributes, None::<fn(&mut MemberBlock) -> Result<(), RuleError>>)
    }

    /// Build from an attribute map plus a member block.
    ///
    /// A missing block yields a specification without members.
    pub fn from_attributes_with_members<F>(
        &self,
        attributes: Option<&Attributes>,
        members: Option<F>,
    ) -> Result<Specification, RuleError>
    where
        F: FnOnce(&mut MemberBlock) -> Result<(), RuleError>,
    {
        let mut block = MemberBlock::new();
        if let Some(fill) = members {
            fill(&mut block)?;
        }
        build_specification(attributes, block.into_members())
    }
}

fn build_specification(
    attributes: Option<&Attributes>,
    members: Vec<MemberSpecification>,
) -> Result<Specification, RuleError> {
    let empty = Attributes::new();
    let attributes = attributes.unwrap_or(&empty);

    let mut spec = Specification::any_class();

    if let Some(access) = attributes.text("access")? {
        spec.modifiers = Modifiers::parse("access", access)?;
    }
    if let Some(kind) = attributes.text("type")? {
        spec.kind = ClassKind::from_keyword(kind.trim())
            .ok_or_else(|| RuleError::invalid_attribute("type", kind, "unknown class type"))?;
    }
    spec.annotation = attributes.name("annotation")?;
    spec.name_pattern = attributes.name("name")?;
    spec.extends_annotation = attributes.name("extendsannotation")?;
    spec.extends_pattern = attributes.name("extends")?;
    spec.implements_pattern = attributes.name("implements")?;
    spec.condition = attributes
        .name("if")?
        .map(|name| Box::new(Specification::named(name)));

    if let Some(modifier) = attributes.text("modifier")? {
        for option in split_top_level(modifier) {
            if !spec.keep_options.enable(&option) {
                return Err(RuleError::invalid_attribute(
                    "modifier",
                    modifier,
                    format!("unknown keep option '{option}'"),
                ));
            }
        }
    }
    for key in KeepOptions::KEYS {
        if let Some(value) = attributes.flag(key)? {
            spec.keep_options.set(key, value);
        }
    }

    spec.members = members;
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::specification::Modifier;
    use pretty_assertions::assert_eq;

    fn failing_parser(text: &str) -> Result<Specification, ParseError> {
        Err(ParseError::at(format!("unexpected token in '{text}'"), 3))
    }

    fn echo_parser(text: &str) -> Result<Specification, ParseError> {
        Ok(Specification::named(text))
    }

    #[test]
    fn test_from_text_routes_text_unchanged() {
        let parser = echo_parser;
        let builder = SpecificationBuilder::new(&parser);
        let spec = builder.from_text("  class com.example.App { *; }").unwrap();
        assert_eq!(
            spec.name_pattern.as_deref(),
            Some("  class com.example.App { *; }")
        );
    }

    #[test]
    fn test_from_text_propagates_parse_error() {
        let parser = failing_parser;
        let builder = SpecificationBuilder::new(&parser);
        let err = builder.from_text("klass Foo").unwrap_err();
        assert_eq!(
            err,
            RuleError::Parse(ParseError::at("unexpected token in 'klass Foo'", 3))
        );
    }

    #[test]
    fn test_unsupported_parser_rejects() {
        let builder = SpecificationBuilder::new(&UnsupportedParser);
        assert!(matches!(
            builder.from_text("class *"),
            Err(RuleError::Parse(_))
        ));
    }

    #[test]
    fn test_null_map_matches_any_class() {
        let builder = SpecificationBuilder::new(&UnsupportedParser);
        assert_eq!(builder.from_attributes(None).unwrap(), Specification::any_class());
        assert_eq!(
            builder.from_attributes(Some(&Attributes::new())).unwrap(),
            Specification::any_class()
        );
    }

    #[test]
    fn test_map_fields_are_read_and_normalized() {
        let builder = SpecificationBuilder::new(&UnsupportedParser);
        let attributes = Attributes::new()
            .with("access", "public !abstract")
            .with("type", "interface")
            .with("annotation", "com.example.Keep")
            .with("name", "com.example.**")
            .with("extends", "com.example.Base")
            .with("implements", "java.io.Serializable")
            .with("extendsannotation", "com.example.Marker")
            .with("if", "com.example.Feature");

        let spec = builder.from_attributes(Some(&attributes)).unwrap();

        assert!(spec.modifiers.required.contains(&Modifier::Public));
        assert!(spec.modifiers.forbidden.contains(&Modifier::Abstract));
        assert_eq!(spec.kind, ClassKind::Interface);
        assert_eq!(spec.annotation.as_deref(), Some("com/example/Keep"));
        assert_eq!(spec.name_pattern.as_deref(), Some("com/example/**"));
        assert_eq!(spec.extends_pattern.as_deref(), Some("com/example/Base"));
        assert_eq!(
            spec.implements_pattern.as_deref(),
            Some("java/io/Serializable")
        );
        assert_eq!(spec.extends_annotation.as_deref(), Some("com/example/Marker"));
        assert_eq!(
            spec.condition.as_deref(),
            Some(&Specification::named("com/example/Feature"))
        );
    }

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        let builder = SpecificationBuilder::new(&UnsupportedParser);
        let attributes = Attributes::new()
            .with("name", "Foo")
            .with("futurekey", "whatever")
            .with("flavour", true);
        let spec = builder.from_attributes(Some(&attributes)).unwrap();
        assert_eq!(spec, Specification::named("Foo"));
    }

    #[test]
    fn test_invalid_type_is_rejected() {
        let builder = SpecificationBuilder::new(&UnsupportedParser);
        let attributes = Attributes::new().with("type", "record");
        let err = builder.from_attributes(Some(&attributes)).unwrap_err();
        assert!(matches!(err, RuleError::InvalidAttribute { ref key, .. } if key == "type"));
    }

    #[test]
    fn test_keep_options_from_modifier_and_flags() {
        let builder = SpecificationBuilder::new(&UnsupportedParser);
        let attributes = Attributes::new()
            .with("modifier", "allowshrinking,includedescriptorclasses")
            .with("allowobfuscation", true)
            .with("includecode", "true");
        let spec = builder.from_attributes(Some(&attributes)).unwrap();
        assert!(spec.keep_options.allow_shrinking);
        assert!(spec.keep_options.include_descriptor_classes);
        assert!(spec.keep_options.allow_obfuscation);
        assert!(spec.keep_options.include_code);
        assert!(!spec.keep_options.allow_optimization);
    }

    #[test]
    fn test_non_boolean_keep_option_is_rejected() {
        let builder = SpecificationBuilder::new(&UnsupportedParser);
        let attributes = Attributes::new().with("allowshrinking", "sometimes");
        assert!(builder.from_attributes(Some(&attributes)).is_err());
    }

    #[test]
    fn test_variant_equivalence() {
        let builder = SpecificationBuilder::new(&UnsupportedParser);
        let attributes = Attributes::new().with("access", "public").with("name", "a.B");

        let plain = builder.from_attributes(Some(&attributes)).unwrap();
        let no_block = builder
            .from_attributes_with_members(Some(&attributes), None::<fn(&mut MemberBlock) -> Result<(), RuleError>>)
            .unwrap();
        let empty_block = builder
            .from_attributes_with_members(Some(&attributes), Some(|_: &mut MemberBlock| Ok(())))
            .unwrap();

        assert_eq!(plain, no_block);
        assert_eq!(plain, empty_block);
        assert!(plain.is_class_only());
    }

    #[test]
    fn test_member_block_preserves_order() {
        let builder = SpecificationBuilder::new(&UnsupportedParser);
        let spec = builder
            .from_attributes_with_members(
                None,
                Some(|m: &mut MemberBlock| {
                    m.field(Some(
                        &Attributes::new()
                            .with("access", "static final")
                            .with("type", "java.lang.String")
                            .with("name", "TAG"),
                    ))?;
                    m.constructor(Some(&Attributes::new().with("parameters", "android.content.Context")))?;
                    m.method(Some(
                        &Attributes::new()
                            .with("name", "on*")
                            .with("parameters", "int, java.util.Map<K,V>"),
                    ))?;
                    m.all();
                    Ok(())
                }),
            )
            .unwrap();

        assert_eq!(spec.members.len(), 4);
        assert_eq!(spec.members[0].kind, MemberKind::Field);
        assert_eq!(spec.members[0].type_pattern.as_deref(), Some("java/lang/String"));
        assert_eq!(spec.members[1].kind, MemberKind::Constructor);
        assert_eq!(
            spec.members[1].arguments,
            Some(vec!["android/content/Context".to_string()])
        );
        assert_eq!(
            spec.members[2].arguments,
            Some(vec!["int".to_string(), "java/util/Map<K,V>".to_string()])
        );
        assert!(spec.members[3].is_all_members());
    }

    #[test]
    fn test_member_parameters_keep_ellipsis() {
        let builder = SpecificationBuilder::new(&UnsupportedParser);
        let spec = builder
            .from_attributes_with_members(
                None,
                Some(|m: &mut MemberBlock| {
                    m.method(Some(&Attributes::new().with("parameters", "...")))?;
                    m.method(Some(&Attributes::new().with("parameters", "java.lang.String...")))?;
                    m.method(Some(
                        &Attributes::new().with("parameters", "int, java.lang.Object[]..."),
                    ))?;
                    Ok(())
                }),
            )
            .unwrap();

        assert_eq!(spec.members[0].arguments, Some(vec!["...".to_string()]));
        assert_eq!(
            spec.members[1].arguments,
            Some(vec!["java/lang/String...".to_string()])
        );
        assert_eq!(
            spec.members[2].arguments,
            Some(vec!["int".to_string(), "java/lang/Object[]...".to_string()])
        );
    }

    #[test]
    fn test_failing_member_block_aborts_build() {
        let builder = SpecificationBuilder::new(&UnsupportedParser);
        let result = builder.from_attributes_with_members(
            Some(&Attributes::new().with("name", "Foo")),
            Some(|m: &mut MemberBlock| {
                m.method(Some(&Attributes::new().with("access", "publik")))?;
                Ok(())
            }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_attributes_from_iterator() {
        let attributes: Attributes = [("name", "a.B"), ("access", "public")].into_iter().collect();
        assert_eq!(attributes.len(), 2);
        assert_eq!(
            attributes.get("name"),
            Some(&AttributeValue::Text("a.B".to_string()))
        );
    }
}
