//! # Rule Specifications
//!
//! A [`Specification`] describes which classes, and which of their members, a
//! rule selects. It is the single canonical form every rule shape (text,
//! attribute map, attribute map plus member block) converges on.
//!
//! Specifications are values: once appended to a rule category they are held
//! behind an `Rc` and never edited. Changing a rule means building a new one.
//!
//! All name-like fields hold the internal, slash-separated form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::RuleError;

/// Access and structural modifiers that may constrain a class or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Static,
    Final,
    Abstract,
    Synchronized,
    Volatile,
    Transient,
    Bridge,
    Varargs,
    Native,
    Strictfp,
    Synthetic,
}

impl Modifier {
    /// Parse a modifier keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "protected" => Some(Self::Protected),
            "static" => Some(Self::Static),
            "final" => Some(Self::Final),
            "abstract" => Some(Self::Abstract),
            "synchronized" => Some(Self::Synchronized),
            "volatile" => Some(Self::Volatile),
            "transient" => Some(Self::Transient),
            "bridge" => Some(Self::Bridge),
            "varargs" => Some(Self::Varargs),
            "native" => Some(Self::Native),
            "strictfp" => Some(Self::Strictfp),
            "synthetic" => Some(Self::Synthetic),
            _ => None,
        }
    }

    /// The keyword as written in rules
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Static => "static",
            Self::Final => "final",
            Self::Abstract => "abstract",
            Self::Synchronized => "synchronized",
            Self::Volatile => "volatile",
            Self::Transient => "transient",
            Self::Bridge => "bridge",
            Self::Varargs => "varargs",
            Self::Native => "native",
            Self::Strictfp => "strictfp",
            Self::Synthetic => "synthetic",
        }
    }
}

/// Required and forbidden modifiers.
///
/// An empty set on both sides leaves the access unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Modifiers that must be present
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub required: BTreeSet<Modifier>,
    /// Modifiers that must be absent (written with a `!` prefix)
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub forbidden: BTreeSet<Modifier>,
}

impl Modifiers {
    /// Parse an access string such as `"public !final"` or `"public,static"`.
    ///
    /// `key` only serves error reporting.
    pub fn parse(key: &str, access: &str) -> Result<Self, RuleError> {
        let mut modifiers = Self::default();
        for token in access
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let (negated, keyword) = match token.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, token),
            };
            let modifier = Modifier::from_keyword(keyword).ok_or_else(|| {
                RuleError::invalid_attribute(key, access, format!("unknown modifier '{keyword}'"))
            })?;
            if negated {
                modifiers.forbidden.insert(modifier);
            } else {
                modifiers.required.insert(modifier);
            }
        }
        Ok(modifiers)
    }

    /// True when no modifier is required or forbidden
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.forbidden.is_empty()
    }
}

/// Kind of class a specification selects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    AnnotationType,
    /// Any kind matches
    #[default]
    Unspecified,
}

impl ClassKind {
    /// Parse the value of a `type` attribute
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "enum" => Some(Self::Enum),
            "@interface" | "annotation" => Some(Self::AnnotationType),
            _ => None,
        }
    }
}

/// Options that soften what a keep rule protects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepOptions {
    pub include_descriptor_classes: bool,
    pub include_code: bool,
    pub allow_shrinking: bool,
    pub allow_optimization: bool,
    pub allow_obfuscation: bool,
}

impl KeepOptions {
    /// Attribute keys that toggle a keep option
    pub const KEYS: [&'static str; 5] = [
        "includedescriptorclasses",
        "includecode",
        "allowshrinking",
        "allowoptimization",
        "allowobfuscation",
    ];

    /// Switch on the option named by `key`; returns false for unknown keys
    pub fn enable(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    /// Set the option named by `key`; returns false for unknown keys
    pub fn set(&mut self, key: &str, value: bool) -> bool {
        let option = match key {
            "includedescriptorclasses" => &mut self.include_descriptor_classes,
            "includecode" => &mut self.include_code,
            "allowshrinking" => &mut self.allow_shrinking,
            "allowoptimization" => &mut self.allow_optimization,
            "allowobfuscation" => &mut self.allow_obfuscation,
            _ => return false,
        };
        *option = value;
        true
    }
}

/// What kind of member a member pattern selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
    /// Fields and methods alike
    Any,
}

/// One member pattern inside a class specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpecification {
    pub kind: MemberKind,
    #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Field type or method return type; `None` matches any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_pattern: Option<String>,
    /// `None` matches any name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_pattern: Option<String>,
    /// Argument types of methods and constructors; `None` matches any list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<String>>,
    /// Assumed value, for rules of the assume-values category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl MemberSpecification {
    /// An unconstrained pattern of the given kind
    pub fn new(kind: MemberKind) -> Self {
        Self {
            kind,
            modifiers: Modifiers::default(),
            annotation: None,
            type_pattern: None,
            name_pattern: None,
            arguments: None,
            value: None,
        }
    }

    /// The `*` marker: every field and every method
    pub fn all_members() -> Self {
        Self::new(MemberKind::Any)
    }

    /// The `<fields>` marker
    pub fn all_fields() -> Self {
        Self::new(MemberKind::Field)
    }

    /// The `<methods>` marker
    pub fn all_methods() -> Self {
        Self::new(MemberKind::Method)
    }

    /// True for the wildcard `*` marker
    pub fn is_all_members(&self) -> bool {
        *self == Self::all_members()
    }
}

/// A single rule entry: which classes, and which of their members, to select.
///
/// The default value matches any class and none of its members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    /// The rule applies only if this condition specification matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Box<Specification>>,
    #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub kind: ClassKind,
    /// Annotation the class itself must carry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Class name pattern; `None` matches any class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_pattern: Option<String>,
    /// Annotation the super class or interface must carry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends_annotation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implements_pattern: Option<String>,
    /// Member patterns in declaration order; empty selects the class only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberSpecification>,
    #[serde(default)]
    pub keep_options: KeepOptions,
}

impl Specification {
    /// A specification matching any class and none of its members
    pub fn any_class() -> Self {
        Self::default()
    }

    /// A specification matching classes by name pattern (internal form)
    pub fn named(name_pattern: impl Into<String>) -> Self {
        Self {
            name_pattern: Some(name_pattern.into()),
            ..Self::default()
        }
    }

    /// True if the rule selects the class alone, without any member
    pub fn is_class_only(&self) -> bool {
        self.members.is_empty()
    }

    /// Human-readable label used in logs and summaries
    pub fn label(&self) -> &str {
        self.name_pattern.as_deref().unwrap_or("**")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_parse_required_and_forbidden() {
        let modifiers = Modifiers::parse("access", "public !final,static").unwrap();
        assert!(modifiers.required.contains(&Modifier::Public));
        assert!(modifiers.required.contains(&Modifier::Static));
        assert!(modifiers.forbidden.contains(&Modifier::Final));
        assert_eq!(modifiers.required.len(), 2);
    }

    #[test]
    fn test_modifiers_parse_empty() {
        assert!(Modifiers::parse("access", "  ").unwrap().is_empty());
    }

    #[test]
    fn test_modifiers_parse_unknown() {
        let err = Modifiers::parse("access", "public pubic").unwrap_err();
        assert!(err.to_string().contains("unknown modifier 'pubic'"));
    }

    #[test]
    fn test_class_kind_keywords() {
        assert_eq!(ClassKind::from_keyword("interface"), Some(ClassKind::Interface));
        assert_eq!(
            ClassKind::from_keyword("@interface"),
            Some(ClassKind::AnnotationType)
        );
        assert_eq!(ClassKind::from_keyword("record"), None);
        assert_eq!(ClassKind::default(), ClassKind::Unspecified);
    }

    #[test]
    fn test_keep_options_enable() {
        let mut options = KeepOptions::default();
        assert!(options.enable("allowobfuscation"));
        assert!(!options.enable("allowmagic"));
        assert!(options.allow_obfuscation);
        assert!(options.set("allowobfuscation", false));
        assert!(!options.allow_obfuscation);
    }

    #[test]
    fn test_default_specification_matches_any_class_only() {
        let spec = Specification::any_class();
        assert!(spec.is_class_only());
        assert_eq!(spec.label(), "**");
        assert_eq!(spec.kind, ClassKind::Unspecified);
    }

    #[test]
    fn test_all_members_marker() {
        assert!(MemberSpecification::all_members().is_all_members());
        assert!(!MemberSpecification::all_fields().is_all_members());
    }
}
