//! Configuration document module
//!
//! Section types of a `keeprules.toml` document. [`loader::ConfigDocument`]
//! ties them together and applies them to a
//! [`Configurator`](crate::configurator::Configurator).

pub mod loader;

pub use loader::ConfigDocument;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::rules::Attributes;

/// Value of a `[names]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NameValue {
    /// `true` enables a filter for everything; `false` leaves it alone
    Switch(bool),
    /// One comma-separated filter, or a single name
    One(String),
    /// Several filters, applied in order
    Many(Vec<String>),
}

/// A `[[injars]]`, `[[outjars]]` or `[[library_jars]]` entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceEntry {
    /// A single file or directory
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// A non-path descriptor, e.g. a module name
    #[serde(default)]
    pub descriptor: Option<String>,

    /// Several paths stored as one aggregate element
    #[serde(default)]
    pub paths: Option<Vec<PathBuf>>,

    /// Filter map; keys are filter kinds such as `jarfilter`
    #[serde(default)]
    pub filter: Option<BTreeMap<String, String>>,
}

/// Member entry kinds inside a rule's `members` array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberEntryKind {
    Field,
    Method,
    Constructor,
    All,
    AllFields,
    AllMethods,
}

/// One member of a rule; remaining keys are member attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberEntry {
    pub kind: MemberEntryKind,

    #[serde(flatten)]
    pub attributes: Attributes,
}

/// A `[[rules]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    /// Category name, e.g. `keep` or `assume-no-side-effects`
    pub category: String,

    /// Rule text for the grammar
    #[serde(default)]
    pub text: Option<String>,

    /// Class attribute map
    #[serde(default)]
    pub attributes: Option<Attributes>,

    /// Member block; present (even empty) selects the map-plus-block shape
    #[serde(default)]
    pub members: Option<Vec<MemberEntry>>,
}
