//! Three-valued name filters
//!
//! A name filter is either unset (feature off), enabled for everything, or
//! enabled for a list of patterns. The states are explicit so the
//! "clear with `None`" transition cannot be confused with switching off.
//!
//! | From \ call          | `enable_default()` | `set_pattern(None)` | `set_pattern(Some(s))`   |
//! |----------------------|--------------------|---------------------|--------------------------|
//! | `Unset`              | `All`              | `All`               | `Patterns(tokens)`       |
//! | `All`                | `All`              | `All`               | `Patterns(tokens)`       |
//! | `Patterns(p)`        | `Patterns(p)`      | `All`               | `Patterns(p ++ tokens)`  |
//!
//! A call that yields no tokens leaves the filter enabled without patterns.

use serde::{Deserialize, Serialize, Serializer};
use tracing::trace;

use crate::utils::names::{internal_name, split_top_level};

/// State of a name filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "patterns", rename_all = "kebab-case")]
pub enum FilterState {
    /// Feature disabled
    #[default]
    Unset,
    /// Feature enabled for every name
    All,
    /// Feature enabled for the listed patterns; never empty
    Patterns(Vec<String>),
}

/// A three-valued, accumulating name filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    state: FilterState,
    class_names: bool,
}

impl Serialize for NameFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state.serialize(serializer)
    }
}

impl NameFilter {
    /// A filter over class or package names; patterns are normalized
    pub fn for_class_names() -> Self {
        Self {
            state: FilterState::Unset,
            class_names: true,
        }
    }

    /// A filter over plain strings (attributes, directories, resources);
    /// patterns are stored as written
    pub fn verbatim() -> Self {
        Self {
            state: FilterState::Unset,
            class_names: false,
        }
    }

    /// Enable the feature without constraining it; leaves patterns alone
    pub fn enable_default(&mut self) {
        if self.state == FilterState::Unset {
            self.state = FilterState::All;
        }
    }

    /// Reset to "everything" on `None`, otherwise append the comma-separated
    /// patterns of `filter`. Duplicates are kept.
    pub fn set_pattern(&mut self, filter: Option<&str>) {
        let Some(filter) = filter else {
            self.state = FilterState::All;
            return;
        };

        let filter = if self.class_names {
            internal_name(filter)
        } else {
            filter.to_string()
        };
        let tokens = split_top_level(&filter);
        trace!(filter = %filter, tokens = tokens.len(), "Extending name filter");

        match &mut self.state {
            FilterState::Patterns(patterns) => patterns.extend(tokens),
            state if tokens.is_empty() => *state = FilterState::All,
            state => *state = FilterState::Patterns(tokens),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state != FilterState::Unset
    }

    /// The accumulated patterns; empty for `Unset` and `All`
    pub fn patterns(&self) -> &[String] {
        match &self.state {
            FilterState::Patterns(patterns) => patterns,
            _ => &[],
        }
    }

    /// True if patterns go through the name normalizer
    pub fn normalizes_names(&self) -> bool {
        self.class_names
    }
}

/// A single name with last-write-wins semantics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SingleName(Option<String>);

impl SingleName {
    /// Replace the stored name; `None` stores the empty name (the root package)
    pub fn set(&mut self, name: Option<&str>) {
        self.0 = Some(name.map(internal_name).unwrap_or_default());
    }

    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}
