//! Per-resource filter records
//!
//! A [`FilterMap`] maps filter keys to filter expressions. It is a shared
//! handle: the configuration keeps the very map the caller passed, so later
//! changes made through the caller's handle show up in the stored state.

use serde::{Serialize, Serializer};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// The filter keys understood by the processing engine.
///
/// Other keys are accepted and stored verbatim; rejecting them is up to the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    /// Applies to every entry name
    Generic,
    Jar,
    Aar,
    Apk,
    War,
    Ear,
    Jmod,
    Zip,
}

impl FilterKey {
    pub const ALL: [FilterKey; 8] = [
        Self::Generic,
        Self::Jar,
        Self::Aar,
        Self::Apk,
        Self::War,
        Self::Ear,
        Self::Jmod,
        Self::Zip,
    ];

    /// Key as written in filter maps
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "filter",
            Self::Jar => "jarfilter",
            Self::Aar => "aarfilter",
            Self::Apk => "apkfilter",
            Self::War => "warfilter",
            Self::Ear => "earfilter",
            Self::Jmod => "jmodfilter",
            Self::Zip => "zipfilter",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FilterKey> for String {
    fn from(key: FilterKey) -> Self {
        key.as_str().to_string()
    }
}

/// Shared, mutable filter record.
///
/// Cloning shares the record. Mutation goes through `&self`, so every holder
/// of a handle sees the same contents.
#[derive(Debug, Clone, Default)]
pub struct FilterMap(Rc<RefCell<BTreeMap<String, String>>>);

impl FilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(self, key: impl Into<String>, filter: impl Into<String>) -> Self {
        self.insert(key, filter);
        self
    }

    /// Set the filter for `key`, replacing any earlier one
    pub fn insert(&self, key: impl Into<String>, filter: impl Into<String>) -> Option<String> {
        self.0.borrow_mut().insert(key.into(), filter.into())
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.0.borrow_mut().remove(key)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    /// Filter for a known key
    pub fn filter(&self, key: FilterKey) -> Option<String> {
        self.get(key.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Keys no [`FilterKey`] answers to
    pub fn unrecognized_keys(&self) -> Vec<String> {
        self.0
            .borrow()
            .keys()
            .filter(|k| FilterKey::from_key(k).is_none())
            .cloned()
            .collect()
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.0.borrow().clone()
    }

    /// True if both handles refer to the same record
    pub fn ptr_eq(&self, other: &FilterMap) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<K, V> FromIterator<(K, V)> for FilterMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for FilterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.borrow().serialize(serializer)
    }
}
