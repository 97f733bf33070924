//! # Rule Accumulator
//!
//! Holds one lazily created, append-only list of specifications per
//! [`RuleCategory`].
//!
//! A category has no list until the first rule targets it. From then on the
//! list only grows, always at the end, and keeps its identity: a
//! [`RuleList`] handle obtained earlier observes every later append.
//!
//! The accumulator is single-threaded by contract; handles are `Rc` based
//! and cannot leave the thread that owns the configuration.

use serde::{Serialize, Serializer};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::debug;

use super::categories::RuleCategory;
use super::specification::Specification;

/// Shared handle to the ordered rule list of one category.
///
/// Cloning the handle shares the list; it never copies it.
#[derive(Debug, Clone, Default)]
pub struct RuleList(Rc<RefCell<Vec<Rc<Specification>>>>);

impl RuleList {
    fn new() -> Self {
        Self::default()
    }

    fn push(&self, specification: Specification) {
        self.0.borrow_mut().push(Rc::new(specification));
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// The specification at `index`, in insertion order
    pub fn get(&self, index: usize) -> Option<Rc<Specification>> {
        self.0.borrow().get(index).cloned()
    }

    /// The specifications currently in the list, in insertion order
    pub fn to_vec(&self) -> Vec<Rc<Specification>> {
        self.0.borrow().clone()
    }

    /// True if both handles refer to the same list
    pub fn ptr_eq(&self, other: &RuleList) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Serialize for RuleList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.borrow().serialize(serializer)
    }
}

/// Per-category rule lists
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct RuleAccumulator {
    lists: BTreeMap<RuleCategory, RuleList>,
}

impl RuleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `specification` at the end of `category`'s list, creating the
    /// list on first use. Never fails.
    pub fn append(&mut self, category: RuleCategory, specification: Specification) {
        let label = specification.label().to_string();
        let list = self.lists.entry(category).or_insert_with(|| {
            debug!(category = category.name(), "Creating rule category");
            RuleList::new()
        });
        list.push(specification);
        debug!(
            category = category.name(),
            rule = %label,
            count = list.len(),
            "Rule appended"
        );
    }

    /// The list of `category`, or `None` if no rule ever targeted it
    pub fn get(&self, category: RuleCategory) -> Option<RuleList> {
        self.lists.get(&category).cloned()
    }

    /// Number of rules in `category`; zero when the list does not exist
    pub fn count(&self, category: RuleCategory) -> usize {
        self.lists.get(&category).map(RuleList::len).unwrap_or(0)
    }

    /// Categories that have a list, in category order
    pub fn categories(&self) -> impl Iterator<Item = RuleCategory> + '_ {
        self.lists.keys().copied()
    }

    /// Total number of rules over all categories
    pub fn total(&self) -> usize {
        self.lists.values().map(RuleList::len).sum()
    }
}
