//! # Filtered Resource Lists
//!
//! Classpath-like inputs (program inputs, outputs, library resources) are
//! kept as a single list of [`FilteredEntry`] values, each pairing a resource
//! with its optional [`FilterMap`]. Resources and filters therefore can never
//! drift apart: entry *i* of [`FilteredResourceList::resources`] always
//! belongs to entry *i* of [`FilteredResourceList::filters`].
//!
//! Both the resource and the filter map are stored by reference. Nothing here
//! touches the file system, checks existence, or looks inside aggregates.
//!
//! ## Examples
//!
//! ```rust
//! use keeprules::classpath::{FilterKey, FilterMap, FilteredResourceList, Resource};
//!
//! let mut libraries = FilteredResourceList::new();
//! let filter = FilterMap::new().with(FilterKey::Jar, "!**.jar");
//!
//! libraries.push(Resource::path("libs/android.jar"), Some(filter.clone()));
//! libraries.push_unfiltered(Resource::descriptor("java.base.jmod"));
//!
//! // Filters added later are visible through the stored record.
//! filter.insert(FilterKey::Generic, "!module-info.class");
//!
//! assert_eq!(libraries.len(), 2);
//! assert_eq!(libraries.filters().count(), 2);
//! ```

pub mod filter;

pub use filter::{FilterKey, FilterMap};

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::debug;

/// An opaque resource reference: a path, a descriptor, or an aggregate of
/// resources that is stored as one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Path(PathBuf),
    Descriptor(String),
    Aggregate(Vec<ResourceRef>),
}

/// How resources are held: shared, never copied
pub type ResourceRef = Rc<Resource>;

impl Resource {
    pub fn path(path: impl Into<PathBuf>) -> ResourceRef {
        Rc::new(Self::Path(path.into()))
    }

    pub fn descriptor(descriptor: impl Into<String>) -> ResourceRef {
        Rc::new(Self::Descriptor(descriptor.into()))
    }

    pub fn aggregate(parts: impl IntoIterator<Item = ResourceRef>) -> ResourceRef {
        Rc::new(Self::Aggregate(parts.into_iter().collect()))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Descriptor(descriptor) => f.write_str(descriptor),
            Self::Aggregate(parts) => {
                f.write_str("[")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// One resource with its optional filter record
#[derive(Debug, Clone, Serialize)]
pub struct FilteredEntry {
    pub resource: ResourceRef,
    /// `None` means no filtering was requested
    pub filter: Option<FilterMap>,
}

/// Ordered resources, each with its own filter slot
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FilteredResourceList {
    entries: Vec<FilteredEntry>,
}

impl FilteredResourceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resource and its filter record in one step
    pub fn push(&mut self, resource: ResourceRef, filter: Option<FilterMap>) {
        debug!(
            resource = %resource,
            filtered = filter.is_some(),
            position = self.entries.len(),
            "Resource appended"
        );
        self.entries.push(FilteredEntry { resource, filter });
    }

    /// Append a resource with an explicit "no filter" slot
    pub fn push_unfiltered(&mut self, resource: ResourceRef) {
        self.push(resource, None);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FilteredEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[FilteredEntry] {
        &self.entries
    }

    /// Resources in order
    pub fn resources(&self) -> impl Iterator<Item = &ResourceRef> + '_ {
        self.entries.iter().map(|e| &e.resource)
    }

    /// Filter slots in order, one per resource
    pub fn filters(&self) -> impl Iterator<Item = Option<&FilterMap>> + '_ {
        self.entries.iter().map(|e| e.filter.as_ref())
    }
}
