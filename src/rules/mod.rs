//! Rules module - rule model, builder and per-category accumulation

pub mod accumulator;
pub mod builder;
pub mod categories;
pub mod specification;

pub use accumulator::{RuleAccumulator, RuleList};
pub use builder::{Attributes, AttributeValue, MemberBlock, RuleParser, SpecificationBuilder, UnsupportedParser};
pub use categories::RuleCategory;
pub use specification::{
    ClassKind, KeepOptions, MemberKind, MemberSpecification, Modifier, Modifiers, Specification,
};
