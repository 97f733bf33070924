//! Utility modules for keeprules

pub mod names;

pub use names::{internal_name, split_top_level};
