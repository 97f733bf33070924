//! keeprules Library
//!
//! The configuration-accumulation core of a bytecode shrinker build
//! integration. A build script issues configuration calls against a
//! [`Configurator`]; the result is a [`Configuration`] holding per-category
//! rule lists, filtered resource lists, name filters and scalar flags, ready
//! to hand to the processing engine.

pub mod classpath;
pub mod cli;
pub mod config;
pub mod configuration;
pub mod configurator;
pub mod error;
pub mod rules;
pub mod settings;
pub mod utils;

pub use configuration::Configuration;
pub use configurator::Configurator;
pub use error::KeepRulesError;
