//! Error types for keeprules
//!
//! This module defines custom error types using `thiserror`. Building a rule
//! can fail; accumulating an already built rule never does.

use std::fmt;
use thiserror::Error;

/// Main error type for keeprules
#[derive(Error, Debug)]
pub enum KeepRulesError {
    /// A rule could not be turned into a specification
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Configuration document errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Output rendering or writing errors
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Failure reported by a rule-text grammar.
///
/// Carries a human-readable message and, where the grammar knows it, the
/// byte offset into the rule text at which parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong
    pub message: String,
    /// Byte offset into the rule text, if known
    pub offset: Option<usize>,
}

impl ParseError {
    /// Create a parse error without position information
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: None,
        }
    }

    /// Create a parse error pointing at a byte offset
    pub fn at(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset: Some(offset),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{} (at offset {})", self.message, offset),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while building a specification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The rule text was rejected by the grammar
    #[error("Failed to parse rule: {0}")]
    Parse(#[from] ParseError),

    /// A recognized attribute carried a value that cannot be used
    #[error("Invalid value '{value}' for attribute '{key}': {reason}")]
    InvalidAttribute {
        /// Attribute key
        key: String,
        /// Offending value, as written
        value: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl RuleError {
    pub(crate) fn invalid_attribute(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Errors related to configuration documents
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The document is not valid TOML or does not fit the schema
    #[error("Failed to decode config: {0}")]
    Decode(#[from] toml::de::Error),

    /// The configuration could not be serialized
    #[error("Failed to serialize config: {message}")]
    Serialize {
        /// Description of the failure
        message: String,
    },

    /// A category name that no rule category answers to
    #[error("Unknown rule category '{0}'")]
    UnknownCategory(String),

    /// An entry whose fields contradict each other
    #[error("Invalid {section} entry #{index}: {message}")]
    InvalidEntry {
        /// Document section, e.g. `rules` or `injars`
        section: &'static str,
        /// Zero-based position of the entry in its section
        index: usize,
        /// What is wrong with it
        message: String,
    },

    /// A `[names]` entry that cannot be applied
    #[error("Invalid names entry '{key}': {message}")]
    InvalidName {
        /// Setting key as written in the document
        key: String,
        /// What is wrong with it
        message: String,
    },

    /// A rule entry that failed to build
    #[error("Rule #{index} ({category}) rejected: {source}")]
    RuleRejected {
        /// Zero-based position of the rule in the document
        index: usize,
        /// Category the rule targeted
        category: String,
        /// The underlying rule error
        source: RuleError,
    },
}

/// Errors that occur while rendering or writing output
#[derive(Error, Debug)]
pub enum OutputError {
    /// JSON serialization failed
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write to a file
    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Man page rendering failed
    #[error("Failed to render man page: {0}")]
    ManPage(String),
}

impl From<toml::de::Error> for KeepRulesError {
    fn from(err: toml::de::Error) -> Self {
        KeepRulesError::Config(ConfigError::Decode(err))
    }
}

impl From<toml::ser::Error> for KeepRulesError {
    fn from(err: toml::ser::Error) -> Self {
        KeepRulesError::Config(ConfigError::Serialize {
            message: err.to_string(),
        })
    }
}

impl From<serde_json::Error> for KeepRulesError {
    fn from(err: serde_json::Error) -> Self {
        KeepRulesError::Output(OutputError::Json(err))
    }
}

impl From<ParseError> for KeepRulesError {
    fn from(err: ParseError) -> Self {
        KeepRulesError::Rule(RuleError::Parse(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_with_offset() {
        let err = ParseError::at("Expected class name", 12);
        assert_eq!(err.to_string(), "Expected class name (at offset 12)");
    }

    #[test]
    fn test_parse_error_display_without_offset() {
        let err = ParseError::new("Unexpected end of rule");
        assert_eq!(err.to_string(), "Unexpected end of rule");
    }

    #[test]
    fn test_rule_error_wraps_parse_error() {
        let err: KeepRulesError = ParseError::new("bad").into();
        assert!(matches!(err, KeepRulesError::Rule(RuleError::Parse(_))));
        assert!(err.to_string().contains("Failed to parse rule: bad"));
    }

    #[test]
    fn test_invalid_attribute_message() {
        let err = RuleError::invalid_attribute("access", "pubic", "unknown modifier");
        assert_eq!(
            err.to_string(),
            "Invalid value 'pubic' for attribute 'access': unknown modifier"
        );
    }
}
