//! Exit codes for the CLI
//!
//! Standard exit codes used by the keeprules CLI so build tools can tell a
//! bad rule from a broken setup.
//!
//! # Exit Code Reference
//!
//! | Code | Constant | Meaning | Example |
//! |------|----------|---------|---------|
//! | 0 | `SUCCESS` | Success | Document applied cleanly |
//! | 1 | `INVALID_RULES` | Invalid rules | Unknown modifier, rule text without a grammar |
//! | 3 | `ERROR` | Runtime error | Document not found, invalid TOML |
//!
//! # Usage
//!
//! ```rust,ignore
//! use keeprules::cli::exit_codes;
//!
//! std::process::exit(exit_codes::INVALID_RULES);
//! ```

/// Success - the command completed normally.
pub const SUCCESS: i32 = 0;

/// A rule entry could not be turned into a specification.
///
/// Used when:
/// - A recognized attribute has an unusable value
/// - Rule text was rejected by the grammar
pub const INVALID_RULES: i32 = 1;

/// Runtime error (file not found, malformed document, write failure).
pub const ERROR: i32 = 3;
