//! Scalar flag store
//!
//! Plain boolean, integer and string settings. Each is changed by one
//! single-purpose call and read by the processing engine as is.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Scalar settings of a configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    pub shrink: bool,
    pub optimize: bool,
    pub obfuscate: bool,
    pub preverify: bool,

    /// Number of optimization passes
    pub optimization_passes: u32,
    pub allow_access_modification: bool,
    pub merge_interfaces_aggressively: bool,

    pub overload_aggressively: bool,
    pub use_unique_class_member_names: bool,
    pub use_mixed_case_class_names: bool,
    pub keep_parameter_names: bool,
    /// Replacement for the source file attribute; `Some("")` clears it
    pub rename_source_file_attribute: Option<String>,

    pub skip_non_public_library_classes: bool,
    pub skip_non_public_library_class_members: bool,
    pub ignore_warnings: bool,
    pub verbose: bool,
    pub force_processing: bool,
    pub android: bool,
    pub micro_edition: bool,
    /// Class file version to emit, e.g. `"1.8"` or `"11"`
    pub target_class_version: Option<String>,

    pub print_seeds: Option<PathBuf>,
    pub print_usage: Option<PathBuf>,
    pub print_mapping: Option<PathBuf>,
    pub apply_mapping: Option<PathBuf>,
    pub obfuscation_dictionary: Option<PathBuf>,
    pub print_configuration: Option<PathBuf>,
    pub dump: Option<PathBuf>,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            shrink: true,
            optimize: true,
            obfuscate: true,
            preverify: true,
            optimization_passes: 1,
            allow_access_modification: false,
            merge_interfaces_aggressively: false,
            overload_aggressively: false,
            use_unique_class_member_names: false,
            use_mixed_case_class_names: true,
            keep_parameter_names: false,
            rename_source_file_attribute: None,
            skip_non_public_library_classes: false,
            skip_non_public_library_class_members: true,
            ignore_warnings: false,
            verbose: false,
            force_processing: false,
            android: false,
            micro_edition: false,
            target_class_version: None,
            print_seeds: None,
            print_usage: None,
            print_mapping: None,
            apply_mapping: None,
            obfuscation_dictionary: None,
            print_configuration: None,
            dump: None,
        }
    }
}
