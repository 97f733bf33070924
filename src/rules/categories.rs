//! Rule categories
//!
//! Each category is a named bucket of specifications serving one policy
//! purpose for the processing engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// The rule categories known to the processing engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    /// Classes and members that must not be removed or renamed
    Keep,
    /// Members to preserve if their class is preserved
    KeepClassMembers,
    /// Classes to preserve if all listed members are present
    KeepClassesWithMembers,
    /// Classes that must not be renamed
    KeepNames,
    KeepClassMemberNames,
    KeepClassesWithMemberNames,
    /// Methods whose calls may be removed when their result is unused
    AssumeNoSideEffects,
    AssumeNoExternalSideEffects,
    AssumeNoEscapingParameters,
    AssumeNoExternalReturnValues,
    /// Fields and methods with fixed values
    AssumeValues,
    /// Ask the engine to explain why matching classes are kept
    WhyAreYouKeeping,
}

impl RuleCategory {
    /// Every category, in declaration order
    pub const ALL: [RuleCategory; 12] = [
        Self::Keep,
        Self::KeepClassMembers,
        Self::KeepClassesWithMembers,
        Self::KeepNames,
        Self::KeepClassMemberNames,
        Self::KeepClassesWithMemberNames,
        Self::AssumeNoSideEffects,
        Self::AssumeNoExternalSideEffects,
        Self::AssumeNoEscapingParameters,
        Self::AssumeNoExternalReturnValues,
        Self::AssumeValues,
        Self::WhyAreYouKeeping,
    ];

    /// Kebab-case name used in documents and output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::KeepClassMembers => "keep-class-members",
            Self::KeepClassesWithMembers => "keep-classes-with-members",
            Self::KeepNames => "keep-names",
            Self::KeepClassMemberNames => "keep-class-member-names",
            Self::KeepClassesWithMemberNames => "keep-classes-with-member-names",
            Self::AssumeNoSideEffects => "assume-no-side-effects",
            Self::AssumeNoExternalSideEffects => "assume-no-external-side-effects",
            Self::AssumeNoEscapingParameters => "assume-no-escaping-parameters",
            Self::AssumeNoExternalReturnValues => "assume-no-external-return-values",
            Self::AssumeValues => "assume-values",
            Self::WhyAreYouKeeping => "why-are-you-keeping",
        }
    }

    /// Look a category up by name; `_` and `-` are interchangeable
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|c| c.name() == wanted)
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleCategory {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ConfigError::UnknownCategory(s.to_string()))
    }
}
