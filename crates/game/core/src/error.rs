//! Error infrastructure for condition-core.
//!
//! Two families exist:
//! - [`ConditionError`]: raised by lifecycle operations on an active set
//! - [`CatalogError`]: raised while building or validating a catalog
//!
//! Everything else (removing an absent instance, ticking or aggregating an
//! empty set) is a normal outcome, not an error.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each family has its own error type with specific variants
//! - **Rich Context**: Variants carry the offending condition name
//! - **Severity Classification**: Errors are categorized for handling strategies

use crate::catalog::DurationType;

/// Severity level of an error, used for categorization and handling strategies.
///
/// - **Validation**: Invalid input to a single operation; the set is unchanged
/// - **Fatal**: Broken configuration; the catalog cannot be constructed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown condition name passed to apply
    Validation,

    /// Fatal error - configuration is unusable, cannot continue.
    ///
    /// Examples: incompatibility list naming an unknown condition
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all condition-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, log fields, and testing.
    fn error_code(&self) -> &'static str;
}

/// Errors raised by active-set lifecycle operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionError {
    #[error("condition '{name}' is not in the catalog")]
    UnknownCondition { name: String },
}

impl EngineError for ConditionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownCondition { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCondition { .. } => "UNKNOWN_CONDITION",
        }
    }
}

/// Malformed catalog entries, detected when a catalog is built or validated.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    #[error("condition '{condition}' is incompatible with unknown condition '{references}'")]
    UnknownIncompatibility {
        condition: String,
        references: String,
    },

    #[error("condition '{condition}' is stackable but max_stacks is {max_stacks} (must be >= 1)")]
    InvalidMaxStacks { condition: String, max_stacks: u32 },

    #[error("condition '{condition}' lists itself as incompatible")]
    SelfIncompatible { condition: String },

    #[error("condition '{condition}' has {duration_type} duration but default_duration is 0")]
    ZeroDefaultDuration {
        condition: String,
        duration_type: DurationType,
    },

    #[error("condition '{condition}' has invalid movement modifier {value}")]
    InvalidMovementModifier { condition: String, value: f32 },
}

impl CatalogError {
    /// Name of the catalog entry that failed validation.
    pub fn condition(&self) -> &str {
        match self {
            Self::UnknownIncompatibility { condition, .. }
            | Self::InvalidMaxStacks { condition, .. }
            | Self::SelfIncompatible { condition }
            | Self::ZeroDefaultDuration { condition, .. }
            | Self::InvalidMovementModifier { condition, .. } => condition,
        }
    }
}

impl EngineError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownIncompatibility { .. } => "UNKNOWN_INCOMPATIBILITY",
            Self::InvalidMaxStacks { .. } => "INVALID_MAX_STACKS",
            Self::SelfIncompatible { .. } => "SELF_INCOMPATIBLE",
            Self::ZeroDefaultDuration { .. } => "ZERO_DEFAULT_DURATION",
            Self::InvalidMovementModifier { .. } => "INVALID_MOVEMENT_MODIFIER",
        }
    }
}
