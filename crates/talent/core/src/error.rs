//! Common error infrastructure for talent-core.
//!
//! Domain-specific errors (`OutOfRangeError`, `InvalidLevelError`,
//! `UnknownKeyError`, `BuildError`) live next to the operations that raise
//! them. This module provides the shared classification used by callers to
//! decide how to surface a rejection.
//!
//! Nothing in the engine is retried: every error is an immediately reported
//! rejection of an invalid state transition or query, and the build is left
//! unchanged.

/// Severity level of an error, used for categorization and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input from the editor; reject the edit and keep the build.
    ///
    /// Examples: rank above 12, level below the allocation's minimum
    Validation,

    /// Caller programming error.
    ///
    /// Examples: querying a key that no loaded talent grants
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates a bug in the caller.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all talent-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who has to fix it, not by impact
pub trait TalentError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
