//! errors.rs - Custom error types for the shutter-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//! Rule errors are recoverable and are swallowed at the tier boundary by the
//! rule store; detection errors always reach the caller.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `shutter-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ShutterError {
    /// A keyword or user pattern could not be turned into a matcher.
    #[error("Invalid rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    /// A built-in rule failed to compile. Only reachable through a broken
    /// embedded rule table.
    #[error("Failed to compile built-in rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    /// The text detector failed or is unavailable. The masking pass is aborted.
    #[error("Text detection failed: {0}")]
    DetectionFailure(anyhow::Error),

    #[error("Failed to (de)serialize data: {0}")]
    SerializationError(String),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl ShutterError {
    pub(crate) fn invalid_rule(rule: impl Into<String>, reason: impl ToString) -> Self {
        ShutterError::InvalidRule {
            rule: rule.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for errors that only disable a single rule.
    pub fn is_rule_error(&self) -> bool {
        matches!(self, ShutterError::InvalidRule { .. })
    }
}
