//! Unified error handling for layerforge core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for layerforge core operations.
///
/// This enum wraps all possible errors that can occur when using
/// layerforge-core, providing a unified interface for error handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayerforgeError {
    /// Errors from the domain layer (invalid names, broken layering rules).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (filesystem and toolchain failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl LayerforgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in layerforge".into(),
                "Please report this issue at: https://github.com/cosecruz/layerforge/issues"
                    .into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The step-level failure, if this error came from executing a plan.
    pub fn failed_step(&self) -> Option<usize> {
        match self {
            Self::Application(ApplicationError::StepFailed { index, .. }) => Some(*index),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type LayerforgeResult<T> = Result<T, LayerforgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_is_validation() {
        let err: LayerforgeError = DomainError::EmptyName { field: "solution" }.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn step_failure_exposes_index() {
        let err: LayerforgeError = ApplicationError::StepFailed {
            index: 4,
            total: 14,
            step: "create web-api project Shop.Api".into(),
            reason: "boom".into(),
        }
        .into();
        assert_eq!(err.failed_step(), Some(4));
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
