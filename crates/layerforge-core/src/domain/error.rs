// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can be carried inside reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("{field} name cannot be empty")]
    EmptyName { field: &'static str },

    #[error("invalid {field} name '{name}': {reason}")]
    InvalidName {
        field: &'static str,
        name: String,
        reason: String,
    },

    // ========================================================================
    // Reference Graph Violations
    // ========================================================================
    #[error("reference {from} -> {to} points at a project that is not part of the solution")]
    DanglingReference { from: String, to: String },

    #[error("project layer {layer} cannot reference itself")]
    SelfReference { layer: String },

    #[error("the Domain layer must not reference other projects (found Domain -> {to})")]
    DomainHasReferences { to: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyName { field } => vec![
                format!("Provide a non-empty {field} name"),
                "Example: layerforge new --solution Shop --project Shop".into(),
            ],
            Self::InvalidName { name, reason, .. } => vec![
                format!("'{name}' is not usable as a directory name: {reason}"),
                "Use letters, digits, '.', '-' and '_'".into(),
                "Examples: Shop, Contoso.Billing, my_service".into(),
            ],
            Self::DanglingReference { .. }
            | Self::SelfReference { .. }
            | Self::DomainHasReferences { .. } => vec![
                "The reference layout is fixed; this indicates a bug".into(),
                "Please report this issue at: https://github.com/cosecruz/layerforge/issues".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyName { .. } | Self::InvalidName { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
