//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while carrying out a scaffold plan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The toolchain ran but exited unsuccessfully (or could not be spawned).
    #[error("Command `{command}` failed ({status}){}", format_stderr(.stderr))]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The toolchain executable is missing or not runnable.
    #[error("Toolchain '{program}' is not available: {reason}")]
    ToolchainUnavailable { program: String, reason: String },

    /// A plan step failed; the remaining steps were not attempted.
    #[error("Step {index}/{total} ({step}) failed: {reason}")]
    StepFailed {
        index: usize,
        total: usize,
        step: String,
        reason: String,
    },

    /// Shared adapter state could not be locked (lock poisoned).
    #[error("Adapter state lock poisoned")]
    StoreLockError,
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Re-run the command by hand to see its output: {command}"),
                "Check that the required project templates are installed".into(),
            ],
            Self::ToolchainUnavailable { program, .. } => vec![
                format!("Ensure '{program}' is installed and in your PATH"),
                "Or point layerforge at it: --toolchain /path/to/dotnet".into(),
                "Or set LAYERFORGE_TOOLCHAIN__PROGRAM".into(),
            ],
            Self::StepFailed { index, .. } => vec![
                format!("Steps before {index} completed; the solution is partially created"),
                "Fix the problem and re-run; existing directories are reused".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::CommandFailed { .. } => ErrorCategory::Internal,
            Self::StepFailed { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::ToolchainUnavailable { .. } => ErrorCategory::Configuration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_includes_stderr_when_present() {
        let err = ApplicationError::CommandFailed {
            command: "dotnet new sln -n Shop".into(),
            status: "exit status: 1".into(),
            stderr: "boom".into(),
        };
        assert_eq!(
            err.to_string(),
            "Command `dotnet new sln -n Shop` failed (exit status: 1): boom"
        );
    }

    #[test]
    fn command_failed_without_stderr() {
        let err = ApplicationError::CommandFailed {
            command: "dotnet --version".into(),
            status: "exit status: 2".into(),
            stderr: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "Command `dotnet --version` failed (exit status: 2)"
        );
    }

    #[test]
    fn unavailable_toolchain_is_configuration() {
        let err = ApplicationError::ToolchainUnavailable {
            program: "dotnet".into(),
            reason: "not found".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
