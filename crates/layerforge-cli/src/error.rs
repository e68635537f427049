//! CLI error type, its exit codes, and how it is shown to the user.
//!
//! Core errors arrive wrapped in [`CliError::Core`] and keep their own
//! suggestions; the CLI only decides the exit code and the rendering.

use std::error::Error;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use thiserror::Error;
use tracing::{debug, error, warn};

use layerforge_core::error::{ErrorCategory as CoreCategory, LayerforgeError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `layerforge-core` or an adapter.
    #[error("Scaffolding failed: {0}")]
    Core(#[from] LayerforgeError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Run 'layerforge config path' to see which file is used".into(),
                "Use 'layerforge init --force' to recreate a default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => vec![
                "Operation was cancelled".into(),
                "No changes were made".into(),
                "Pass --yes to skip the confirmation prompt".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::UserError,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Message, cause chain (verbose only), suggestions, and a hint to
    /// rerun with `-v` when not verbose.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let style = Style { color };
        let mut out = String::new();

        let _ = writeln!(out, "\n{}", style.error(&format!("\u{2717} Error: {self}")));

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(out, "  {} {err}", style.dim("caused by:"));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(out, "\n{}", style.heading("Suggestions:"));
            for suggestion in &suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{}",
                style.dim("Use -v / --verbose for more details.")
            );
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => warn!(error = %self, "User error"),
            ErrorCategory::Configuration => error!(error = %self, "Configuration error"),
            ErrorCategory::Internal => error!(error = %self, "Internal error"),
        }

        if let Some(source) = self.source() {
            debug!(cause = %source, "Error source");
        }
    }
}

/// ANSI styling that collapses to plain text when colour is off.
struct Style {
    color: bool,
}

impl Style {
    fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red().bold().to_string())
    }

    fn heading(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow().bold().to_string())
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, |t| t.dimmed().to_string())
    }

    fn paint(&self, text: &str, styled: fn(&str) -> String) -> String {
        if self.color { styled(text) } else { text.to_string() }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, cancellation).
    UserError,
    /// Configuration error, including a missing toolchain.
    Configuration,
    /// Internal/system error, including a failed scaffold step.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerforge_core::{application::ApplicationError, domain::DomainError};
    use std::io;

    fn step_failure() -> CliError {
        CliError::Core(
            ApplicationError::StepFailed {
                index: 4,
                total: 13,
                step: "create web-api project Shop.Api".into(),
                reason: "exit status: 1".into(),
            }
            .into(),
        )
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        let err = CliError::InvalidInput {
            message: "x".into(),
            source: None,
        };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(CliError::Cancelled.exit_code(), 2);
    }

    #[test]
    fn invalid_name_is_user_error() {
        let err = CliError::Core(DomainError::EmptyName { field: "solution" }.into());
        assert_eq!(err.category(), ErrorCategory::UserError);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_toolchain_is_configuration() {
        let err = CliError::Core(
            ApplicationError::ToolchainUnavailable {
                program: "dotnet".into(),
                reason: "No such file or directory".into(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 4);
        assert_eq!(CliError::config("x").exit_code(), 4);
    }

    #[test]
    fn step_failure_is_internal() {
        assert_eq!(step_failure().exit_code(), 1);
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn plain_render_names_the_failed_step() {
        let s = step_failure().render(false, false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Step 4/13"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
        assert!(!s.contains('\u{1b}'));
    }

    #[test]
    fn verbose_render_omits_hint() {
        let s = CliError::Cancelled.render(true, false);
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn verbose_render_shows_cause() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        assert!(err.render(true, false).contains("caused by: disk full"));
        assert!(!err.render(false, false).contains("disk full"));
    }

    #[test]
    fn colored_render_uses_ansi() {
        assert!(CliError::Cancelled.render(false, true).contains('\u{1b}'));
    }

    #[test]
    fn cancelled_suggests_yes() {
        assert!(
            CliError::Cancelled
                .suggestions()
                .iter()
                .any(|s| s.contains("--yes"))
        );
    }
}
