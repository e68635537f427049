//! Human, plain and JSON output on stdout.
//!
//! Diagnostics never go through here; they are tracing events on stderr.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::warn;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            resolved_format: resolve_format(
                args.output_format,
                &config.output.format,
                io::stdout().is_terminal(),
            ),
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// `✓ <msg>` in green.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(Tone::Success, msg)
    }

    /// `⚠ <msg>` in yellow.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(Tone::Warning, msg)
    }

    /// `ℹ <msg>` in blue.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(Tone::Info, msg)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(text)
        } else {
            self.term.write_line(&text.cyan().bold().to_string())
        }
    }

    /// Pretty-printed JSON document. Written even in quiet mode.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value)?;
        self.term.write_line(&text)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    /// No human-oriented lines in quiet or JSON mode.
    fn suppressed(&self) -> bool {
        self.quiet || self.is_json()
    }

    fn marked(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let symbol = tone.symbol();
        let line = if self.no_color {
            format!("{symbol} {msg}")
        } else {
            match tone {
                Tone::Success => format!("{} {}", symbol.green().bold(), msg.green()),
                Tone::Warning => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
                Tone::Info => format!("{} {}", symbol.blue().bold(), msg.blue()),
            }
        };
        self.term.write_line(&line)
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Info,
}

impl Tone {
    fn symbol(self) -> &'static str {
        match self {
            Tone::Success => "\u{2713}",
            Tone::Warning => "\u{26a0}",
            Tone::Info => "\u{2139}",
        }
    }
}

/// The flag wins unless it is `auto`; then the configured format applies, and
/// a configured `auto` picks by terminal.
fn resolve_format(flag: OutputFormat, configured: &str, stdout_is_tty: bool) -> OutputFormat {
    let requested = match flag {
        OutputFormat::Auto => OutputFormat::from_str(configured, true).unwrap_or_else(|_| {
            warn!(format = configured, "Unknown output.format in config, using auto");
            OutputFormat::Auto
        }),
        explicit => explicit,
    };

    match requested {
        OutputFormat::Auto if stdout_is_tty => OutputFormat::Human,
        OutputFormat::Auto => OutputFormat::Plain,
        other => other,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: OutputFormat::Plain, // avoid TTY detection in tests
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.is_quiet());
    }

    #[test]
    fn no_color_flag_reported() {
        assert!(make_manager(false, false).supports_color());
        assert!(!make_manager(false, true).supports_color());
    }

    #[test]
    fn config_no_color_is_honoured() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Plain,
        };
        assert!(!OutputManager::new(&args, &config).supports_color());
    }

    #[test]
    fn explicit_flag_wins_over_config() {
        assert_eq!(
            resolve_format(OutputFormat::Plain, "json", true),
            OutputFormat::Plain
        );
    }

    #[test]
    fn auto_flag_uses_configured_format() {
        assert_eq!(
            resolve_format(OutputFormat::Auto, "json", false),
            OutputFormat::Json
        );
        assert_eq!(
            resolve_format(OutputFormat::Auto, "Human", false),
            OutputFormat::Human
        );
    }

    #[test]
    fn auto_everywhere_picks_by_terminal() {
        assert_eq!(
            resolve_format(OutputFormat::Auto, "auto", true),
            OutputFormat::Human
        );
        assert_eq!(
            resolve_format(OutputFormat::Auto, "auto", false),
            OutputFormat::Plain
        );
    }

    #[test]
    fn unknown_configured_format_falls_back_to_auto() {
        assert_eq!(
            resolve_format(OutputFormat::Auto, "yaml", false),
            OutputFormat::Plain
        );
    }

    #[test]
    fn json_mode_suppresses_text() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            output_format: OutputFormat::Json,
        };
        let out = OutputManager::new(&args, &AppConfig::default());
        assert!(out.is_json());
        assert!(out.suppressed());
    }

    #[test]
    fn tones_have_distinct_symbols() {
        assert_eq!(Tone::Success.symbol(), "\u{2713}");
        assert_ne!(Tone::Warning.symbol(), Tone::Info.symbol());
    }

    #[test]
    fn format_accessor_returns_resolved() {
        let out = make_manager(false, false);
        assert_eq!(out.format(), OutputFormat::Plain);
        assert!(!out.is_json());
    }
}
