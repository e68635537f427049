//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "layerforge",
    bin_name = "layerforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered .NET solution scaffolding",
    long_about = "layerforge creates a .NET solution with Api, Domain and Application \
                  projects (plus optional Infrastructure and Persistence), adds them \
                  to the solution and wires their project references.",
    after_help = "EXAMPLES:\n\
        \x20 layerforge new --solution Shop --project Shop\n\
        \x20 layerforge new --sln Shop --proj Contoso.Shop --infra --pers\n\
        \x20 layerforge -sln Shop -proj Shop -infra\n\
        \x20 layerforge completions bash > /usr/share/bash-completion/completions/layerforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new layered solution.
    #[command(
        visible_alias = "n",
        about = "Create a new layered solution",
        after_help = "EXAMPLES:\n\
            \x20 layerforge new --solution Shop --project Shop\n\
            \x20 layerforge new -s Shop -p Shop --infrastructure --persistence\n\
            \x20 layerforge new -s Shop -p Shop --dry-run --output-format json"
    )]
    New(NewArgs),

    /// Initialise a layerforge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 layerforge init           # user config location\n\
            \x20 layerforge init --local   # .layerforge.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 layerforge completions bash > ~/.local/share/bash-completion/completions/layerforge\n\
            \x20 layerforge completions zsh  > ~/.zfunc/_layerforge\n\
            \x20 layerforge completions fish > ~/.config/fish/completions/layerforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the layerforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 layerforge config get toolchain.program\n\
            \x20 layerforge config set defaults.infrastructure true\n\
            \x20 layerforge config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `layerforge new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Solution name; also the name of the solution directory.
    #[arg(
        short = 's',
        long = "solution",
        visible_alias = "sln",
        value_name = "NAME",
        help = "Name of the solution"
    )]
    pub solution: String,

    /// Base project name; layer projects are named `<NAME>.<Layer>`.
    #[arg(
        short = 'p',
        long = "project",
        visible_alias = "proj",
        value_name = "NAME",
        help = "Base name of the projects"
    )]
    pub project: String,

    /// Include the Infrastructure layer.
    #[arg(
        long = "infrastructure",
        visible_alias = "infra",
        help = "Add infrastructure project"
    )]
    pub infrastructure: bool,

    /// Include the Persistence layer.
    #[arg(
        long = "persistence",
        visible_alias = "pers",
        help = "Add persistence project"
    )]
    pub persistence: bool,

    /// Directory the solution directory is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Toolchain executable to run instead of the configured one.
    #[arg(
        long = "toolchain",
        value_name = "PROGRAM",
        help = "Toolchain executable (default: dotnet)"
    )]
    pub toolchain: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Print the plan without creating anything.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `layerforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.layerforge.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `layerforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `layerforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `toolchain.program`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── argv normalisation ────────────────────────────────────────────────────────

/// Single-dash long spellings accepted for compatibility.
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-sln", "--solution"),
    ("-proj", "--project"),
    ("-infra", "--infrastructure"),
    ("-pers", "--persistence"),
];

const SUBCOMMANDS: &[&str] = &["new", "n", "init", "completions", "config", "help"];

const SCAFFOLD_FLAGS: &[&str] = &["--solution", "--sln", "--project", "--proj", "-s", "-p"];

/// Rewrite raw argv before clap sees it.
///
/// - `-sln`, `-proj`, `-infra`, `-pers` become their `--long` forms, and
///   `-sln=Shop` becomes `--solution=Shop`.
/// - If scaffold flags appear with no subcommand before them, `new` is
///   inserted, so `layerforge -sln Shop -proj Shop` works.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args
        .into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str().and_then(legacy_long_form) {
            Some(long) => OsString::from(long),
            None => arg,
        })
        .collect();

    let first_scaffold_flag = args
        .iter()
        .skip(1)
        .position(|arg| arg.to_str().is_some_and(is_scaffold_flag))
        .map(|i| i + 1);

    if let Some(pos) = first_scaffold_flag {
        let has_subcommand = args[1..pos]
            .iter()
            .any(|arg| arg.to_str().is_some_and(|s| SUBCOMMANDS.contains(&s)));
        if !has_subcommand {
            args.insert(1, OsString::from("new"));
        }
    }

    args
}

fn legacy_long_form(arg: &str) -> Option<String> {
    let (flag, value) = match arg.split_once('=') {
        Some((flag, value)) => (flag, Some(value)),
        None => (arg, None),
    };
    let (_, long) = LEGACY_FLAGS.iter().find(|(short, _)| *short == flag)?;
    Some(match value {
        Some(value) => format!("{long}={value}"),
        None => (*long).to_string(),
    })
}

fn is_scaffold_flag(arg: &str) -> bool {
    SCAFFOLD_FLAGS.iter().any(|flag| {
        arg == *flag
            || (flag.starts_with("--")
                && arg
                    .strip_prefix(flag)
                    .is_some_and(|rest| rest.starts_with('=')))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(args: &[&str]) -> Vec<String> {
        normalize_args(args.iter().copied())
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn legacy_spellings_become_long_flags() {
        assert_eq!(
            normalized(&["layerforge", "new", "-sln", "Shop", "-proj", "Shop", "-infra", "-pers"]),
            [
                "layerforge",
                "new",
                "--solution",
                "Shop",
                "--project",
                "Shop",
                "--infrastructure",
                "--persistence"
            ]
        );
    }

    #[test]
    fn implies_new_without_subcommand() {
        assert_eq!(
            normalized(&["layerforge", "-v", "-sln", "Shop", "-proj", "Shop"]),
            [
                "layerforge",
                "new",
                "-v",
                "--solution",
                "Shop",
                "--project",
                "Shop"
            ]
        );
    }

    #[test]
    fn implies_new_for_equals_form() {
        assert_eq!(
            normalized(&["layerforge", "--solution=Shop", "--project=Shop"]),
            ["layerforge", "new", "--solution=Shop", "--project=Shop"]
        );
    }

    #[test]
    fn legacy_equals_form_keeps_its_value() {
        assert_eq!(
            normalized(&["layerforge", "new", "-sln=Shop", "-proj=Contoso"]),
            ["layerforge", "new", "--solution=Shop", "--project=Contoso"]
        );
    }

    #[test]
    fn legacy_equals_form_implies_new() {
        assert_eq!(
            normalized(&["layerforge", "-sln=Shop", "-proj=Shop", "-infra"]),
            [
                "layerforge",
                "new",
                "--solution=Shop",
                "--project=Shop",
                "--infrastructure"
            ]
        );
    }

    #[test]
    fn legacy_equals_form_parses_names() {
        let cli = Cli::try_parse_from(normalize_args(["layerforge", "-sln=Shop", "-proj=Contoso"]))
            .unwrap();
        let Commands::New(args) = cli.command else {
            panic!("expected new");
        };
        assert_eq!(args.solution, "Shop");
        assert_eq!(args.project, "Contoso");
    }

    #[test]
    fn values_that_look_like_legacy_flags_are_untouched() {
        assert_eq!(legacy_long_form("-slnx"), None);
        assert_eq!(legacy_long_form("Shop=1"), None);
    }

    #[test]
    fn leaves_explicit_subcommand_alone() {
        let args = ["layerforge", "n", "--sln", "Shop", "--proj", "Shop"];
        assert_eq!(normalized(&args), args);
    }

    #[test]
    fn leaves_other_commands_alone() {
        let args = ["layerforge", "config", "get", "toolchain.program"];
        assert_eq!(normalized(&args), args);
        let args = ["layerforge", "--help"];
        assert_eq!(normalized(&args), args);
    }

    #[test]
    fn legacy_values_are_not_rewritten_after_subcommand_detection() {
        // A solution literally named "new" still gets the implied subcommand.
        assert_eq!(
            normalized(&["layerforge", "--solution", "new", "--project", "P"]),
            ["layerforge", "new", "--solution", "new", "--project", "P"]
        );
    }

    #[test]
    fn parses_normalized_legacy_invocation() {
        let cli = Cli::try_parse_from(normalize_args([
            "layerforge",
            "-sln",
            "Shop",
            "-proj",
            "Shop",
            "-pers",
        ]))
        .unwrap();
        match cli.command {
            Commands::New(args) => {
                assert_eq!(args.solution, "Shop");
                assert_eq!(args.project, "Shop");
                assert!(args.persistence);
                assert!(!args.infrastructure);
            }
            other => panic!("expected new, got {other:?}"),
        }
    }

    #[test]
    fn visible_aliases_parse() {
        let cli = Cli::try_parse_from([
            "layerforge", "new", "--sln", "Shop", "--proj", "Shop", "--infra",
        ])
        .unwrap();
        let Commands::New(args) = cli.command else {
            panic!("expected new");
        };
        assert!(args.infrastructure);
    }

    #[test]
    fn solution_and_project_are_required() {
        assert!(Cli::try_parse_from(["layerforge", "new", "--solution", "Shop"]).is_err());
        assert!(Cli::try_parse_from(["layerforge", "new", "--project", "Shop"]).is_err());
    }
}
