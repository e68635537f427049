//! # layerforge CLI
//!
//! Scaffolds a layered .NET solution through the `dotnet` toolchain.
//!
//! ## Startup sequence
//!
//! 1. Normalise argv (`-sln` style flags, implied `new`) and parse it.
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + files + env).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success                                  |
//! |  1   | Internal error or failed scaffold step   |
//! |  2   | User / input error                       |
//! |  4   | Configuration error, missing toolchain   |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, ConfigCommands, GlobalArgs, normalize_args},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod progress;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version land here too and go to stdout.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let explicit = cli
        .global
        .config
        .as_ref()
        .filter(|path| path.exists() || !writes_config(&cli.command));
    let config = match AppConfig::load(explicit) {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return handle_error(err, &cli.global);
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    let global = cli.global.clone();
    match run(cli, config, output) {
        Ok(()) => {
            info!("layerforge completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, &global),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::New(cmd) => commands::new::execute(cmd, cli.global, config, output),
        Commands::Init(cmd) => commands::init::execute(cmd, cli.global, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, cli.global, config, output),
    }
}

/// Commands that may create the `--config` file, so it need not exist yet.
fn writes_config(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Init(_) | Commands::Config(ConfigCommands::Set { .. } | ConfigCommands::Path)
    )
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, global: &GlobalArgs) -> ExitCode {
    err.log();

    // stderr, so the message survives stdout redirection.
    let color = !global.no_color && std::io::stderr().is_terminal();
    eprint!("{}", err.render(global.verbose > 0, color));

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn only_writing_commands_may_name_a_missing_config() {
        let parse = |args: &[&str]| Cli::try_parse_from(normalize_args(args.iter().copied())).unwrap();

        assert!(writes_config(&parse(&["layerforge", "init"]).command));
        assert!(writes_config(
            &parse(&["layerforge", "config", "set", "toolchain.program", "dotnet"]).command
        ));
        assert!(!writes_config(
            &parse(&["layerforge", "config", "get", "toolchain.program"]).command
        ));
        assert!(!writes_config(&parse(&["layerforge", "-sln", "A", "-proj", "B"]).command));
    }

    #[test]
    fn cli_has_author() {
        assert!(Cli::command().get_author().is_some());
    }
}
