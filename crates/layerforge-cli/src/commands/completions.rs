//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::{
    cli::{Cli, CompletionsArgs, Shell},
    error::CliResult,
};

const BIN_NAME: &str = "layerforge";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    write_completions(args.shell, &mut io::stdout());
    Ok(())
}

fn write_completions(shell: Shell, buf: &mut dyn io::Write) {
    match shell {
        Shell::Bash => emit(shells::Bash, buf),
        Shell::Zsh => emit(shells::Zsh, buf),
        Shell::Fish => emit(shells::Fish, buf),
        Shell::PowerShell => emit(shells::PowerShell, buf),
        Shell::Elvish => emit(shells::Elvish, buf),
    }
}

fn emit<G: Generator>(generator: G, buf: &mut dyn io::Write) {
    let mut cmd = Cli::command();
    generate(generator, &mut cmd, BIN_NAME, buf);
}
