//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod init;
pub mod new;
