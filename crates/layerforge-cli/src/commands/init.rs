//! `layerforge init`: write a default configuration file.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::info;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Create a default layerforge configuration file.
pub fn execute(args: InitArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let config_path = target_path(&args, &global);
    let created = write_default(&config_path, args.force)?;

    if output.is_json() {
        output.json(&json!({ "path": config_path, "created": created }))?;
    } else if created {
        output.success(&format!(
            "Configuration created at {}",
            config_path.display(),
        ))?;
    } else {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
    }

    Ok(())
}

/// `--local` wins, then `--config`, then the user config path.
fn target_path(args: &InitArgs, global: &GlobalArgs) -> PathBuf {
    if args.local {
        AppConfig::local_path()
    } else {
        global.config.clone().unwrap_or_else(AppConfig::config_path)
    }
}

/// Returns `false` when the file exists and `force` is not set.
fn write_default(path: &Path, force: bool) -> CliResult<bool> {
    if path.exists() && !force {
        return Ok(false);
    }

    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CliError::IoError {
            message: format!("Failed to create config directory '{}'", parent.display()),
            source: e,
        })?;
    }

    std::fs::write(path, &toml).map_err(|e| CliError::IoError {
        message: format!("Failed to write config to '{}'", path.display()),
        source: e,
    })?;

    info!(path = %path.display(), "Configuration written");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use tempfile::TempDir;

    fn global(config: Option<PathBuf>) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config,
            output_format: OutputFormat::Plain,
        }
    }

    #[test]
    fn writes_loadable_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        assert!(write_default(&path, false).unwrap());
        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(!write_default(&path, false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        assert!(write_default(&path, true).unwrap());
        assert!(std::fs::read_to_string(&path).unwrap().contains("[toolchain]"));
    }

    #[test]
    fn local_flag_targets_current_directory() {
        let args = InitArgs {
            local: true,
            force: false,
        };
        assert_eq!(
            target_path(&args, &global(Some(PathBuf::from("x.toml")))),
            PathBuf::from(".layerforge.toml")
        );
    }

    #[test]
    fn config_flag_is_used_without_local() {
        let args = InitArgs {
            local: false,
            force: false,
        };
        assert_eq!(
            target_path(&args, &global(Some(PathBuf::from("x.toml")))),
            PathBuf::from("x.toml")
        );
        assert_eq!(target_path(&args, &global(None)), AppConfig::config_path());
    }
}
