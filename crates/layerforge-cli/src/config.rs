//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `LAYERFORGE_*` environment variables (`__` separates sections)
//! 3. The file given with `--config`
//! 4. `.layerforge.toml` in the current directory
//! 5. The user config file (see [`AppConfig::config_path`])
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// File name of the per-directory configuration.
pub const LOCAL_CONFIG_FILE: &str = ".layerforge.toml";

const ENV_PREFIX: &str = "LAYERFORGE";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default values for new solutions.
    pub defaults: Defaults,
    /// External toolchain settings.
    pub toolchain: ToolchainConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Directory the solution directory is created in.
    pub output_dir: PathBuf,
    /// Include the Infrastructure layer even without `--infrastructure`.
    pub infrastructure: bool,
    /// Include the Persistence layer even without `--persistence`.
    pub persistence: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    pub program: String,
    pub web_api_template: String,
    pub class_library_template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults {
                output_dir: PathBuf::from("."),
                infrastructure: false,
                persistence: false,
            },
            toolchain: ToolchainConfig {
                program: "dotnet".into(),
                web_api_template: "webapi".into(),
                class_library_template: "classlib".into(),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from every layer, starting from defaults.
    ///
    /// `config_file` is the path passed via `--config`; unlike the user and
    /// local files it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;

        let mut builder = Config::builder()
            .add_source(defaults)
            .add_source(toml_file(&Self::config_path()).required(false))
            .add_source(toml_file(&Self::local_path()).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(toml_file(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.layerforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "layerforge", "layerforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(Self::local_path)
    }

    /// Path to the per-directory configuration file.
    pub fn local_path() -> PathBuf {
        PathBuf::from(LOCAL_CONFIG_FILE)
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_toolchain_is_dotnet() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.toolchain.program, "dotnet");
        assert_eq!(cfg.toolchain.web_api_template, "webapi");
        assert_eq!(cfg.toolchain.class_library_template, "classlib");
    }

    #[test]
    fn default_layers_are_off() {
        let cfg = AppConfig::default();
        assert!(!cfg.defaults.infrastructure);
        assert!(!cfg.defaults.persistence);
        assert_eq!(cfg.defaults.output_dir, PathBuf::from("."));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("layerforge.toml");
        std::fs::write(
            &path,
            "[toolchain]\nprogram = \"/opt/dotnet/dotnet\"\n\n[defaults]\npersistence = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.toolchain.program, "/opt/dotnet/dotnet");
        assert!(cfg.defaults.persistence);
        assert_eq!(cfg.toolchain.class_library_template, "classlib");
    }

    #[test]
    fn explicit_file_must_exist() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn mistyped_value_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "[defaults]\ninfrastructure = \"sometimes\"\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
