//! `layerforge config`: read and write configuration values.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::info;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Bool,
    Text,
    OneOf(&'static [&'static str]),
}

const FORMATS: &[&str] = &["auto", "human", "plain", "json"];

/// Every settable key and the type its value must have.
const KEYS: &[(&str, ValueKind)] = &[
    ("defaults.output_dir", ValueKind::Text),
    ("defaults.infrastructure", ValueKind::Bool),
    ("defaults.persistence", ValueKind::Bool),
    ("toolchain.program", ValueKind::Text),
    ("toolchain.web_api_template", ValueKind::Text),
    ("toolchain.class_library_template", ValueKind::Text),
    ("output.no_color", ValueKind::Bool),
    ("output.format", ValueKind::OneOf(FORMATS)),
];

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&json!({ "key": key, "value": value }))?;
            } else {
                output.print(&value)?;
            }
        }

        ConfigCommands::Set { key, value } => {
            let path = writable_path(&global);
            set_config_value(&path, &key, &value)?;
            info!(%key, %value, path = %path.display(), "Configuration updated");
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            let path = writable_path(&global);
            if output.is_json() {
                output.json(&json!({ "path": path, "exists": path.exists() }))?;
            } else {
                output.print(&path.display().to_string())?;
            }
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// The file `set` edits: `--config` if given, else the user config.
fn writable_path(global: &GlobalArgs) -> PathBuf {
    global.config.clone().unwrap_or_else(AppConfig::config_path)
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let value = match key {
        "defaults.output_dir" => config.defaults.output_dir.display().to_string(),
        "defaults.infrastructure" => config.defaults.infrastructure.to_string(),
        "defaults.persistence" => config.defaults.persistence.to_string(),
        "toolchain.program" => config.toolchain.program.clone(),
        "toolchain.web_api_template" => config.toolchain.web_api_template.clone(),
        "toolchain.class_library_template" => config.toolchain.class_library_template.clone(),
        "output.no_color" => config.output.no_color.to_string(),
        "output.format" => config.output.format.clone(),
        _ => return Err(unknown_key(key)),
    };
    Ok(value)
}

fn set_config_value(path: &Path, key: &str, raw: &str) -> CliResult<()> {
    let kind = KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| unknown_key(key))?;
    let value = parse_value(key, kind, raw)?;
    let (section, field) = key.split_once('.').ok_or_else(|| unknown_key(key))?;

    let mut table = read_table(path)?;
    let entry = table
        .entry(section)
        .or_insert(toml::Value::Table(toml::Table::new()));
    let toml::Value::Table(section_table) = entry else {
        return Err(CliError::config(format!(
            "'{section}' in {} is not a table",
            path.display()
        )));
    };
    section_table.insert(field.to_string(), value);

    let text = toml::to_string_pretty(&table).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise {}: {e}", path.display()),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CliError::IoError {
            message: format!("Failed to create config directory '{}'", parent.display()),
            source: e,
        })?;
    }
    std::fs::write(path, text).map_err(|e| CliError::IoError {
        message: format!("Failed to write config to '{}'", path.display()),
        source: e,
    })
}

fn parse_value(key: &str, kind: ValueKind, raw: &str) -> CliResult<toml::Value> {
    match kind {
        ValueKind::Text => Ok(toml::Value::String(raw.to_string())),
        ValueKind::Bool => raw
            .parse::<bool>()
            .map(toml::Value::Boolean)
            .map_err(|e| CliError::InvalidInput {
                message: format!("'{key}' expects true or false, got '{raw}'"),
                source: Some(Box::new(e)),
            }),
        ValueKind::OneOf(allowed) => {
            let lower = raw.to_ascii_lowercase();
            if allowed.contains(&lower.as_str()) {
                Ok(toml::Value::String(lower))
            } else {
                Err(CliError::InvalidInput {
                    message: format!("'{key}' expects one of {}, got '{raw}'", allowed.join(", ")),
                    source: None,
                })
            }
        }
    }
}

fn read_table(path: &Path) -> CliResult<toml::Table> {
    if !path.exists() {
        return Ok(toml::Table::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| CliError::IoError {
        message: format!("Failed to read config from '{}'", path.display()),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| CliError::ConfigError {
        message: format!("Failed to parse {}", path.display()),
        source: Some(Box::new(e)),
    })
}

fn unknown_key(key: &str) -> CliError {
    let known: Vec<&str> = KEYS.iter().map(|(k, _)| *k).collect();
    CliError::config(format!(
        "Unknown config key: '{key}' (known keys: {})",
        known.join(", ")
    ))
}

// ── tests ─────────────────────────────────────────────────────────────────────
