//! Config command implementation.
//!
//! The config file lives at `$HOMES_CONFIG` when set, otherwise at
//! `$XDG_CONFIG_HOME/homes/config.toml`, otherwise at
//! `~/.config/homes/config.toml`. A missing file means defaults.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::BaseDirs;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::debug;

use super::{CommandContext, CommandError, Result};

/// Schema version written to new config files.
const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the config file path.
const CONFIG_ENV: &str = "HOMES_CONFIG";

const DEFAULT_CURRENCY: &str = "$";

/// Contents written by `config edit` when no file exists yet.
const TEMPLATE: &str = r#"# homes configuration
version = 1

# Directory holding listings.json, saved.json and presets.json.
# --data-dir and HOMES_DATA_DIR take precedence.
# data_dir = "/path/to/data"

[output]
# color = true
# currency = "$"
"#;

/// Settings read from the config file.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "schema_version")]
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub output: OutputConfig,
}

/// The `[output]` table.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `--no-color` overrides this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Symbol printed before prices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

fn schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            data_dir: None,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Returns the configured currency symbol, or `$`.
    pub fn currency(&self) -> &str {
        self.output.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    /// Reads a config file. A missing file yields the defaults.
    ///
    /// Files written by a newer schema are rejected rather than silently
    /// losing settings on the next save.
    pub fn read_from(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CommandError::Config(format!(
                    "cannot read {}: {e}",
                    path.display()
                )))
            }
        };

        let mut config: Config = toml::from_str(&text).map_err(|e| {
            CommandError::Config(format!("cannot parse {}: {e}", path.display()))
        })?;

        if config.version > SCHEMA_VERSION {
            return Err(CommandError::Config(format!(
                "{} uses schema version {}, this build understands up to {SCHEMA_VERSION}",
                path.display(),
                config.version
            )));
        }
        config.version = SCHEMA_VERSION;
        Ok(config)
    }

    /// Writes the config as TOML, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                CommandError::Config(format!("cannot create {}: {e}", dir.display()))
            })?;
        }

        let text = toml::to_string_pretty(self)
            .map_err(|e| CommandError::Config(format!("cannot encode config: {e}")))?;
        fs::write(path, text)
            .map_err(|e| CommandError::Config(format!("cannot write {}: {e}", path.display())))
    }

    /// Assigns one setting from its string form.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::DataDir => {
                let value = value.trim();
                self.data_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            ConfigKey::Color => self.output.color = Some(parse_switch(value)?),
            ConfigKey::Currency => {
                if value.trim().is_empty() {
                    return Err(CommandError::Config(
                        "output.currency must not be blank".to_string(),
                    ));
                }
                self.output.currency = Some(value.to_string());
            }
        }
        Ok(())
    }
}

/// A key accepted by `config set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    DataDir,
    Color,
    Currency,
}

impl ConfigKey {
    const ALL: [ConfigKey; 3] = [ConfigKey::DataDir, ConfigKey::Color, ConfigKey::Currency];

    fn as_str(self) -> &'static str {
        match self {
            ConfigKey::DataDir => "data_dir",
            ConfigKey::Color => "output.color",
            ConfigKey::Currency => "output.currency",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                CommandError::Config(format!(
                    "unknown key '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

/// Resolves the config file location.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("homes").join("config.toml"));
    }
    let base = BaseDirs::new()
        .ok_or_else(|| CommandError::Config("no home directory to look for config in".into()))?;
    Ok(base.home_dir().join(".config").join("homes").join("config.toml"))
}

/// Loads the config from its resolved location.
pub fn load_config() -> Result<Config> {
    Config::read_from(&config_path()?)
}

/// Prints the effective settings.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = config_path()?;
    let config = Config::read_from(&path)?;

    if ctx.json_output {
        let value = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "data_dir": config.data_dir.as_ref().map(|d| d.display().to_string()),
            "color": config.output.color.unwrap_or(true),
            "currency": config.currency(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }

    let origin = if path.exists() { "" } else { " (not created yet)" };
    if ctx.use_colors {
        println!("{}{origin}", path.display().bold());
    } else {
        println!("{}{origin}", path.display());
    }
    let data_dir = config
        .data_dir
        .as_ref()
        .map_or_else(|| "(platform default)".to_string(), |d| d.display().to_string());
    println!("  data_dir         {data_dir}");
    println!("  output.color     {}", config.output.color.unwrap_or(true));
    println!("  output.currency  {}", config.currency());

    Ok(())
}

/// Picks the editor: `$EDITOR`, then `$VISUAL`, then `vi`.
fn editor_command() -> String {
    ["EDITOR", "VISUAL"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

/// Opens the config file in an editor, seeding it from the template first.
pub async fn execute_edit(ctx: &CommandContext) -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, TEMPLATE)?;
        debug!(path = %path.display(), "seeded config from template");
    }

    let editor = editor_command();
    debug!(editor = %editor, path = %path.display(), "launching editor");
    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .await
        .map_err(|e| CommandError::Config(format!("cannot launch '{editor}': {e}")))?;

    if !status.success() {
        return Err(CommandError::Config(format!("'{editor}' exited with {status}")));
    }

    // Surface syntax mistakes right away instead of on the next command
    Config::read_from(&path)?;

    if ctx.json_output {
        let value = serde_json::json!({
            "path": path.display().to_string(),
            "editor": editor,
            "status": "ok",
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

/// Arguments of `config set`.
pub struct ConfigSetOptions {
    pub key: String,
    pub value: String,
}

/// Updates one setting and writes the file.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let key: ConfigKey = opts.key.parse()?;
    let path = config_path()?;

    let mut config = Config::read_from(&path)?;
    config.set(key, &opts.value)?;
    config.write_to(&path)?;

    if ctx.json_output {
        let value = serde_json::json!({
            "key": key.as_str(),
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else if !ctx.quiet {
        println!("{key} = {}", opts.value);
    }
    Ok(())
}

/// Prints where the config file is (or would be).
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = config_path()?;
    if ctx.json_output {
        let value = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

fn parse_switch(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "'{raw}' is not a switch value (try on or off)"
        ))),
    }
}
