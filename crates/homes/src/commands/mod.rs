//! Command implementations for the homes CLI.
//!
//! This module contains the command handlers invoked by the dispatcher, along
//! with the shared error type, the per-invocation context and the store set.

pub mod completions;
pub mod config;
pub mod facets;
pub mod import;
pub mod presets;
pub mod remove;
pub mod saved;
pub mod search;
pub mod show;
pub mod toggle;

use std::path::{Path, PathBuf};

use homes_store::models::{FilterPreset, Listing, SavedRelation};
use homes_store::{JsonFileStore, StoreError};

use crate::cli::Cli;
use crate::output::helpers::truncate_id;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Store or validation error from the library crates.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common settings.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Currency symbol prefixed to prices.
    pub currency: String,
}

impl CommandContext {
    /// Creates a command context from CLI arguments and the loaded config.
    ///
    /// `--no-color` always wins; otherwise `[output] color` decides, and
    /// colors are on by default.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            verbose: cli.verbose,
            currency: config.currency().to_string(),
        }
    }
}

/// The three JSON file stores under one data directory.
pub struct Stores {
    pub listings: JsonFileStore<Listing>,
    pub relations: JsonFileStore<SavedRelation>,
    pub presets: JsonFileStore<FilterPreset>,
}

impl Stores {
    /// Opens the stores under `data_dir`. Files are created on first write.
    pub fn open(data_dir: &Path) -> Self {
        Self {
            listings: JsonFileStore::new(data_dir),
            relations: JsonFileStore::new(data_dir),
            presets: JsonFileStore::new(data_dir),
        }
    }
}

/// Resolves the data directory: flag or `HOMES_DATA_DIR`, then config, then
/// the platform data directory.
pub fn resolve_data_dir(cli: &Cli, config: &Config) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }
    Ok(JsonFileStore::<Listing>::default_data_dir()?)
}

/// Finds a record by full ID or unique ID prefix.
pub(crate) fn find_by_id_or_prefix<'a, T>(
    records: &'a [T],
    id: &str,
    resource: &'static str,
    id_of: impl Fn(&T) -> &str,
    label_of: impl Fn(&T) -> &str,
) -> Result<&'a T> {
    if let Some(record) = records.iter().find(|r| id_of(r) == id) {
        return Ok(record);
    }

    let matches: Vec<&T> = records
        .iter()
        .filter(|r| !id.is_empty() && id_of(r).starts_with(id))
        .collect();

    match matches.len() {
        0 => Err(StoreError::not_found(resource, id).into()),
        1 => Ok(matches[0]),
        _ => {
            let mut msg = format!("ambiguous {resource} ID \"{id}\"; matches:");
            for record in matches.iter().take(5) {
                msg.push_str(&format!(
                    "\n  {}  {}",
                    truncate_id(id_of(record)),
                    label_of(record)
                ));
            }
            if matches.len() > 5 {
                msg.push_str(&format!("\n  ... and {} more", matches.len() - 5));
            }
            msg.push_str("\nPlease use a longer prefix.");
            Err(StoreError::Validation {
                field: None,
                message: msg,
            }
            .into())
        }
    }
}

/// Finds a listing by full ID or unique prefix.
pub(crate) fn find_listing<'a>(catalog: &'a [Listing], id: &str) -> Result<&'a Listing> {
    find_by_id_or_prefix(catalog, id, "listing", |l| &l.id, |l| &l.title)
}
