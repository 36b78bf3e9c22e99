//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// homes - browse, filter and bookmark real-estate listings
#[derive(Parser, Debug)]
#[command(name = "homes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Plain output without ANSI colors
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory holding listings.json, saved.json and presets.json
    #[arg(long, global = true, env = "HOMES_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Structured filter flags shared by `search` and `presets save`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Minimum price (inclusive)
    #[arg(long)]
    pub price_min: Option<u64>,

    /// Maximum price (inclusive)
    #[arg(long)]
    pub price_max: Option<u64>,

    /// Property type (repeatable; any of)
    #[arg(long = "type", value_name = "TYPE", action = clap::ArgAction::Append)]
    pub property_types: Vec<String>,

    /// Minimum bedrooms
    #[arg(long)]
    pub beds: Option<u32>,

    /// Minimum bathrooms
    #[arg(long)]
    pub baths: Option<u32>,

    /// Minimum square footage
    #[arg(long)]
    pub sqft_min: Option<u32>,

    /// Maximum square footage
    #[arg(long)]
    pub sqft_max: Option<u32>,

    /// Text that must appear in the address
    #[arg(long)]
    pub location: Option<String>,

    /// Required amenity (repeatable; all of)
    #[arg(long = "amenity", value_name = "AMENITY", action = clap::ArgAction::Append)]
    pub amenities: Vec<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the catalog
    #[command(alias = "s")]
    Search {
        /// Free text matched against title, address and description
        query: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Start from a saved preset (by name); flags override its fields
        #[arg(long)]
        preset: Option<String>,

        /// Limit the number of rows shown
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show listing details
    Show {
        /// Listing ID (full ID or unique prefix)
        listing_id: String,
    },

    /// Save or unsave a listing
    #[command(alias = "t")]
    Toggle {
        /// Listing ID (full ID or unique prefix)
        listing_id: String,
    },

    /// List saved listings
    Saved,

    /// Import listings from a JSON array
    Import {
        /// Path to a JSON file containing an array of listings
        file: PathBuf,
    },

    /// Remove a listing and its saved entries
    #[command(alias = "rm")]
    Remove {
        /// Listing ID (full ID or unique prefix)
        listing_id: String,
    },

    /// List and manage filter presets
    #[command(alias = "p")]
    Presets {
        #[command(subcommand)]
        command: Option<PresetsCommands>,
    },

    /// Show property types, price range and amenities of the catalog
    Facets,

    /// Inspect or change settings
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Shells with completion support
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Preset subcommands
#[derive(Subcommand, Debug)]
pub enum PresetsCommands {
    /// List saved presets
    List,

    /// Save the given filters as a preset
    Save {
        /// Preset name
        name: String,

        /// Free-text query to store with the preset
        #[arg(long)]
        query: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show a preset's filters
    Show {
        /// Preset name (case-insensitive) or ID
        name: String,
    },

    /// Delete a preset
    #[command(alias = "rm")]
    Delete {
        /// Preset ID (full ID or unique prefix)
        preset_id: String,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective settings
    Show,

    /// Edit the config file ($EDITOR, then $VISUAL, then vi)
    Edit,

    /// Change one setting
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print where the config file lives
    Path,
}
