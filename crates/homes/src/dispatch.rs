//! Command dispatch: routes parsed CLI commands to their handlers.
//!
//! Commands are split by what they need. [`LocalDispatch`] covers commands
//! that never touch the data directory (config, completions, help);
//! [`StoreDispatch`] covers everything that reads or writes the stores.

use std::path::Path;

use crate::cli::{Cli, Commands, ConfigCommands, FilterArgs, PresetsCommands, Shell};
use crate::commands::{self, CommandContext, CommandError, Result, Stores};

/// Trait for commands that run without the stores.
pub trait LocalCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that run against the stores.
#[allow(async_fn_in_trait)]
pub trait StoreCommand {
    async fn execute(&self, ctx: &CommandContext, stores: &Stores) -> Result<()>;
}

/// Commands that don't need the data directory.
pub enum LocalDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> LocalDispatch<'a> {
    /// Returns `None` if the command needs the stores.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }

    /// Returns true for `config edit`, which must run asynchronously.
    pub fn is_config_edit(&self) -> bool {
        matches!(self, Self::Config(Some(ConfigCommands::Edit)))
    }
}

impl LocalCommand for LocalDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("homes - browse, filter and bookmark real-estate listings");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Edit) => Err(CommandError::Config(
            "edit requires async context".into(),
        )),
    }
}

/// Commands that need the stores.
pub enum StoreDispatch<'a> {
    Search {
        query: &'a Option<String>,
        filters: &'a FilterArgs,
        preset: &'a Option<String>,
        limit: Option<usize>,
    },
    Show(&'a str),
    Toggle(&'a str),
    Saved,
    Import(&'a Path),
    Remove(&'a str),
    PresetsList,
    PresetsSave {
        name: &'a str,
        query: &'a Option<String>,
        filters: &'a FilterArgs,
    },
    PresetsShow(&'a str),
    PresetsDelete(&'a str),
    Facets,
}

impl<'a> StoreDispatch<'a> {
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        let dispatch = match cli.command.as_ref()? {
            Commands::Search {
                query,
                filters,
                preset,
                limit,
            } => Self::Search {
                query,
                filters,
                preset,
                limit: *limit,
            },
            Commands::Show { listing_id } => Self::Show(listing_id),
            Commands::Toggle { listing_id } => Self::Toggle(listing_id),
            Commands::Saved => Self::Saved,
            Commands::Import { file } => Self::Import(file),
            Commands::Remove { listing_id } => Self::Remove(listing_id),
            Commands::Presets { command } => match command {
                Some(PresetsCommands::List) | None => Self::PresetsList,
                Some(PresetsCommands::Save {
                    name,
                    query,
                    filters,
                }) => Self::PresetsSave {
                    name,
                    query,
                    filters,
                },
                Some(PresetsCommands::Show { name }) => Self::PresetsShow(name),
                Some(PresetsCommands::Delete { preset_id }) => Self::PresetsDelete(preset_id),
            },
            Commands::Facets => Self::Facets,
            Commands::Config { .. } | Commands::Completions { .. } => return None,
        };
        Some(dispatch)
    }
}

impl StoreCommand for StoreDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext, stores: &Stores) -> Result<()> {
        match self {
            Self::Search {
                query,
                filters,
                preset,
                limit,
            } => {
                let opts = commands::search::SearchOptions {
                    query: (*query).clone(),
                    filters: (*filters).clone(),
                    preset: (*preset).clone(),
                    limit: *limit,
                };
                commands::search::execute(ctx, stores, &opts).await
            }
            Self::Show(id) => commands::show::execute(ctx, stores, id).await,
            Self::Toggle(id) => commands::toggle::execute(ctx, stores, id).await,
            Self::Saved => commands::saved::execute(ctx, stores).await,
            Self::Import(file) => commands::import::execute(ctx, stores, file).await,
            Self::Remove(id) => commands::remove::execute(ctx, stores, id).await,
            Self::PresetsList => commands::presets::execute_list(ctx, stores).await,
            Self::PresetsSave {
                name,
                query,
                filters,
            } => {
                let opts = commands::presets::PresetSaveOptions {
                    name: name.to_string(),
                    query: (*query).clone(),
                    filters: (*filters).clone(),
                };
                commands::presets::execute_save(ctx, stores, &opts).await
            }
            Self::PresetsShow(name) => commands::presets::execute_show(ctx, stores, name).await,
            Self::PresetsDelete(id) => commands::presets::execute_delete(ctx, stores, id).await,
            Self::Facets => commands::facets::execute(ctx, stores).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_local_dispatch_for_config_and_help() {
        let cli = Cli::parse_from(["homes", "config", "path"]);
        assert!(matches!(
            LocalDispatch::try_from_cli(&cli),
            Some(LocalDispatch::Config(Some(ConfigCommands::Path)))
        ));

        let cli = Cli::parse_from(["homes"]);
        assert!(matches!(
            LocalDispatch::try_from_cli(&cli),
            Some(LocalDispatch::Help)
        ));
    }

    #[test]
    fn test_config_edit_is_flagged() {
        let cli = Cli::parse_from(["homes", "config", "edit"]);
        let dispatch = LocalDispatch::try_from_cli(&cli).unwrap();
        assert!(dispatch.is_config_edit());
    }

    #[test]
    fn test_store_commands_are_not_local() {
        let cli = Cli::parse_from(["homes", "saved"]);
        assert!(LocalDispatch::try_from_cli(&cli).is_none());
        assert!(matches!(
            StoreDispatch::from_cli(&cli),
            Some(StoreDispatch::Saved)
        ));
    }

    #[test]
    fn test_presets_defaults_to_list() {
        let cli = Cli::parse_from(["homes", "presets"]);
        assert!(matches!(
            StoreDispatch::from_cli(&cli),
            Some(StoreDispatch::PresetsList)
        ));
    }

    #[test]
    fn test_search_dispatch_carries_limit() {
        let cli = Cli::parse_from(["homes", "search", "--limit", "5"]);
        let Some(StoreDispatch::Search { limit, .. }) = StoreDispatch::from_cli(&cli) else {
            panic!("Expected Search dispatch");
        };
        assert_eq!(limit, Some(5));
    }
}
