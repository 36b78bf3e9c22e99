//! Presets command implementation.
//!
//! Lists, saves, shows and deletes named filter presets.

use homes_search::preset::to_filter_state;
use homes_search::{FilterState, FilterUpdate, Presets};
use homes_store::models::FilterPreset;
use homes_store::Store;
use owo_colors::OwoColorize;

use super::search::{apply_filter_args, find_preset};
use super::{find_by_id_or_prefix, CommandContext, Result, Stores};
use crate::cli::FilterArgs;
use crate::output::{
    format_preset_details_table, format_preset_json, format_presets_json, format_presets_table,
};

/// Lists presets in the order they were saved.
pub async fn execute_list(ctx: &CommandContext, stores: &Stores) -> Result<()> {
    let presets: Vec<(FilterPreset, FilterState)> = Presets::new(&stores.presets)
        .list()
        .await?
        .into_iter()
        .map(|p| {
            let state = to_filter_state(&p);
            (p, state)
        })
        .collect();

    if ctx.json_output {
        println!("{}", format_presets_json(&presets)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_presets_table(&presets, &ctx.currency, ctx.use_colors)
        );
    }

    Ok(())
}

/// Options for the presets save command.
#[derive(Debug)]
pub struct PresetSaveOptions {
    pub name: String,
    pub query: Option<String>,
    pub filters: FilterArgs,
}

/// Builds the filter state described by the save flags.
fn state_from_options(opts: &PresetSaveOptions) -> FilterState {
    let state = apply_filter_args(FilterState::default(), &opts.filters);
    match &opts.query {
        Some(query) => state.set_field(FilterUpdate::SearchQuery(query.clone())),
        None => state,
    }
}

/// Saves the given filters under a name.
///
/// # Errors
///
/// Returns a validation error if the name is blank; nothing is written then.
pub async fn execute_save(
    ctx: &CommandContext,
    stores: &Stores,
    opts: &PresetSaveOptions,
) -> Result<()> {
    let state = state_from_options(opts);
    let preset = Presets::new(&stores.presets).save(&opts.name, &state).await?;

    if ctx.json_output {
        println!("{}", format_preset_json(&preset, &state)?);
    } else if !ctx.quiet {
        if ctx.use_colors {
            println!("{} {}", "Saved preset".green(), preset.name);
        } else {
            println!("Saved preset {}", preset.name);
        }
    }

    Ok(())
}

/// Shows a preset by name (case-insensitive) or ID prefix.
pub async fn execute_show(ctx: &CommandContext, stores: &Stores, name_or_id: &str) -> Result<()> {
    let preset = match find_preset(stores, name_or_id).await {
        Ok(preset) => preset,
        Err(by_name) => {
            let all = stores.presets.get_all().await?;
            match find_by_id_or_prefix(&all, name_or_id, "filter preset", |p| &p.id, |p| &p.name) {
                Ok(preset) => preset.clone(),
                Err(_) => return Err(by_name),
            }
        }
    };
    let state = to_filter_state(&preset);

    if ctx.json_output {
        println!("{}", format_preset_json(&preset, &state)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_preset_details_table(&preset, &state, &ctx.currency, ctx.use_colors)
        );
    }

    Ok(())
}

/// Deletes a preset by ID or unique prefix.
pub async fn execute_delete(ctx: &CommandContext, stores: &Stores, preset_id: &str) -> Result<()> {
    let all = stores.presets.get_all().await?;
    let id = find_by_id_or_prefix(&all, preset_id, "filter preset", |p| &p.id, |p| &p.name)?
        .id
        .clone();

    let preset = Presets::new(&stores.presets).delete(&id).await?;

    if ctx.json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "id": preset.id,
                "name": preset.name,
                "status": "deleted",
            }))?
        );
    } else if !ctx.quiet {
        println!("Deleted preset {}", preset.name);
    }

    Ok(())
}
