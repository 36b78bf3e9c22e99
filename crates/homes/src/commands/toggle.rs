//! Toggle command implementation.
//!
//! Flips the saved state of one listing. The decision is made from a fresh
//! read of the saved-relation store, never from earlier output.

use homes_search::BrowseSession;
use owo_colors::OwoColorize;

use super::{find_listing, CommandContext, Result, Stores};
use crate::output::format_toggle_json;

/// Executes the toggle command for a listing ID or unique prefix.
pub async fn execute(ctx: &CommandContext, stores: &Stores, listing_id: &str) -> Result<()> {
    let session = BrowseSession::open(&stores.listings, &stores.relations).await?;
    let listing = find_listing(session.catalog(), listing_id)?;

    let outcome = session.toggle_saved(&listing.id).await?;

    if !ctx.quiet {
        for dup in &outcome.duplicates {
            eprintln!(
                "warning: listing {} has {} extra saved entries ({})",
                dup.property_id,
                dup.extra_ids.len(),
                dup.extra_ids.join(", ")
            );
        }
    }

    if ctx.json_output {
        println!(
            "{}",
            format_toggle_json(listing, outcome.saved, &outcome.relation)?
        );
    } else if !ctx.quiet {
        let verb = if outcome.saved { "Saved" } else { "Unsaved" };
        if ctx.use_colors {
            println!("{} {}", verb.green(), listing.title);
        } else {
            println!("{verb} {}", listing.title);
        }
    }

    Ok(())
}
