//! Saved command implementation.

use homes_search::BrowseSession;

use super::{CommandContext, Result, Stores};
use crate::output::{format_saved_json, format_saved_table};

/// Lists saved listings joined with the catalog, in the order they were saved.
///
/// Saved entries whose listing no longer exists are skipped.
pub async fn execute(ctx: &CommandContext, stores: &Stores) -> Result<()> {
    let session = BrowseSession::open(&stores.listings, &stores.relations).await?;
    let saved = session.saved_listings().await?;

    if ctx.json_output {
        println!("{}", format_saved_json(&saved)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_saved_table(&saved, &ctx.currency, ctx.use_colors)
        );
    }

    Ok(())
}
