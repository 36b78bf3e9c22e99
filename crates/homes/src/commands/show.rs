//! Show command implementation.

use homes_search::{BrowseSession, SavedIndex};

use super::{find_listing, CommandContext, Result, Stores};
use crate::output::{format_listing_details_json, format_listing_details_table};

/// Executes the show command for a listing ID or unique prefix.
pub async fn execute(ctx: &CommandContext, stores: &Stores, listing_id: &str) -> Result<()> {
    let session = BrowseSession::open(&stores.listings, &stores.relations).await?;
    let listing = find_listing(session.catalog(), listing_id)?;

    let relations = session.saved_relations().await?;
    let index = SavedIndex::build(&relations);
    let relation = index.relation_for(&listing.id);

    if ctx.json_output {
        println!("{}", format_listing_details_json(listing, relation)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_listing_details_table(listing, relation, &ctx.currency, ctx.use_colors)
        );
    }

    Ok(())
}
