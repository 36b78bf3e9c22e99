//! Remove command implementation.

use homes_search::BrowseSession;
use serde::Serialize;

use super::{find_listing, CommandContext, Result, Stores};

/// Result of a successful remove.
#[derive(Debug, Serialize)]
pub struct RemoveResult {
    pub id: String,
    pub title: String,
    pub removed_saved: usize,
    pub status: &'static str,
}

/// Deletes a listing and every saved entry that refers to it.
pub async fn execute(ctx: &CommandContext, stores: &Stores, listing_id: &str) -> Result<()> {
    let mut session = BrowseSession::open(&stores.listings, &stores.relations).await?;
    let id = find_listing(session.catalog(), listing_id)?.id.clone();

    let (listing, removed_saved) = session.delete_listing(&id).await?;
    let result = RemoveResult {
        id: listing.id,
        title: listing.title,
        removed_saved,
        status: "deleted",
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !ctx.quiet {
        println!("Removed {}", result.title);
        if result.removed_saved > 0 {
            println!("  and {} saved entries", result.removed_saved);
        }
    }

    Ok(())
}
