//! Facets command implementation.

use homes_search::CatalogFacets;
use homes_store::Store;

use super::{CommandContext, Result, Stores};
use crate::output::{format_facets_json, format_facets_table};

/// Prints the property types, price range and amenities present in the catalog.
pub async fn execute(ctx: &CommandContext, stores: &Stores) -> Result<()> {
    let catalog = stores.listings.get_all().await?;
    let facets = CatalogFacets::from_listings(&catalog);

    if ctx.json_output {
        println!("{}", format_facets_json(&facets)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_facets_table(&facets, &ctx.currency, ctx.use_colors)
        );
    }

    Ok(())
}
