//! Import command implementation.
//!
//! Reads a JSON array of listings and appends them to the catalog. Entries
//! may be full listings or drafts; any `id` field is ignored and a fresh ID is
//! assigned. `listedDate` defaults to the import time.

use std::path::Path;

use homes_search::BrowseSession;
use homes_store::models::{Listing, NewListing};
use homes_store::{Record, StoreError};
use serde::Serialize;

use super::{CommandContext, Result, Stores};
use crate::output::helpers::truncate_id;

/// Result of a successful import.
#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub imported: usize,
    pub ids: Vec<String>,
}

/// Parses and validates every draft before anything is written.
pub(crate) fn parse_drafts(contents: &str) -> Result<Vec<NewListing>> {
    let drafts: Vec<NewListing> = serde_json::from_str(contents)?;

    for (i, draft) in drafts.iter().enumerate() {
        Listing::validate_draft(draft).map_err(|e| match e {
            StoreError::Validation { field, message } => StoreError::Validation {
                field: Some(format!("[{i}].{}", field.unwrap_or_default())),
                message,
            },
            other => other,
        })?;
    }

    Ok(drafts)
}

/// Executes the import command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a JSON array of
/// listings, or any entry fails validation. Validation happens up front, so a
/// rejected file imports nothing.
pub async fn execute(ctx: &CommandContext, stores: &Stores, file: &Path) -> Result<()> {
    let contents = tokio::fs::read_to_string(file).await?;
    let drafts = parse_drafts(&contents)?;

    let mut session = BrowseSession::new(&stores.listings, &stores.relations);
    let mut ids = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let listing = session.create_listing(draft).await?;
        ids.push(listing.id);
    }

    let result = ImportResult {
        imported: ids.len(),
        ids,
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !ctx.quiet {
        println!("Imported {} listings", result.imported);
        if ctx.verbose {
            for id in &result.ids {
                println!("  {}", truncate_id(id));
            }
        }
    }

    Ok(())
}
