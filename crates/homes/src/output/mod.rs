//! Output formatting for the homes CLI.
//!
//! Every command renders either a table (optionally colored) or pretty JSON:
//!
//! - [`listings`] - search results, listing details, saved listings, facets
//! - [`presets`] - preset list and details
//! - [`helpers`] - truncation, prices, markers

pub mod helpers;
mod listings;
mod presets;

pub use listings::{
    format_facets_json, format_facets_table, format_listing_details_json,
    format_listing_details_table, format_listings_table, format_result_count, format_saved_json,
    format_saved_table, format_search_json, format_toggle_json,
};

pub use presets::{
    format_preset_details_table, format_preset_json, format_presets_json, format_presets_table,
};
