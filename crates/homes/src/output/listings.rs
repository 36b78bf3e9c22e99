//! Listing output formatting.

use homes_search::{CatalogFacets, SavedIndex};
use homes_store::models::{Listing, SavedRelation};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_baths, format_price, label, saved_marker, truncate_id, truncate_str};

/// JSON output structure for a listing.
#[derive(Serialize)]
pub struct ListingOutput<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub address: &'a str,
    pub price: u64,
    pub property_type: &'a str,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub square_feet: u32,
    pub year_built: i32,
    pub listed_date: String,
    pub features: &'a [String],
    pub saved: bool,
}

impl<'a> ListingOutput<'a> {
    fn new(listing: &'a Listing, saved: bool) -> Self {
        Self {
            id: &listing.id,
            title: &listing.title,
            address: &listing.address,
            price: listing.price,
            property_type: &listing.property_type,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            square_feet: listing.square_feet,
            year_built: listing.year_built,
            listed_date: listing.listed_date.to_rfc3339(),
            features: &listing.features,
            saved,
        }
    }
}

/// JSON output structure for the search command.
#[derive(Serialize)]
pub struct SearchOutput<'a> {
    pub listings: Vec<ListingOutput<'a>>,
    pub result_count: usize,
    pub has_active_constraint: bool,
}

/// Formats search results as JSON.
///
/// `result_count` is the number of matches before any display limit.
pub fn format_search_json(
    listings: &[&Listing],
    index: &SavedIndex<'_>,
    result_count: usize,
    has_active_constraint: bool,
) -> Result<String, serde_json::Error> {
    let output = SearchOutput {
        listings: listings
            .iter()
            .map(|l| ListingOutput::new(l, index.is_saved(&l.id)))
            .collect(),
        result_count,
        has_active_constraint,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats listings as a table with a saved marker column.
pub fn format_listings_table(
    listings: &[&Listing],
    index: &SavedIndex<'_>,
    currency: &str,
    use_colors: bool,
) -> String {
    if listings.is_empty() {
        return "No listings found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<9} {:<2} {:>12} {:<10} {:>4} {:>4} {:>6}  {}",
        "ID", "", "Price", "Type", "Bd", "Ba", "Sqft", "Title"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for listing in listings {
        let line = format!(
            "{:<9} {:<2} {:>12} {:<10} {:>4} {:>4} {:>6}  {}",
            truncate_id(&listing.id),
            saved_marker(index.is_saved(&listing.id), use_colors),
            format_price(listing.price, currency),
            truncate_str(&listing.property_type, 10),
            listing.bedrooms,
            format_baths(listing.bathrooms),
            listing.square_feet,
            truncate_str(&listing.title, 40),
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Formats the footer line under a search table.
pub fn format_result_count(shown: usize, total: usize, use_colors: bool) -> String {
    let text = if shown < total {
        format!("Showing {shown} of {total} listings")
    } else if total == 1 {
        "1 listing".to_string()
    } else {
        format!("{total} listings")
    };
    if use_colors {
        format!("{}\n", text.dimmed())
    } else {
        format!("{text}\n")
    }
}

/// Formats listing details as JSON (show command).
pub fn format_listing_details_json(
    listing: &Listing,
    relation: Option<&SavedRelation>,
) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    struct DetailsOutput<'a> {
        #[serde(flatten)]
        listing: ListingOutput<'a>,
        description: &'a str,
        images: &'a [String],
        coordinates: [f64; 2],
        #[serde(skip_serializing_if = "Option::is_none")]
        saved_date: Option<String>,
    }

    let output = DetailsOutput {
        listing: ListingOutput::new(listing, relation.is_some()),
        description: &listing.description,
        images: &listing.images,
        coordinates: [listing.coordinates.lat, listing.coordinates.lng],
        saved_date: relation.map(|r| r.saved_date.to_rfc3339()),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats listing details for humans (show command).
pub fn format_listing_details_table(
    listing: &Listing,
    relation: Option<&SavedRelation>,
    currency: &str,
    use_colors: bool,
) -> String {
    let mut output = String::new();

    let title = if use_colors {
        listing.title.bold().to_string()
    } else {
        listing.title.clone()
    };
    output.push_str(&format!("{title}\n"));
    output.push_str(&format!("{}\n\n", listing.address));

    output.push_str(&format!("{} {}\n", label("ID:", use_colors), listing.id));
    output.push_str(&format!(
        "{} {}\n",
        label("Price:", use_colors),
        format_price(listing.price, currency)
    ));
    output.push_str(&format!("{} {}\n", label("Type:", use_colors), listing.property_type));
    output.push_str(&format!(
        "{} {} bd / {} ba / {} sqft\n",
        label("Size:", use_colors),
        listing.bedrooms,
        format_baths(listing.bathrooms),
        listing.square_feet
    ));
    if listing.year_built != 0 {
        output.push_str(&format!("{} {}\n", label("Built:", use_colors), listing.year_built));
    }
    output.push_str(&format!(
        "{} {}\n",
        label("Listed:", use_colors),
        listing.listed_date.format("%Y-%m-%d")
    ));

    if !listing.features.is_empty() {
        output.push_str(&format!(
            "{} {}\n",
            label("Features:", use_colors),
            listing.features.join(", ")
        ));
    }

    if let Some(relation) = relation {
        let saved = format!("Saved {}", relation.saved_date.format("%Y-%m-%d"));
        if use_colors {
            output.push_str(&format!("{}\n", saved.yellow()));
        } else {
            output.push_str(&format!("{saved}\n"));
        }
        if !relation.notes.is_empty() {
            output.push_str(&format!("{} {}\n", label("Notes:", use_colors), relation.notes));
        }
    }

    if !listing.description.is_empty() {
        output.push_str(&format!("\n{}\n", listing.description));
    }

    output
}

/// JSON output structure for a saved listing.
#[derive(Serialize)]
pub struct SavedListingOutput<'a> {
    #[serde(flatten)]
    pub listing: ListingOutput<'a>,
    pub relation_id: &'a str,
    pub saved_date: String,
    pub notes: &'a str,
}

/// Formats saved listings as JSON.
pub fn format_saved_json(saved: &[(Listing, SavedRelation)]) -> Result<String, serde_json::Error> {
    let output: Vec<SavedListingOutput> = saved
        .iter()
        .map(|(listing, relation)| SavedListingOutput {
            listing: ListingOutput::new(listing, true),
            relation_id: &relation.id,
            saved_date: relation.saved_date.to_rfc3339(),
            notes: &relation.notes,
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "saved": output }))
}

/// Formats saved listings as a table.
pub fn format_saved_table(
    saved: &[(Listing, SavedRelation)],
    currency: &str,
    use_colors: bool,
) -> String {
    if saved.is_empty() {
        return "No saved listings.\n".to_string();
    }

    let mut output = String::new();
    let header = format!("{:<9} {:<10} {:>12}  {}", "ID", "Saved", "Price", "Title");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for (listing, relation) in saved {
        output.push_str(&format!(
            "{:<9} {:<10} {:>12}  {}\n",
            truncate_id(&listing.id),
            relation.saved_date.format("%Y-%m-%d"),
            format_price(listing.price, currency),
            truncate_str(&listing.title, 40),
        ));
    }

    output
}

/// JSON output structure for the toggle command.
#[derive(Serialize)]
pub struct ToggleOutput<'a> {
    pub listing_id: &'a str,
    pub title: &'a str,
    pub saved: bool,
    pub relation_id: &'a str,
}

/// Formats a toggle result as JSON.
pub fn format_toggle_json(
    listing: &Listing,
    saved: bool,
    relation: &SavedRelation,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ToggleOutput {
        listing_id: &listing.id,
        title: &listing.title,
        saved,
        relation_id: &relation.id,
    })
}

/// Formats facets as JSON.
pub fn format_facets_json(facets: &CatalogFacets) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(facets)
}

/// Formats facets for humans.
pub fn format_facets_table(facets: &CatalogFacets, currency: &str, use_colors: bool) -> String {
    let Some((low, high)) = facets.price_range else {
        return "Catalog is empty.\n".to_string();
    };

    let mut output = String::new();
    output.push_str(&format!(
        "{} {}\n",
        label("Types:", use_colors),
        facets.property_types.join(", ")
    ));
    output.push_str(&format!(
        "{} {} to {}\n",
        label("Prices:", use_colors),
        format_price(low, currency),
        format_price(high, currency)
    ));
    if !facets.amenities.is_empty() {
        output.push_str(&format!(
            "{} {}\n",
            label("Amenities:", use_colors),
            facets.amenities.join(", ")
        ));
    }
    output
}
