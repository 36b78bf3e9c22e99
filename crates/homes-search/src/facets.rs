//! Filter choices derived from the catalog.

use homes_store::models::Listing;
use serde::Serialize;

/// The values a filter sidebar offers for the current catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogFacets {
    /// Distinct property types in first-seen catalog order.
    pub property_types: Vec<String>,

    /// Lowest and highest price in the catalog; `None` when it is empty.
    pub price_range: Option<(u64, u64)>,

    /// Distinct features, sorted.
    pub amenities: Vec<String>,
}

impl CatalogFacets {
    /// Collects facets in a single pass over the listings.
    pub fn from_listings(listings: &[Listing]) -> Self {
        let mut facets = CatalogFacets::default();

        for listing in listings {
            if !facets.property_types.contains(&listing.property_type) {
                facets.property_types.push(listing.property_type.clone());
            }

            facets.price_range = Some(match facets.price_range {
                None => (listing.price, listing.price),
                Some((lo, hi)) => (lo.min(listing.price), hi.max(listing.price)),
            });

            for feature in &listing.features {
                if let Err(pos) = facets.amenities.binary_search(feature) {
                    facets.amenities.insert(pos, feature.clone());
                }
            }
        }

        facets
    }
}
