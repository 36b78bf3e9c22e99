//! Predicate compilation and evaluation.
//!
//! [`compile`] lowers a [`FilterState`] into a [`Predicate`], a flat list of
//! [`Clause`]s that are ANDed together. Text needles are lowercased once at
//! compile time so evaluation only lowercases the listing side.

use std::collections::BTreeSet;

use homes_store::models::Listing;
use tracing::debug;

use super::state::FilterState;

/// One constraint of a compiled predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Lowercased needle found in the title, address or description.
    Text(String),

    /// Price within the bounds; an unset bound is open.
    Price {
        min: Option<u64>,
        max: Option<u64>,
    },

    /// Property type is one of the set.
    PropertyType(BTreeSet<String>),

    /// At least this many bedrooms.
    MinBedrooms(u32),

    /// At least this many bathrooms.
    MinBathrooms(u32),

    /// Square footage within the bounds; an unset bound is open.
    SquareFeet {
        min: Option<u32>,
        max: Option<u32>,
    },

    /// Lowercased needle found in the address.
    Location(String),

    /// Every amenity is listed among the features.
    Amenities(BTreeSet<String>),
}

impl Clause {
    /// Returns true if the listing satisfies this clause.
    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            Clause::Text(needle) => {
                contains_lowercase(&listing.title, needle)
                    || contains_lowercase(&listing.address, needle)
                    || contains_lowercase(&listing.description, needle)
            }
            Clause::Price { min, max } => within(listing.price, *min, *max),
            Clause::PropertyType(types) => types.contains(&listing.property_type),
            Clause::MinBedrooms(min) => listing.bedrooms >= *min,
            Clause::MinBathrooms(min) => listing.bathrooms >= f64::from(*min),
            Clause::SquareFeet { min, max } => within(listing.square_feet, *min, *max),
            Clause::Location(needle) => contains_lowercase(&listing.address, needle),
            Clause::Amenities(required) => required.iter().all(|a| listing.has_feature(a)),
        }
    }
}

/// A compiled filter: the conjunction of its clauses.
///
/// A predicate with no clauses accepts every listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// Returns the clauses in evaluation order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns true if the predicate accepts every listing.
    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns true if the listing passes every clause.
    ///
    /// Evaluation stops at the first failing clause.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.clauses.iter().all(|clause| clause.matches(listing))
    }

    /// Filters a slice of listings, keeping those that match in input order.
    pub fn filter_listings<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}

/// Compiles a filter state into a predicate.
///
/// Clauses are emitted in a fixed order: search query, price, property type,
/// bedrooms, bathrooms, square footage, location, amenities.
pub fn compile(state: &FilterState) -> Predicate {
    let mut clauses = Vec::new();

    if let Some(needle) = normalize_needle(&state.search_query) {
        clauses.push(Clause::Text(needle));
    }

    if state.price_min.is_some() || state.price_max.is_some() {
        clauses.push(Clause::Price {
            min: state.price_min,
            max: state.price_max,
        });
    }

    if !state.property_types.is_empty() {
        clauses.push(Clause::PropertyType(state.property_types.clone()));
    }

    if let Some(min) = state.bedrooms_min {
        clauses.push(Clause::MinBedrooms(min));
    }

    if let Some(min) = state.bathrooms_min {
        clauses.push(Clause::MinBathrooms(min));
    }

    if state.square_feet_min.is_some() || state.square_feet_max.is_some() {
        clauses.push(Clause::SquareFeet {
            min: state.square_feet_min,
            max: state.square_feet_max,
        });
    }

    if let Some(needle) = normalize_needle(&state.location) {
        clauses.push(Clause::Location(needle));
    }

    if !state.amenities.is_empty() {
        clauses.push(Clause::Amenities(state.amenities.clone()));
    }

    debug!(clauses = clauses.len(), "compiled filter predicate");
    Predicate { clauses }
}

/// Trims and lowercases a text constraint; blank input means no constraint.
fn normalize_needle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn contains_lowercase(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

fn within<T: PartialOrd + Copy>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}
