//! The structured filter value object.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The user's current structured search constraints.
///
/// Every field has an "unconstrained" value (`None`, an empty set or an empty
/// string) and that value never means "match nothing". Edits go through
/// [`FilterState::set_field`], which returns a new state and leaves the input
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Lowest acceptable price (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_min: Option<u64>,

    /// Highest acceptable price (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<u64>,

    /// Accepted property types; empty accepts all.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub property_types: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms_min: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms_min: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet_min: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet_max: Option<u32>,

    /// Substring the address must contain.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,

    /// Amenities that must all be present; empty accepts all.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub amenities: BTreeSet<String>,

    /// Free-text query over title, address and description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search_query: String,
}

/// A single-field edit to a [`FilterState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    PriceMin(Option<u64>),
    PriceMax(Option<u64>),
    PropertyTypes(BTreeSet<String>),
    BedroomsMin(Option<u32>),
    BathroomsMin(Option<u32>),
    SquareFeetMin(Option<u32>),
    SquareFeetMax(Option<u32>),
    Location(String),
    Amenities(BTreeSet<String>),
    SearchQuery(String),
}

impl FilterState {
    /// Returns the canonical all-unconstrained state.
    pub fn clear() -> Self {
        Self::default()
    }

    /// Returns a copy of this state with one field replaced.
    pub fn set_field(&self, update: FilterUpdate) -> Self {
        let mut next = self.clone();
        match update {
            FilterUpdate::PriceMin(v) => next.price_min = v,
            FilterUpdate::PriceMax(v) => next.price_max = v,
            FilterUpdate::PropertyTypes(v) => next.property_types = v,
            FilterUpdate::BedroomsMin(v) => next.bedrooms_min = v,
            FilterUpdate::BathroomsMin(v) => next.bathrooms_min = v,
            FilterUpdate::SquareFeetMin(v) => next.square_feet_min = v,
            FilterUpdate::SquareFeetMax(v) => next.square_feet_max = v,
            FilterUpdate::Location(v) => next.location = v,
            FilterUpdate::Amenities(v) => next.amenities = v,
            FilterUpdate::SearchQuery(v) => next.search_query = v,
        }
        next
    }

    /// Returns a copy with both price bounds replaced in one edit.
    pub fn with_price_range(&self, min: Option<u64>, max: Option<u64>) -> Self {
        let mut next = self.clone();
        next.price_min = min;
        next.price_max = max;
        next
    }

    /// Adds the property type if absent, removes it if present.
    pub fn toggle_property_type(&self, property_type: &str) -> Self {
        let mut types = self.property_types.clone();
        if !types.remove(property_type) {
            types.insert(property_type.to_string());
        }
        self.set_field(FilterUpdate::PropertyTypes(types))
    }

    /// Adds the amenity if absent, removes it if present.
    pub fn toggle_amenity(&self, amenity: &str) -> Self {
        let mut amenities = self.amenities.clone();
        if !amenities.remove(amenity) {
            amenities.insert(amenity.to_string());
        }
        self.set_field(FilterUpdate::Amenities(amenities))
    }

    /// Returns true if any field is constrained.
    ///
    /// Whitespace-only `location` and `search_query` count as unconstrained,
    /// matching what [`compile`](super::compile) does with them.
    pub fn is_active(&self) -> bool {
        self.price_min.is_some()
            || self.price_max.is_some()
            || !self.property_types.is_empty()
            || self.bedrooms_min.is_some()
            || self.bathrooms_min.is_some()
            || self.square_feet_min.is_some()
            || self.square_feet_max.is_some()
            || !self.location.trim().is_empty()
            || !self.amenities.is_empty()
            || !self.search_query.trim().is_empty()
    }
}
