//! Filter presets: named, persisted filter states.
//!
//! A preset stores a [`FilterState`] in a flat serialized form. Numeric ranges
//! become `"min-max"` strings where either side may be empty (`"-500000"`,
//! `"800-"`, or `""` when neither bound is set). Sets become comma-joined
//! strings in sorted order.
//!
//! Decoding is tolerant: a range without a separator or with an unparseable
//! side decodes to an open bound, and set entries are trimmed with empties
//! dropped. Values that themselves contain a comma do not survive a round trip.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use homes_store::models::{FilterPreset, NewFilterPreset};
use homes_store::{PresetStore, Record, Result, StoreError};
use tracing::{debug, info};

use crate::filter::FilterState;

const RANGE_SEPARATOR: char = '-';
const SET_SEPARATOR: &str = ",";

/// Encodes a pair of optional bounds as `"min-max"`.
pub fn encode_range<T: Display>(min: Option<T>, max: Option<T>) -> String {
    match (min, max) {
        (None, None) => String::new(),
        (min, max) => format!(
            "{}{RANGE_SEPARATOR}{}",
            min.map(|v| v.to_string()).unwrap_or_default(),
            max.map(|v| v.to_string()).unwrap_or_default()
        ),
    }
}

/// Decodes a `"min-max"` string into a pair of optional bounds.
pub fn decode_range<T: FromStr>(raw: &str) -> (Option<T>, Option<T>) {
    let Some((min, max)) = raw.trim().split_once(RANGE_SEPARATOR) else {
        if !raw.trim().is_empty() {
            debug!(raw, "range without separator, treating as unset");
        }
        return (None, None);
    };
    (parse_bound(min), parse_bound(max))
}

fn parse_bound<T: FromStr>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

/// Encodes a set as a sorted, comma-joined string.
pub fn encode_set(values: &BTreeSet<String>) -> String {
    values
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(SET_SEPARATOR)
}

/// Decodes a comma-joined string into a set.
pub fn decode_set(raw: &str) -> BTreeSet<String> {
    raw.split(SET_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Builds a preset draft from a name and a filter state.
///
/// The name is trimmed; a blank name is a validation error.
pub fn to_draft(name: &str, state: &FilterState) -> Result<NewFilterPreset> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::validation("name", "preset name cannot be empty"));
    }

    Ok(NewFilterPreset {
        name: name.to_string(),
        price_range: encode_range(state.price_min, state.price_max),
        property_types: encode_set(&state.property_types),
        bedrooms_min: state.bedrooms_min,
        bathrooms_min: state.bathrooms_min,
        square_feet_range: encode_range(state.square_feet_min, state.square_feet_max),
        location: state.location.clone(),
        amenities: encode_set(&state.amenities),
        search_query: state.search_query.clone(),
    })
}

/// Reconstructs the filter state a preset describes.
pub fn to_filter_state(preset: &FilterPreset) -> FilterState {
    let (price_min, price_max) = decode_range(&preset.price_range);
    let (square_feet_min, square_feet_max) = decode_range(&preset.square_feet_range);

    FilterState {
        price_min,
        price_max,
        property_types: decode_set(&preset.property_types),
        bedrooms_min: preset.bedrooms_min,
        bathrooms_min: preset.bathrooms_min,
        square_feet_min,
        square_feet_max,
        location: preset.location.clone(),
        amenities: decode_set(&preset.amenities),
        search_query: preset.search_query.clone(),
    }
}

/// Preset operations over a preset store.
pub struct Presets<'a, P: PresetStore + ?Sized> {
    store: &'a P,
}

impl<'a, P: PresetStore + ?Sized> Presets<'a, P> {
    pub fn new(store: &'a P) -> Self {
        Self { store }
    }

    /// Saves the filter state under a name.
    ///
    /// Names are not required to be unique; saving the same name twice
    /// creates two presets.
    pub async fn save(&self, name: &str, state: &FilterState) -> Result<FilterPreset> {
        let draft = to_draft(name, state)?;
        let preset = self.store.create(draft).await?;
        info!(id = %preset.id, name = %preset.name, "saved filter preset");
        Ok(preset)
    }

    /// Loads a preset's filter state by id.
    pub async fn load(&self, id: &str) -> Result<FilterState> {
        self.store
            .get_by_id(id)
            .await?
            .map(|preset| to_filter_state(&preset))
            .ok_or_else(|| StoreError::not_found(FilterPreset::RESOURCE, id))
    }

    /// Finds the first preset whose name matches, ignoring case.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<FilterPreset>> {
        let needle = name.trim().to_lowercase();
        Ok(self
            .store
            .get_all()
            .await?
            .into_iter()
            .find(|p| p.name.to_lowercase() == needle))
    }

    /// Lists all presets in store order.
    pub async fn list(&self) -> Result<Vec<FilterPreset>> {
        self.store.get_all().await
    }

    /// Deletes a preset by id.
    pub async fn delete(&self, id: &str) -> Result<FilterPreset> {
        let preset = self.store.delete(id).await?;
        info!(id = %preset.id, name = %preset.name, "deleted filter preset");
        Ok(preset)
    }
}
