//! Filter preset model.
//!
//! Presets are stored in their serialized form: numeric ranges as `"min-max"`
//! strings and sets as comma-joined strings. Encoding and decoding live in the
//! search crate, next to the filter state they describe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A named, persisted filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPreset {
    /// The preset's identifier.
    pub id: String,

    /// Display name chosen by the user.
    pub name: String,

    /// Price range as `"min-max"`; either side may be empty.
    #[serde(default)]
    pub price_range: String,

    /// Comma-joined property types.
    #[serde(default)]
    pub property_types: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms_min: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms_min: Option<u32>,

    /// Square footage range as `"min-max"`; either side may be empty.
    #[serde(default)]
    pub square_feet_range: String,

    #[serde(default)]
    pub location: String,

    /// Comma-joined amenities.
    #[serde(default)]
    pub amenities: String,

    #[serde(default)]
    pub search_query: String,

    /// When the preset was saved.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFilterPreset {
    pub name: String,
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub property_types: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms_min: Option<u32>,
    #[serde(default)]
    pub square_feet_range: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub amenities: String,
    #[serde(default)]
    pub search_query: String,
}

/// Partial update for a preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPresetPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Record for FilterPreset {
    const RESOURCE: &'static str = "filter preset";
    const COLLECTION: &'static str = "presets";

    type Draft = NewFilterPreset;
    type Patch = FilterPresetPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewFilterPreset) -> Self {
        FilterPreset {
            id,
            name: draft.name,
            price_range: draft.price_range,
            property_types: draft.property_types,
            bedrooms_min: draft.bedrooms_min,
            bathrooms_min: draft.bathrooms_min,
            square_feet_range: draft.square_feet_range,
            location: draft.location,
            amenities: draft.amenities,
            search_query: draft.search_query,
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: FilterPresetPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }

    fn validate_draft(draft: &NewFilterPreset) -> crate::Result<()> {
        if draft.name.trim().is_empty() {
            return Err(crate::StoreError::validation("name", "must not be empty"));
        }
        Ok(())
    }
}
