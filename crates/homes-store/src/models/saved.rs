//! Saved-relation model.
//!
//! A saved relation records that the user bookmarked a listing. It refers to
//! the listing by `property_id` and carries its own identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A bookmark linking the user to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRelation {
    /// The relation's own identifier.
    pub id: String,

    /// Identifier of the saved listing.
    pub property_id: String,

    /// When the listing was saved.
    pub saved_date: DateTime<Utc>,

    /// Free-text notes attached to the bookmark.
    #[serde(default)]
    pub notes: String,
}

/// Input for creating a saved relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavedRelation {
    pub property_id: String,
    pub saved_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

impl NewSavedRelation {
    /// Creates a relation draft for the given listing, saved now with no notes.
    pub fn now(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            saved_date: Utc::now(),
            notes: String::new(),
        }
    }
}

/// Partial update for a saved relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRelationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for SavedRelation {
    const RESOURCE: &'static str = "saved relation";
    const COLLECTION: &'static str = "saved";

    type Draft = NewSavedRelation;
    type Patch = SavedRelationPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewSavedRelation) -> Self {
        SavedRelation {
            id,
            property_id: draft.property_id,
            saved_date: draft.saved_date,
            notes: draft.notes,
        }
    }

    fn apply_patch(&mut self, patch: SavedRelationPatch) {
        if let Some(saved_date) = patch.saved_date {
            self.saved_date = saved_date;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }

    fn validate_draft(draft: &NewSavedRelation) -> crate::Result<()> {
        if draft.property_id.is_empty() {
            return Err(crate::StoreError::validation(
                "propertyId",
                "must reference a listing",
            ));
        }
        Ok(())
    }
}
