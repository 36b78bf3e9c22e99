//! Saved-relation synchronizer.
//!
//! Whether a listing is saved is never cached: it is always derived from the
//! saved-relation store's current contents. A [`SavedIndex`] is built in one
//! pass over the relation set and then answers per-listing lookups, so a page
//! of cards costs one store read instead of one per card.
//!
//! Toggling is split in two. [`SavedIndex::toggle`] decides which single
//! mutation to request ([`ToggleAction`]); [`apply_toggle`] performs it against
//! a store. [`toggle_saved`] does a fresh read, decides, and applies.
//!
//! If the store ever holds more than one relation for the same listing, the
//! first one in store order is canonical for lookup and delete. The others are
//! reported as [`DuplicateRelation`]s and logged, never removed implicitly.

use std::collections::HashMap;

use homes_store::models::{Listing, NewSavedRelation, SavedRelation};
use homes_store::{Result, SavedRelationStore};
use tracing::{info, warn};

/// The single store mutation a toggle requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleAction {
    /// Save the listing: create a relation saved now with empty notes.
    Create(NewSavedRelation),

    /// Unsave the listing: delete its canonical relation.
    Delete {
        /// Identifier of the relation to delete.
        relation_id: String,
    },
}

/// More than one relation found for the same listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRelation {
    /// The listing with several relations.
    pub property_id: String,
    /// The relation treated as canonical (first in store order).
    pub canonical_id: String,
    /// The remaining relation identifiers, in store order.
    pub extra_ids: Vec<String>,
}

/// Lookup from listing id to its canonical saved relation.
#[derive(Debug, Clone, Default)]
pub struct SavedIndex<'a> {
    by_listing: HashMap<&'a str, &'a SavedRelation>,
    duplicates: Vec<DuplicateRelation>,
}

impl<'a> SavedIndex<'a> {
    /// Builds the index in one pass over the relation set.
    pub fn build(relations: &'a [SavedRelation]) -> Self {
        let mut by_listing: HashMap<&'a str, &'a SavedRelation> = HashMap::new();
        let mut duplicates: Vec<DuplicateRelation> = Vec::new();

        for relation in relations {
            let Some(canonical) = by_listing.get(relation.property_id.as_str()) else {
                by_listing.insert(&relation.property_id, relation);
                continue;
            };

            match duplicates
                .iter_mut()
                .find(|d| d.property_id == relation.property_id)
            {
                Some(dup) => dup.extra_ids.push(relation.id.clone()),
                None => duplicates.push(DuplicateRelation {
                    property_id: relation.property_id.clone(),
                    canonical_id: canonical.id.clone(),
                    extra_ids: vec![relation.id.clone()],
                }),
            }
        }

        for dup in &duplicates {
            warn!(
                property_id = %dup.property_id,
                canonical = %dup.canonical_id,
                extra = ?dup.extra_ids,
                "multiple saved relations for one listing"
            );
        }

        Self {
            by_listing,
            duplicates,
        }
    }

    /// Returns true if the listing has a saved relation.
    pub fn is_saved(&self, listing_id: &str) -> bool {
        self.by_listing.contains_key(listing_id)
    }

    /// Returns the canonical relation for the listing.
    pub fn relation_for(&self, listing_id: &str) -> Option<&'a SavedRelation> {
        self.by_listing.get(listing_id).copied()
    }

    /// Decides the mutation that flips the listing's saved state.
    pub fn toggle(&self, listing_id: &str) -> ToggleAction {
        match self.relation_for(listing_id) {
            Some(relation) => ToggleAction::Delete {
                relation_id: relation.id.clone(),
            },
            None => ToggleAction::Create(NewSavedRelation::now(listing_id)),
        }
    }

    /// Returns the number of saved listings.
    pub fn len(&self) -> usize {
        self.by_listing.len()
    }

    /// Returns true if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.by_listing.is_empty()
    }

    /// Returns listings that have more than one relation.
    pub fn duplicates(&self) -> &[DuplicateRelation] {
        &self.duplicates
    }
}

/// Returns true if any relation refers to the listing.
pub fn is_saved(listing_id: &str, relations: &[SavedRelation]) -> bool {
    relations.iter().any(|r| r.property_id == listing_id)
}

/// Decides the mutation that flips the listing's saved state.
pub fn toggle(listing_id: &str, relations: &[SavedRelation]) -> ToggleAction {
    SavedIndex::build(relations).toggle(listing_id)
}

/// Performs a toggle action against the store.
///
/// Returns the relation that was created or deleted. Store errors are returned
/// unchanged.
pub async fn apply_toggle<S>(store: &S, action: ToggleAction) -> Result<SavedRelation>
where
    S: SavedRelationStore + ?Sized,
{
    match action {
        ToggleAction::Create(draft) => {
            let relation = store.create(draft).await?;
            info!(property_id = %relation.property_id, "listing saved");
            Ok(relation)
        }
        ToggleAction::Delete { relation_id } => {
            let relation = store.delete(&relation_id).await?;
            info!(property_id = %relation.property_id, "listing unsaved");
            Ok(relation)
        }
    }
}

/// The result of a performed toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Whether the listing is saved after the toggle.
    pub saved: bool,
    /// The relation created (when saving) or deleted (when unsaving).
    pub relation: SavedRelation,
    /// Anomalies seen in the relation set read for this toggle.
    pub duplicates: Vec<DuplicateRelation>,
}

/// Reads the current relations, decides, and performs one toggle.
///
/// On failure nothing is cached and the error is returned unchanged, so a
/// later read still reflects what the store actually holds.
pub async fn toggle_saved<S>(store: &S, listing_id: &str) -> Result<ToggleOutcome>
where
    S: SavedRelationStore + ?Sized,
{
    let relations = store.get_all().await?;
    let index = SavedIndex::build(&relations);
    let action = index.toggle(listing_id);
    let saved = matches!(action, ToggleAction::Create(_));
    let duplicates = index.duplicates().to_vec();

    let relation = apply_toggle(store, action).await?;
    Ok(ToggleOutcome {
        saved,
        relation,
        duplicates,
    })
}

/// A saved listing joined with its relation.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedListing<'a> {
    pub listing: &'a Listing,
    pub relation: &'a SavedRelation,
}

/// Joins relations with the catalog, in relation order.
///
/// Relations whose listing is no longer in the catalog are skipped, as are
/// non-canonical duplicates.
pub fn saved_listings<'a>(
    listings: &'a [Listing],
    relations: &'a [SavedRelation],
) -> Vec<SavedListing<'a>> {
    let catalog: HashMap<&str, &Listing> = listings.iter().map(|l| (l.id.as_str(), l)).collect();
    let index = SavedIndex::build(relations);

    relations
        .iter()
        .filter(|r| {
            index
                .relation_for(&r.property_id)
                .is_some_and(|canonical| canonical.id == r.id)
        })
        .filter_map(|relation| {
            catalog
                .get(relation.property_id.as_str())
                .map(|listing| SavedListing { listing, relation })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use homes_store::models::Coordinates;
    use homes_store::{MemoryStore, Store, StoreError};

    fn relation(id: &str, property_id: &str) -> SavedRelation {
        SavedRelation {
            id: id.to_string(),
            property_id: property_id.to_string(),
            saved_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            notes: String::new(),
        }
    }

    fn listing(id: &str) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("Listing {id}"),
            description: String::new(),
            address: "a".to_string(),
            price: 1,
            property_type: "House".to_string(),
            bedrooms: 0,
            bathrooms: 0.0,
            square_feet: 0,
            year_built: 0,
            listed_date: Utc::now(),
            images: vec![],
            features: vec![],
            coordinates: Coordinates::default(),
        }
    }

    #[test]
    fn test_is_saved_lookup() {
        let relations = vec![relation("r1", "1")];
        assert!(is_saved("1", &relations));
        assert!(!is_saved("2", &relations));
    }

    #[test]
    fn test_toggle_creates_when_absent() {
        let action = toggle("7", &[]);
        match action {
            ToggleAction::Create(draft) => {
                assert_eq!(draft.property_id, "7");
                assert!(draft.notes.is_empty());
            }
            other => panic!("expected Create, got {other:?}"),
        }
    }

    #[test]
    fn test_toggle_deletes_existing_relation() {
        let relations = vec![relation("r1", "1"), relation("r2", "2")];
        assert_eq!(
            toggle("2", &relations),
            ToggleAction::Delete {
                relation_id: "r2".to_string()
            }
        );
    }

    #[test]
    fn test_duplicates_use_first_as_canonical() {
        let relations = vec![
            relation("r1", "1"),
            relation("r2", "1"),
            relation("r3", "2"),
            relation("r4", "1"),
        ];
        let index = SavedIndex::build(&relations);

        assert_eq!(index.len(), 2);
        assert_eq!(index.relation_for("1").map(|r| r.id.as_str()), Some("r1"));
        assert_eq!(
            index.toggle("1"),
            ToggleAction::Delete {
                relation_id: "r1".to_string()
            }
        );
        assert_eq!(
            index.duplicates(),
            &[DuplicateRelation {
                property_id: "1".to_string(),
                canonical_id: "r1".to_string(),
                extra_ids: vec!["r2".to_string(), "r4".to_string()],
            }]
        );
    }

    #[test]
    fn test_saved_listings_skips_orphans_and_duplicates() {
        let listings = vec![listing("1"), listing("2")];
        let relations = vec![
            relation("r1", "2"),
            relation("r2", "gone"),
            relation("r3", "1"),
            relation("r4", "2"),
        ];

        let joined = saved_listings(&listings, &relations);
        let pairs: Vec<(&str, &str)> = joined
            .iter()
            .map(|s| (s.listing.id.as_str(), s.relation.id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("2", "r1"), ("1", "r3")]);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_store() {
        let store = MemoryStore::with_records(vec![relation("r1", "1")]);
        let before = store.get_all().await.unwrap();

        let first = toggle_saved(&store, "2").await.unwrap();
        assert!(first.saved);
        assert_eq!(store.len().await, 2);

        let second = toggle_saved(&store, "2").await.unwrap();
        assert!(!second.saved);
        assert_eq!(second.relation.id, first.relation.id);

        assert_eq!(store.get_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_failed_toggle_leaves_store_unchanged() {
        let store = MemoryStore::with_records(vec![relation("r1", "1")]);
        store.set_offline(true);

        let err = toggle_saved(&store, "1").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));

        store.set_offline(false);
        let relations = store.get_all().await.unwrap();
        assert!(is_saved("1", &relations));
    }

    #[tokio::test]
    async fn test_toggle_reports_duplicates_and_deletes_only_first() {
        let store = MemoryStore::with_records(vec![relation("r1", "1"), relation("r2", "1")]);

        let outcome = toggle_saved(&store, "1").await.unwrap();
        assert!(!outcome.saved);
        assert_eq!(outcome.relation.id, "r1");
        assert_eq!(outcome.duplicates.len(), 1);

        let remaining = store.get_all().await.unwrap();
        assert_eq!(remaining, vec![relation("r2", "1")]);
    }
}
