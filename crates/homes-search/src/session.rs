//! A browsing session over the listing and saved-relation stores.
//!
//! The session owns a snapshot of the catalog and the current filter state.
//! Results are recomputed from those two on every call. Saved state is never
//! held: each saved-state operation reads the relation store afresh.

use homes_store::models::{FilterPreset, Listing, NewListing, SavedRelation};
use homes_store::{ListingStore, Record, Result, SavedRelationStore, StoreError};
use tracing::{debug, info};

use crate::facets::CatalogFacets;
use crate::filter::{FilterState, FilterUpdate};
use crate::preset::to_filter_state;
use crate::saved::{self, ToggleOutcome};
use crate::search::{search, SearchResults};

/// Catalog snapshot plus filter state, backed by two stores.
pub struct BrowseSession<'a, L, S>
where
    L: ListingStore + ?Sized,
    S: SavedRelationStore + ?Sized,
{
    listings: &'a L,
    relations: &'a S,
    catalog: Vec<Listing>,
    filter: FilterState,
}

impl<'a, L, S> BrowseSession<'a, L, S>
where
    L: ListingStore + ?Sized,
    S: SavedRelationStore + ?Sized,
{
    /// Creates a session with an empty catalog. Call [`refresh`](Self::refresh)
    /// to load it.
    pub fn new(listings: &'a L, relations: &'a S) -> Self {
        Self {
            listings,
            relations,
            catalog: Vec::new(),
            filter: FilterState::default(),
        }
    }

    /// Creates a session and loads the catalog.
    pub async fn open(listings: &'a L, relations: &'a S) -> Result<Self> {
        let mut session = Self::new(listings, relations);
        session.refresh().await?;
        Ok(session)
    }

    /// Reloads the catalog from the listing store.
    ///
    /// On failure the previous snapshot is kept.
    pub async fn refresh(&mut self) -> Result<()> {
        self.catalog = self.listings.get_all().await?;
        debug!(listings = self.catalog.len(), "catalog refreshed");
        Ok(())
    }

    pub fn catalog(&self) -> &[Listing] {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Replaces one field of the filter state.
    pub fn set_filter(&mut self, update: FilterUpdate) {
        self.filter = self.filter.set_field(update);
    }

    /// Replaces the whole filter state.
    pub fn replace_filter(&mut self, state: FilterState) {
        self.filter = state;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.set_filter(FilterUpdate::SearchQuery(query.into()));
    }

    /// Resets every filter field, including the search query.
    pub fn clear_filters(&mut self) {
        self.filter = FilterState::clear();
    }

    /// Replaces the filter state with the one a preset describes.
    pub fn apply_preset(&mut self, preset: &FilterPreset) {
        self.filter = to_filter_state(preset);
    }

    /// Applies the current filter to the catalog snapshot.
    pub fn results(&self) -> SearchResults<'_> {
        search(&self.catalog, &self.filter)
    }

    pub fn facets(&self) -> CatalogFacets {
        CatalogFacets::from_listings(&self.catalog)
    }

    /// Reads the current relation set.
    pub async fn saved_relations(&self) -> Result<Vec<SavedRelation>> {
        self.relations.get_all().await
    }

    /// Toggles the saved state of a listing in the catalog.
    pub async fn toggle_saved(&self, listing_id: &str) -> Result<ToggleOutcome> {
        if !self.catalog.iter().any(|l| l.id == listing_id) {
            return Err(StoreError::not_found(Listing::RESOURCE, listing_id));
        }
        saved::toggle_saved(self.relations, listing_id).await
    }

    /// Saved listings joined with their relations, in relation order.
    pub async fn saved_listings(&self) -> Result<Vec<(Listing, SavedRelation)>> {
        let relations = self.saved_relations().await?;
        Ok(saved::saved_listings(&self.catalog, &relations)
            .into_iter()
            .map(|s| (s.listing.clone(), s.relation.clone()))
            .collect())
    }

    /// Creates a listing and appends it to the catalog snapshot.
    pub async fn create_listing(&mut self, draft: NewListing) -> Result<Listing> {
        let listing = self.listings.create(draft).await?;
        info!(id = %listing.id, title = %listing.title, "listing created");
        self.catalog.push(listing.clone());
        Ok(listing)
    }

    /// Deletes a listing and every saved relation that refers to it.
    ///
    /// Returns the deleted listing and the number of relations removed.
    ///
    /// Relations go first, so a failure part way leaves at worst an unsaved
    /// listing and never a relation pointing at a missing listing.
    pub async fn delete_listing(&mut self, id: &str) -> Result<(Listing, usize)> {
        if self.listings.get_by_id(id).await?.is_none() {
            return Err(StoreError::not_found(Listing::RESOURCE, id));
        }

        let mut removed = 0;
        for relation in self.relations.get_all().await? {
            if relation.property_id == id {
                self.relations.delete(&relation.id).await?;
                removed += 1;
            }
        }

        let listing = self.listings.delete(id).await?;
        self.catalog.retain(|l| l.id != id);

        info!(id, removed_relations = removed, "listing deleted");
        Ok((listing, removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::Presets;
    use homes_store::models::{NewSavedRelation, SavedRelation};
    use homes_store::{MemoryStore, Store};

    fn draft(title: &str, price: u64, property_type: &str) -> NewListing {
        NewListing {
            title: title.to_string(),
            address: "1 Main St".to_string(),
            price,
            property_type: property_type.to_string(),
            ..Default::default()
        }
    }

    async fn seeded() -> (MemoryStore<Listing>, MemoryStore<SavedRelation>) {
        let listings = MemoryStore::new();
        listings.create(draft("Lake House", 450_000, "House")).await.unwrap();
        listings.create(draft("City Condo", 300_000, "Condo")).await.unwrap();
        listings.create(draft("Farm", 900_000, "Land")).await.unwrap();
        (listings, MemoryStore::new())
    }

    #[tokio::test]
    async fn test_open_loads_catalog() {
        let (listings, relations) = seeded().await;
        let session = BrowseSession::open(&listings, &relations).await.unwrap();

        assert_eq!(session.catalog().len(), 3);
        assert_eq!(session.results().result_count(), 3);
        assert!(!session.results().has_active_constraint());
    }

    #[tokio::test]
    async fn test_filter_edits_drive_results() {
        let (listings, relations) = seeded().await;
        let mut session = BrowseSession::open(&listings, &relations).await.unwrap();

        session.set_filter(FilterUpdate::PriceMax(Some(500_000)));
        assert_eq!(session.results().result_count(), 2);

        session.set_query("lake");
        let titles: Vec<&str> = session.results().iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Lake House"]);

        session.clear_filters();
        assert_eq!(session.filter(), &FilterState::default());
        assert_eq!(session.results().result_count(), 3);
    }

    #[tokio::test]
    async fn test_apply_preset_replaces_filter() {
        let (listings, relations) = seeded().await;
        let presets_store = MemoryStore::<FilterPreset>::new();
        let presets = Presets::new(&presets_store);
        let preset = presets
            .save("Condos", &FilterState::default().toggle_property_type("Condo"))
            .await
            .unwrap();

        let mut session = BrowseSession::open(&listings, &relations).await.unwrap();
        session.set_query("farm");
        session.apply_preset(&preset);

        assert_eq!(session.filter().search_query, "");
        let titles: Vec<&str> = session.results().iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["City Condo"]);
    }

    #[tokio::test]
    async fn test_toggle_saved_round_trip() {
        let (listings, relations) = seeded().await;
        let session = BrowseSession::open(&listings, &relations).await.unwrap();
        let id = session.catalog()[1].id.clone();

        let outcome = session.toggle_saved(&id).await.unwrap();
        assert!(outcome.saved);

        let saved = session.saved_listings().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0.id, id);

        let outcome = session.toggle_saved(&id).await.unwrap();
        assert!(!outcome.saved);
        assert!(session.saved_relations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_unknown_listing_is_not_found() {
        let (listings, relations) = seeded().await;
        let session = BrowseSession::open(&listings, &relations).await.unwrap();

        let err = session.toggle_saved("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(relations.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_listing_cascades_relations() {
        let (listings, relations) = seeded().await;
        let mut session = BrowseSession::open(&listings, &relations).await.unwrap();
        let doomed = session.catalog()[0].id.clone();
        let kept = session.catalog()[2].id.clone();

        relations.create(NewSavedRelation::now(doomed.clone())).await.unwrap();
        relations.create(NewSavedRelation::now(kept.clone())).await.unwrap();
        relations.create(NewSavedRelation::now(doomed.clone())).await.unwrap();

        let (deleted, removed) = session.delete_listing(&doomed).await.unwrap();
        assert_eq!(deleted.id, doomed);
        assert_eq!(removed, 2);
        assert_eq!(session.catalog().len(), 2);

        let remaining = relations.get_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].property_id, kept);
    }

    #[tokio::test]
    async fn test_delete_listing_keeps_listing_when_relations_fail() {
        let (listings, relations) = seeded().await;
        let mut session = BrowseSession::open(&listings, &relations).await.unwrap();
        let id = session.catalog()[0].id.clone();
        relations.create(NewSavedRelation::now(id.clone())).await.unwrap();

        relations.set_offline(true);
        let err = session.delete_listing(&id).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));

        assert!(listings.get_by_id(&id).await.unwrap().is_some());
        assert_eq!(session.catalog().len(), 3);

        relations.set_offline(false);
        let remaining = relations.get_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].property_id, id);
    }

    #[tokio::test]
    async fn test_delete_unknown_listing_leaves_relations() {
        let (listings, relations) = seeded().await;
        let mut session = BrowseSession::open(&listings, &relations).await.unwrap();
        relations.create(NewSavedRelation::now("ghost")).await.unwrap();

        let err = session.delete_listing("ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(relations.len().await, 1);
        assert_eq!(listings.len().await, 3);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_snapshot() {
        let (listings, relations) = seeded().await;
        let mut session = BrowseSession::open(&listings, &relations).await.unwrap();

        listings.set_offline(true);
        assert!(session.refresh().await.is_err());
        assert_eq!(session.catalog().len(), 3);
    }

    #[tokio::test]
    async fn test_create_listing_appends_to_catalog() {
        let (listings, relations) = seeded().await;
        let mut session = BrowseSession::open(&listings, &relations).await.unwrap();

        let created = session.create_listing(draft("Cabin", 200_000, "House")).await.unwrap();
        assert_eq!(session.catalog().last().map(|l| l.id.as_str()), Some(created.id.as_str()));
        assert_eq!(listings.len().await, 4);
    }
}
