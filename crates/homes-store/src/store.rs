//! The store contract shared by every backend.
//!
//! Listing, saved-relation and preset stores all have the same CRUD shape, so
//! they are expressed as one generic [`Store`] trait over a [`Record`] type.
//! The engine depends only on this contract, never on a concrete backend.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::models::{FilterPreset, Listing, SavedRelation};

/// A record type that can live in a [`Store`].
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Human-readable resource name used in errors (e.g., "listing").
    const RESOURCE: &'static str;

    /// Collection name used by file-backed stores (e.g., "listings").
    const COLLECTION: &'static str;

    /// Input for `create`; carries everything except the identifier.
    type Draft: Send + 'static;

    /// Input for `update`; unset fields are left unchanged.
    type Patch: Send + 'static;

    /// Returns the record's identifier.
    fn id(&self) -> &str;

    /// Builds a record from a draft and a store-assigned identifier.
    fn from_draft(id: String, draft: Self::Draft) -> Self;

    /// Applies a partial update in place.
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Checks a draft before it is stored.
    fn validate_draft(_draft: &Self::Draft) -> Result<()> {
        Ok(())
    }
}

/// CRUD access to one collection of records.
///
/// Every call is a single request/response unit that may fail. Implementations
/// must fail `update` and `delete` with [`StoreError::NotFound`] for unknown
/// identifiers and report transport failures as [`StoreError::Unavailable`].
///
/// [`StoreError::NotFound`]: crate::StoreError::NotFound
/// [`StoreError::Unavailable`]: crate::StoreError::Unavailable
#[async_trait]
pub trait Store<R: Record>: Send + Sync {
    /// Returns every record in store order.
    async fn get_all(&self) -> Result<Vec<R>>;

    /// Returns the record with the given identifier, if any.
    async fn get_by_id(&self, id: &str) -> Result<Option<R>>;

    /// Stores a new record and returns it with its assigned identifier.
    async fn create(&self, draft: R::Draft) -> Result<R>;

    /// Applies a partial update and returns the updated record.
    async fn update(&self, id: &str, patch: R::Patch) -> Result<R>;

    /// Removes a record and returns it.
    async fn delete(&self, id: &str) -> Result<R>;
}

/// A store of listings.
pub trait ListingStore: Store<Listing> {}
impl<T: Store<Listing> + ?Sized> ListingStore for T {}

/// A store of saved relations.
pub trait SavedRelationStore: Store<SavedRelation> {}
impl<T: Store<SavedRelation> + ?Sized> SavedRelationStore for T {}

/// A store of filter presets.
pub trait PresetStore: Store<FilterPreset> {}
impl<T: Store<FilterPreset> + ?Sized> PresetStore for T {}
