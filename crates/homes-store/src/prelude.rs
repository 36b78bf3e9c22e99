//! Prelude module for convenient imports.
//!
//! ```
//! use homes_store::prelude::*;
//!
//! // Now you have access to:
//! // - Store, Record and the per-record store traits
//! // - MemoryStore, JsonFileStore (backends)
//! // - StoreError, Result (error handling)
//! // - Listing, SavedRelation, FilterPreset and their drafts/patches
//! ```

// Store contract
pub use crate::store::{ListingStore, PresetStore, Record, SavedRelationStore, Store};

// Backends
pub use crate::file::JsonFileStore;
pub use crate::memory::MemoryStore;

// Error types
pub use crate::error::{Result, StoreError};

// Models
pub use crate::models::{
    Coordinates, FilterPreset, FilterPresetPatch, Listing, ListingPatch, NewFilterPreset,
    NewListing, NewSavedRelation, SavedRelation, SavedRelationPatch,
};
