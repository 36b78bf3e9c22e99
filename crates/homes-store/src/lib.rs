//! Data-access layer for homes.
//!
//! This crate defines the records the search engine reads (listings, saved
//! relations, filter presets), the generic [`Store`] contract every backend
//! implements, and two backends:
//!
//! - [`MemoryStore`] - records held in process, for sessions and tests
//! - [`JsonFileStore`] - one JSON file per record type under a data directory
//!
//! # Quick Start
//!
//! ```
//! use homes_store::prelude::*;
//!
//! # async fn example() -> homes_store::Result<()> {
//! let listings: MemoryStore<Listing> = MemoryStore::new();
//! let all = listings.get_all().await?;
//! assert!(all.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod file;
pub mod memory;
pub mod models;
pub mod prelude;
pub mod store;

pub use error::{Result, StoreError};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::{ListingStore, PresetStore, Record, SavedRelationStore, Store};
