//! Filter, search and saved-listing engine for homes.
//!
//! This crate turns a structured [`FilterState`] plus a free-text query into a
//! single predicate over listings, applies it to a catalog while preserving
//! catalog order, and keeps the "is saved" flag of every listing derived from
//! the saved-relation store.
//!
//! # Example
//!
//! ```
//! use homes_search::{search, FilterState, FilterUpdate};
//! use homes_store::models::Listing;
//!
//! let catalog: Vec<Listing> = vec![];
//! let state = FilterState::default().set_field(FilterUpdate::PriceMax(Some(500_000)));
//!
//! let results = search(&catalog, &state);
//! assert_eq!(results.result_count(), 0);
//! assert!(results.has_active_constraint());
//! ```

pub mod facets;
pub mod filter;
pub mod preset;
pub mod saved;
pub mod search;
pub mod session;

pub use facets::CatalogFacets;
pub use filter::{compile, Clause, FilterState, FilterUpdate, Predicate};
pub use preset::Presets;
pub use saved::{SavedIndex, SavedListing, ToggleAction, ToggleOutcome};
pub use search::{search, SearchResults};
pub use session::BrowseSession;
