//! Search over a listing catalog.
//!
//! [`search`] compiles the filter state and applies it to the catalog as a
//! stable filter: results keep catalog order and are never re-ranked. Every
//! call recomputes from its inputs; nothing is carried between calls.

use homes_store::models::Listing;
use tracing::debug;

use crate::filter::{compile, FilterState};

/// The outcome of a search: matching listings in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults<'a> {
    listings: Vec<&'a Listing>,
    has_active_constraint: bool,
}

impl<'a> SearchResults<'a> {
    /// Returns the matching listings in catalog order.
    pub fn listings(&self) -> &[&'a Listing] {
        &self.listings
    }

    /// Returns the number of matching listings.
    pub fn result_count(&self) -> usize {
        self.listings.len()
    }

    /// Returns true if the search ran with any constraint, including a
    /// non-blank free-text query.
    pub fn has_active_constraint(&self) -> bool {
        self.has_active_constraint
    }

    /// Returns true if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Iterates over the matching listings.
    pub fn iter(&self) -> impl Iterator<Item = &'a Listing> + '_ {
        self.listings.iter().copied()
    }

    /// Clones the matching listings out of the catalog.
    pub fn to_vec(&self) -> Vec<Listing> {
        self.listings.iter().map(|l| (*l).clone()).collect()
    }
}

/// Filters `listings` by `state`, preserving input order.
///
/// Never fails: an empty catalog or a state that matches nothing yields an
/// empty result.
///
/// # Example
///
/// ```
/// use homes_search::{search, FilterState};
///
/// let results = search(&[], &FilterState::default());
/// assert!(results.is_empty());
/// assert!(!results.has_active_constraint());
/// ```
pub fn search<'a>(listings: &'a [Listing], state: &FilterState) -> SearchResults<'a> {
    let predicate = compile(state);
    let matches = predicate.filter_listings(listings);

    debug!(
        catalog = listings.len(),
        matched = matches.len(),
        "search complete"
    );

    SearchResults {
        listings: matches,
        has_active_constraint: state.is_active(),
    }
}
