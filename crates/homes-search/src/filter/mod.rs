//! Filter state and predicate compilation.
//!
//! A [`FilterState`] is the user's current set of structured constraints plus
//! the free-text query. [`compile`] turns it into a [`Predicate`]: the logical
//! AND of one [`Clause`] per constrained field, evaluated in a fixed order.
//!
//! # Clauses
//!
//! | Field | Clause |
//! |-------|--------|
//! | `search_query` | case-insensitive substring of title, address or description |
//! | `price_min` / `price_max` | inclusive price bounds |
//! | `property_types` | exact membership |
//! | `bedrooms_min` / `bathrooms_min` | lower bounds |
//! | `square_feet_min` / `square_feet_max` | inclusive area bounds |
//! | `location` | case-insensitive substring of address |
//! | `amenities` | every amenity present in the listing's features |
//!
//! Unset or empty fields produce no clause, so the default state compiles to a
//! predicate that accepts every listing.
//!
//! # Example
//!
//! ```
//! use homes_search::filter::{compile, FilterState, FilterUpdate};
//!
//! let state = FilterState::default()
//!     .set_field(FilterUpdate::BedroomsMin(Some(3)))
//!     .set_field(FilterUpdate::Location("austin".to_string()));
//!
//! let predicate = compile(&state);
//! assert_eq!(predicate.clauses().len(), 2);
//! ```

mod predicate;
mod state;

pub use predicate::{compile, Clause, Predicate};
pub use state::{FilterState, FilterUpdate};

#[cfg(test)]
mod tests;
