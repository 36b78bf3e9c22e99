//! Record types held by the stores.
//!
//! Each record comes with a draft type (the input to `create`, without an
//! identifier) and a patch type (the input to `update`, every field optional).

mod listing;
mod preset;
mod saved;

pub use listing::*;
pub use preset::*;
pub use saved::*;
