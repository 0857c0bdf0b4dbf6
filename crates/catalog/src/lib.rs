//! In-memory product catalog for the shopping assistant.
//!
//! Holds a fixed seed set of products and exposes pure query operations:
//! exact and fuzzy lookup, stock checks, and price filtering. Expected misses
//! (unknown product, weak fuzzy match, swapped range bounds) come back as
//! [`CatalogError`] values so callers can render them as answers.

mod error;
mod store;
mod types;

pub use error::CatalogError;
pub use store::Catalog;
pub use types::Product;
