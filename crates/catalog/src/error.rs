//! Catalog query errors.
//!
//! These are expected outcomes of user queries (a product the user misspelled,
//! a range with swapped bounds), so callers receive them as values and turn
//! them into readable answers rather than failures.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Named product does not exist in the catalog.
    #[error("Product '{0}' not found.")]
    NotFound(String),

    /// Fuzzy lookup scored below the match threshold.
    #[error("No close match found for '{0}'.")]
    NoMatch(String),

    /// Price range with min above max.
    #[error("Invalid price range: minimum {min} is greater than maximum {max}.")]
    InvalidRange { min: Decimal, max: Decimal },
}
