//! Product record types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single catalog entry. Records are immutable for the lifetime of the
/// process; the catalog is a fixed seed set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u32,
    /// Unique, case-insensitive lookup key.
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub in_stock: bool,
}

impl Product {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        in_stock: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            in_stock,
        }
    }
}
