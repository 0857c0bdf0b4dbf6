//! In-memory catalog with pure query operations.

use crate::error::CatalogError;
use crate::types::Product;
use rust_decimal::Decimal;

/// Fixed product catalog. All operations are read-only and O(n) over the
/// product list.
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Minimum similarity score (0-100) for a fuzzy lookup to count as a hit.
    pub const DEFAULT_MATCH_THRESHOLD: f64 = 70.0;

    /// Build a catalog from an explicit product list.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The demo seed catalog.
    pub fn seed() -> Self {
        Self::with_products(vec![
            Product::new(
                101,
                "Wireless Bluetooth Headphones",
                "High-quality wireless headphones with noise-cancellation and 30 hours battery life.",
                Decimal::new(7999, 2),
                true,
            ),
            Product::new(
                102,
                "Smart Fitness Watch",
                "Fitness watch with heart rate monitor, GPS tracking, and waterproof design.",
                Decimal::new(12999, 2),
                true,
            ),
            Product::new(
                103,
                "Portable Power Bank 20,000mAh",
                "High-capacity portable charger with fast charging and dual USB ports.",
                Decimal::new(2999, 2),
                true,
            ),
            Product::new(
                104,
                "USB-C Hub Adapter",
                "7-in-1 USB-C hub with HDMI, USB 3.0, SD card reader, and PD charging.",
                Decimal::new(3999, 2),
                true,
            ),
            Product::new(
                105,
                "LED Desk Lamp with Wireless Charger",
                "Dimmable LED lamp with wireless phone charging and touch controls.",
                Decimal::new(4999, 2),
                false,
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Every product name, in catalog order.
    pub fn product_names(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.name.as_str()).collect()
    }

    /// Case-insensitive exact lookup by name.
    pub fn get(&self, name: &str) -> Result<&Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    pub fn price(&self, name: &str) -> Result<Decimal, CatalogError> {
        self.get(name).map(|p| p.price)
    }

    pub fn in_stock(&self, name: &str) -> Result<bool, CatalogError> {
        self.get(name).map(|p| p.in_stock)
    }

    /// Names of in-stock products, catalog order preserved.
    pub fn names_in_stock(&self) -> Vec<&str> {
        self.products
            .iter()
            .filter(|p| p.in_stock)
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn count_in_stock(&self) -> usize {
        self.names_in_stock().len()
    }

    /// Products whose price falls within the inclusive range `[min, max]`.
    /// A range with `min > max` is rejected; an empty result is `Ok`.
    pub fn filter_by_price(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<&Product>, CatalogError> {
        if min > max {
            return Err(CatalogError::InvalidRange { min, max });
        }
        Ok(self
            .products
            .iter()
            .filter(|p| p.price >= min && p.price <= max)
            .collect())
    }

    /// Fuzzy lookup: score every product name against `query` and return the
    /// best-scoring product if it reaches `threshold` (0-100 scale).
    ///
    /// Ties resolve to the first maximal name in catalog order; nothing
    /// depends on which of two equally-scored names wins.
    pub fn closest_match(
        &self,
        query: &str,
        threshold: f64,
    ) -> Result<&Product, CatalogError> {
        let best = self
            .products
            .iter()
            .map(|p| (p, similarity(query, &p.name)))
            .fold(None, |best: Option<(&Product, f64)>, candidate| match best {
                Some((_, score)) if score >= candidate.1 => best,
                _ => Some(candidate),
            });

        match best {
            Some((product, score)) if score >= threshold => Ok(product),
            _ => Err(CatalogError::NoMatch(query.to_string())),
        }
    }

    /// Recommendations for a known product.
    ///
    /// The similarity logic behind recommendations is not defined yet, so a
    /// known product yields an empty list; only an unknown product is an
    /// error.
    pub fn recommendations(&self, name: &str) -> Result<Vec<&Product>, CatalogError> {
        self.get(name)?;
        Ok(Vec::new())
    }
}

/// Token-order-insensitive similarity between two strings, scaled to 0-100.
///
/// Both sides are lowercased, whitespace-tokenized, and token-sorted before a
/// bigram (Sorensen-Dice) comparison, so "Bluetooth Headphone" scores the
/// same against "Headphone Bluetooth".
fn similarity(a: &str, b: &str) -> f64 {
    strsim::sorensen_dice(&canonical(a), &canonical(b)) * 100.0
}

fn canonical(s: &str) -> String {
    let lowered = s.to_lowercase();
    let mut tokens: Vec<&str> = lowered.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
