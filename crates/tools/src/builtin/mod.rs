//! Built-in catalog functions.

mod listing;
mod lookup;
mod search;

pub use listing::{AllProductsTool, CountAvailableTool, ProductsInStockTool};
pub use lookup::{CheckStockTool, ProductInfoTool, ProductPriceTool};
pub use search::{ClosestProductTool, PriceRangeTool, RecommendationsTool};

use crate::registry::ToolRegistry;
use catalog::Catalog;
use std::sync::Arc;

/// Registry with the full fixed function set over one catalog.
pub fn full_registry(catalog: Arc<Catalog>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ProductInfoTool::new(catalog.clone())));
    registry.register(Arc::new(CheckStockTool::new(catalog.clone())));
    registry.register(Arc::new(AllProductsTool::new(catalog.clone())));
    registry.register(Arc::new(ProductPriceTool::new(catalog.clone())));
    registry.register(Arc::new(PriceRangeTool::new(catalog.clone())));
    registry.register(Arc::new(ProductsInStockTool::new(catalog.clone())));
    registry.register(Arc::new(CountAvailableTool::new(catalog.clone())));
    registry.register(Arc::new(ClosestProductTool::new(catalog.clone())));
    registry.register(Arc::new(RecommendationsTool::new(catalog)));
    registry
}
