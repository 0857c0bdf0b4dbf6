//! Fuzzy lookup, price filtering, and recommendations.

use crate::error::ToolError;
use crate::types::{parse_args, FunctionDefinition, Tool, ToolDefinition};
use async_trait::async_trait;
use catalog::Catalog;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
struct QueryArgs {
    query: String,
}

#[derive(Deserialize)]
struct PriceRangeArgs {
    min_price: Decimal,
    max_price: Decimal,
}

#[derive(Deserialize)]
struct ProductNameArgs {
    #[serde(rename = "productName")]
    product_name: String,
}

/// `find_closest_product` - fuzzy name lookup tolerating imprecise phrasing.
pub struct ClosestProductTool {
    catalog: Arc<Catalog>,
}

impl ClosestProductTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for ClosestProductTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".into(),
            function: FunctionDefinition {
                name: "find_closest_product".into(),
                description:
                    "Finds the product whose name most closely matches the query, tolerating typos and word-order differences"
                        .into(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Approximate product name to search for"
                        }
                    },
                    "required": ["query"],
                    "additionalProperties": false
                }),
            },
        }
    }

    fn name(&self) -> &str {
        "find_closest_product"
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: QueryArgs = parse_args(arguments)?;
        match self
            .catalog
            .closest_match(&args.query, Catalog::DEFAULT_MATCH_THRESHOLD)
        {
            Ok(product) => Ok(serde_json::to_string(product)?),
            Err(miss) => Ok(miss.to_string()),
        }
    }
}

/// `filter_products_by_price_range` - products priced within [min, max].
pub struct PriceRangeTool {
    catalog: Arc<Catalog>,
}

impl PriceRangeTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for PriceRangeTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".into(),
            function: FunctionDefinition {
                name: "filter_products_by_price_range".into(),
                description: "Returns a list of products within a specified price range".into(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "min_price": {
                            "type": "number",
                            "description": "Lower bound of the price range, inclusive"
                        },
                        "max_price": {
                            "type": "number",
                            "description": "Upper bound of the price range, inclusive"
                        }
                    },
                    "required": ["min_price", "max_price"],
                    "additionalProperties": false
                }),
            },
        }
    }

    fn name(&self) -> &str {
        "filter_products_by_price_range"
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: PriceRangeArgs = parse_args(arguments)?;
        match self.catalog.filter_by_price(args.min_price, args.max_price) {
            Ok(products) => Ok(serde_json::to_string(&products)?),
            Err(invalid) => Ok(invalid.to_string()),
        }
    }
}

/// `get_recommendations` - similar products for a known product.
///
/// The similarity logic is not defined yet; a known product yields an empty
/// list, and the description says so to keep the model from over-promising.
pub struct RecommendationsTool {
    catalog: Arc<Catalog>,
}

impl RecommendationsTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for RecommendationsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".into(),
            function: FunctionDefinition {
                name: "get_recommendations".into(),
                description:
                    "Returns recommended products similar to the specified product; the list may be empty"
                        .into(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "productName": {
                            "type": "string",
                            "description": "Name of the product to base recommendations on"
                        }
                    },
                    "required": ["productName"],
                    "additionalProperties": false
                }),
            },
        }
    }

    fn name(&self) -> &str {
        "get_recommendations"
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: ProductNameArgs = parse_args(arguments)?;
        match self.catalog.recommendations(&args.product_name) {
            Ok(products) => Ok(serde_json::to_string(&products)?),
            Err(miss) => Ok(miss.to_string()),
        }
    }
}
