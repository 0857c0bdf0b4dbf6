//! Catalog-wide listings and counts. None of these take arguments.

use crate::error::ToolError;
use crate::types::{FunctionDefinition, Tool, ToolDefinition};
use async_trait::async_trait;
use catalog::Catalog;
use std::sync::Arc;

fn no_params_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {},
        "required": [],
        "additionalProperties": false
    })
}

/// `get_all_products` - every product name.
pub struct AllProductsTool {
    catalog: Arc<Catalog>,
}

impl AllProductsTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for AllProductsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".into(),
            function: FunctionDefinition {
                name: "get_all_products".into(),
                description: "Returns a list of all products available".into(),
                parameters: no_params_schema(),
            },
        }
    }

    fn name(&self) -> &str {
        "get_all_products"
    }

    async fn execute(&self, _arguments: &str) -> Result<String, ToolError> {
        Ok(serde_json::to_string(&self.catalog.product_names())?)
    }
}

/// `get_products_in_stock` - names of available products.
pub struct ProductsInStockTool {
    catalog: Arc<Catalog>,
}

impl ProductsInStockTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for ProductsInStockTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".into(),
            function: FunctionDefinition {
                name: "get_products_in_stock".into(),
                description: "Returns a list of product names that are currently in stock".into(),
                parameters: no_params_schema(),
            },
        }
    }

    fn name(&self) -> &str {
        "get_products_in_stock"
    }

    async fn execute(&self, _arguments: &str) -> Result<String, ToolError> {
        Ok(serde_json::to_string(&self.catalog.names_in_stock())?)
    }
}

/// `count_available_products` - how many products are in stock.
pub struct CountAvailableTool {
    catalog: Arc<Catalog>,
}

impl CountAvailableTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for CountAvailableTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".into(),
            function: FunctionDefinition {
                name: "count_available_products".into(),
                description: "Returns the count of products that are currently in stock".into(),
                parameters: no_params_schema(),
            },
        }
    }

    fn name(&self) -> &str {
        "count_available_products"
    }

    async fn execute(&self, _arguments: &str) -> Result<String, ToolError> {
        Ok(self.catalog.count_in_stock().to_string())
    }
}
