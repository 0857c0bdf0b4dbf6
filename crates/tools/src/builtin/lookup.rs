//! Single-product lookups: details, price, stock.

use crate::error::ToolError;
use crate::types::{parse_args, FunctionDefinition, Tool, ToolDefinition};
use async_trait::async_trait;
use catalog::Catalog;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
struct ProductNameArgs {
    #[serde(rename = "productName")]
    product_name: String,
}

fn product_name_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "productName": {
                "type": "string",
                "description": "Name of the product"
            }
        },
        "required": ["productName"],
        "additionalProperties": false
    })
}

/// `get_product_info` - full record for one product.
pub struct ProductInfoTool {
    catalog: Arc<Catalog>,
}

impl ProductInfoTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for ProductInfoTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".into(),
            function: FunctionDefinition {
                name: "get_product_info".into(),
                description: "Returns product details by name".into(),
                parameters: product_name_schema(),
            },
        }
    }

    fn name(&self) -> &str {
        "get_product_info"
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: ProductNameArgs = parse_args(arguments)?;
        match self.catalog.get(&args.product_name) {
            Ok(product) => Ok(serde_json::to_string(product)?),
            Err(miss) => Ok(miss.to_string()),
        }
    }
}

/// `get_product_price` - price for one product.
pub struct ProductPriceTool {
    catalog: Arc<Catalog>,
}

impl ProductPriceTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for ProductPriceTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".into(),
            function: FunctionDefinition {
                name: "get_product_price".into(),
                description: "Returns the price of the specified product".into(),
                parameters: product_name_schema(),
            },
        }
    }

    fn name(&self) -> &str {
        "get_product_price"
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: ProductNameArgs = parse_args(arguments)?;
        match self.catalog.price(&args.product_name) {
            Ok(price) => Ok(price.to_string()),
            Err(miss) => Ok(miss.to_string()),
        }
    }
}

/// `check_stock` - availability flag for one product.
pub struct CheckStockTool {
    catalog: Arc<Catalog>,
}

impl CheckStockTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for CheckStockTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".into(),
            function: FunctionDefinition {
                name: "check_stock".into(),
                description: "Checks if the product is in stock by name".into(),
                parameters: product_name_schema(),
            },
        }
    }

    fn name(&self) -> &str {
        "check_stock"
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: ProductNameArgs = parse_args(arguments)?;
        match self.catalog.in_stock(&args.product_name) {
            Ok(available) => Ok(available.to_string()),
            Err(miss) => Ok(miss.to_string()),
        }
    }
}
