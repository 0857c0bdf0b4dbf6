//! Function-call types following the OpenAI function calling schema.

use crate::error::ToolError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Function advertised to the assistant service (OpenAI-compatible schema).
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Always "function".
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinition,
}

/// Function details within a tool definition.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    /// Function name (e.g. "check_stock").
    pub name: String,
    pub description: String,
    /// JSON Schema for the parameters object.
    pub parameters: serde_json::Value,
}

/// Function call requested by the assistant mid-run.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ToolCall {
    /// Opaque id assigned by the remote service.
    pub id: String,
    /// Always "function".
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

/// Name and raw arguments of a requested call.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    /// JSON object text, parsed per tool.
    pub arguments: String,
}

/// Result of dispatching one call. Error results carry a readable message in
/// `content` so the batch stays complete.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// ID of the tool call this responds to.
    pub tool_call_id: String,
    pub content: String,
    pub success: bool,
}

impl ToolResult {
    pub fn success(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
            success: true,
        }
    }

    pub fn error(tool_call_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: message.into(),
            success: false,
        }
    }
}

/// Trait for catalog functions callable by the assistant.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Schema advertised at assistant-registration time. Must describe the
    /// same parameters `execute` parses, or the service will request calls
    /// dispatch cannot satisfy.
    fn definition(&self) -> ToolDefinition;

    fn name(&self) -> &str;

    /// Execute with the call's raw JSON arguments.
    async fn execute(&self, arguments: &str) -> Result<String, ToolError>;
}

/// Parse a call's argument payload into a typed struct, mapping a missing
/// required field to [`ToolError::MissingArgument`]. Zero-parameter functions
/// may arrive with an empty arguments string.
pub fn parse_args<T: DeserializeOwned>(arguments: &str) -> Result<T, ToolError> {
    let trimmed = arguments.trim();
    let source = if trimmed.is_empty() { "{}" } else { trimmed };

    serde_json::from_str(source).map_err(|e| {
        let message = e.to_string();
        match message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            Some(field) => ToolError::MissingArgument(field.to_string()),
            None => ToolError::InvalidArguments(message),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct NameArgs {
        #[serde(rename = "productName")]
        product_name: String,
    }

    #[derive(Deserialize)]
    struct NoArgs {}

    #[test]
    fn test_parse_args_reads_named_fields() {
        let args: NameArgs = parse_args(r#"{"productName": "Smart Fitness Watch"}"#).unwrap();
        assert_eq!(args.product_name, "Smart Fitness Watch");
    }

    #[test]
    fn test_parse_args_maps_missing_field() {
        let err = parse_args::<NameArgs>("{}").unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(field) if field == "productName"));
    }

    #[test]
    fn test_parse_args_maps_malformed_payload() {
        let err = parse_args::<NameArgs>("not json").unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_parse_args_accepts_empty_payload_for_no_arg_functions() {
        assert!(parse_args::<NoArgs>("").is_ok());
        assert!(parse_args::<NoArgs>("{}").is_ok());
    }
}
