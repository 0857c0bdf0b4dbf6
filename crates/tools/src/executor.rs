//! Dispatches requested calls against the registry.

use crate::error::ToolError;
use crate::registry::ToolRegistry;
use crate::types::{ToolCall, ToolResult};
use std::sync::Arc;
use tracing::{info, warn};

/// Executes tool calls, converting every failure into an error result for the
/// offending call id. A run is blocked by the remote service if any call's
/// output goes missing, so a batch always yields one result per call.
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Execute a single call. Never panics and never returns nothing: an
    /// unknown function or a tool error becomes an error result carrying the
    /// call's id.
    pub async fn execute(&self, tool_call: &ToolCall) -> ToolResult {
        let name = &tool_call.function.name;
        info!(function = %name, call_id = %tool_call.id, "Dispatching function call");

        let tool = match self.registry.get(name) {
            Some(tool) => tool,
            None => {
                warn!(function = %name, "Function not in registry");
                return ToolResult::error(
                    &tool_call.id,
                    ToolError::UnknownFunction(name.clone()).to_string(),
                );
            }
        };

        match tool.execute(&tool_call.function.arguments).await {
            Ok(content) => {
                info!(function = %name, len = content.len(), "Function call succeeded");
                ToolResult::success(&tool_call.id, content)
            }
            Err(e) => {
                warn!(function = %name, error = %e, "Function call failed");
                ToolResult::error(&tool_call.id, format!("Error: {}", e))
            }
        }
    }

    /// Execute every call in a requires-action batch. Failures of individual
    /// calls do not stop the batch; the result set has exactly one entry per
    /// call, in call order.
    pub async fn execute_batch(&self, tool_calls: &[ToolCall]) -> Vec<ToolResult> {
        let mut results = Vec::with_capacity(tool_calls.len());
        for tool_call in tool_calls {
            results.push(self.execute(tool_call).await);
        }
        results
    }
}
