//! Wire types for the assistant service (OpenAI Assistants v2 shapes).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote run lifecycle, observed via polling. Only the service mutates it;
/// the client influences it solely by submitting messages or tool outputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Completed,
    Failed,
    Cancelled,
    Expired,
}

impl RunStatus {
    /// Whether the run can make no further progress.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired
        )
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
        };
        f.write_str(name)
    }
}

/// A run over a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    pub id: String,
    pub thread_id: String,
    pub assistant_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub required_action: Option<RequiredAction>,
    #[serde(default)]
    pub last_error: Option<LastError>,
}

impl Run {
    /// Pending tool calls when the run is waiting on local execution.
    pub fn pending_tool_calls(&self) -> &[ToolCall] {
        self.required_action
            .as_ref()
            .map(|action| action.submit_tool_outputs.tool_calls.as_slice())
            .unwrap_or(&[])
    }
}

/// Why a run reached a terminal failure state.
#[derive(Debug, Clone, Deserialize)]
pub struct LastError {
    pub code: String,
    pub message: String,
}

/// Action the service needs before generation resumes.
#[derive(Debug, Clone, Deserialize)]
pub struct RequiredAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub submit_tool_outputs: SubmitToolOutputs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitToolOutputs {
    pub tool_calls: Vec<ToolCall>,
}

/// One requested function invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    /// JSON object text.
    pub arguments: String,
}

/// Output for one tool call, keyed by the call's id.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitToolOutputsRequest {
    pub tool_outputs: Vec<ToolOutput>,
}

/// A conversation thread handle.
#[derive(Debug, Clone, Deserialize)]
pub struct Thread {
    pub id: String,
    pub created_at: u64,
}

/// Registered assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct Assistant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub model: String,
}

/// One-time assistant registration payload. The advertised tools must match
/// the local dispatch table exactly, or the service will request calls the
/// driver cannot satisfy.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAssistantRequest {
    pub model: String,
    pub name: String,
    pub instructions: String,
    pub tools: Vec<ToolDefinition>,
}

/// Tool definition advertised at registration time.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinitionApi,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinitionApi {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRunRequest {
    pub assistant_id: String,
}

/// A message in a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageObject {
    pub id: String,
    pub role: String,
    pub content: Vec<MessageContent>,
    pub created_at: u64,
}

impl MessageObject {
    /// Text of the first text block, if any.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find_map(|block| block.text.as_ref())
            .map(|t| t.value.as_str())
    }
}

/// A content block. Non-text blocks (images) deserialize with `text: None`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageContent {
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default)]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub value: String,
}

/// Message listing, newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageList {
    pub data: Vec<MessageObject>,
    #[serde(default)]
    pub has_more: bool,
}
