//! Dispatch errors.

use thiserror::Error;

/// Errors raised while dispatching a function call. These are caught at the
/// executor boundary and turned into error outputs for the offending call;
/// they never abort a batch.
#[derive(Error, Debug)]
pub enum ToolError {
    /// A required argument was absent from the call.
    #[error("Missing required argument '{0}'")]
    MissingArgument(String),

    /// Arguments were present but malformed.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Function name is not in the registry.
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    /// Result serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
