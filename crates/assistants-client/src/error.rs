//! Assistant service client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Authentication failed")]
    Unauthorized,

    /// The service does not know the requested resource (thread, run,
    /// assistant). Distinct from `Api` so callers can recover from stale ids.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
