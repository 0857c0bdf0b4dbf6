//! Application error types.

use crate::driver::DriverError;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Assistant service error: {0}")]
    Assistants(#[from] assistants_client::AssistantsError),

    #[error("Run error: {0}")]
    Driver(#[from] DriverError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
