use std::time::Duration;

use thiserror::Error;

/// Main error type for the alumni portal
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: assistant endpoint returned status {status}")]
    ApiError { status: u16 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Assistant call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Assistant error: {0}")]
    AssistantError(String),

    #[error("UI error: {0}")]
    UIError(String),
}

impl From<figment::Error> for PortalError {
    fn from(err: figment::Error) -> Self {
        PortalError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::InitError(format!("invalid record data: {}", err))
    }
}
