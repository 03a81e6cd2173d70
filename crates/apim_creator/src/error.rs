//! Error types for template generation.

use thiserror::Error;

/// Result type alias for creator operations.
pub type CreatorResult<T> = Result<T, CreatorError>;

/// Errors that can occur while generating templates.
#[derive(Error, Debug)]
pub enum CreatorError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Failed to fetch {location}: {message}")]
    Fetch { location: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
