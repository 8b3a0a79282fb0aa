//! Error types for the auditop CLI

use std::time::Duration;
use thiserror::Error;

/// Result type alias for auditop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result of a single Grist API call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Errors returned by the Grist records API.
///
/// Cloneable so a single failed batch write can be reported to every
/// submitter whose edit was part of it.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("[Grist API] 401: Authentication failed. Check your API key with `auditop status`.")]
    Unauthorized,

    #[error("[Grist API] 403: Access denied to this document.")]
    Forbidden,

    #[error("[Grist API] 404: {0}")]
    NotFound(String),

    #[error("[Grist API] 429: Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("[Grist API] 400: {0}")]
    BadRequest(String),

    #[error("[Grist API] {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("[Grist API] Network error: {0}")]
    Network(String),

    #[error("[Grist API] Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to Grist".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Failure to persist a batch of buffered answer edits.
#[derive(Debug, Clone, Error)]
pub enum SaveError {
    #[error("Not saved: {0}")]
    Rejected(#[from] ApiError),

    #[error("Not saved: the autosave buffer was closed before the edit was written")]
    Cancelled,

    #[error("Not saved: replaced by a pending reset of the same question")]
    Superseded,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `auditop init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Grist API key not configured. Run `auditop init` or set AUDITOP_API_KEY.")]
    MissingApiKey,

    #[error("Grist document ID not configured. Run `auditop init` or set AUDITOP_DOC_ID.")]
    MissingDocId,

    #[error("Grist API URL not configured. Run `auditop init` or set AUDITOP_API_URL.")]
    MissingApiUrl,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
