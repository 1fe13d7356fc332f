//! Error types for the site driver

use reqwest::StatusCode;
use thiserror::Error;

use crate::sites::lifecycle::SiteState;

/// Classified failure of a Pulumi Cloud API call
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("stack not found")]
    NotFound,

    #[error("stack already exists")]
    AlreadyExists,

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response {status}: {body}")]
    UnexpectedResponse { status: StatusCode, body: String },

    #[error("malformed stack state: {0}")]
    MalformedState(#[source] serde_json::Error),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// Failure of a site operation
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Site '{0}' not found")]
    NotFound(String),

    #[error("site already exists")]
    AlreadyExists(String),

    #[error("invalid site id '{0}'")]
    InvalidId(String),

    /// Create stopped after the stack was created; the stack is left as is
    #[error("site '{id}' left in {state} state: {source}")]
    Incomplete {
        id: String,
        state: SiteState,
        #[source]
        source: ApiError,
    },

    #[error("{context}: {source}")]
    Api {
        context: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("Invalid transition: {0}")]
    Transition(String),
}

impl SiteError {
    /// Wrap an API error, mapping a missing stack to a missing site
    pub fn from_api(id: &str, context: &'static str, err: ApiError) -> Self {
        match err {
            ApiError::NotFound => SiteError::NotFound(id.to_string()),
            source => SiteError::Api { context, source },
        }
    }
}

/// Main error type for the site driver
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("API error: {0}")]
    ApiError(#[from] ApiError),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
