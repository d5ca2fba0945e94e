//! API client error types.

use console_forms::GatewayError;
use thiserror::Error;

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// API client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a non-success status.
    #[error("Response error: {status} - {message}")]
    Response {
        /// HTTP status code.
        status: u16,
        /// Message from the body's `error` field, or the status reason.
        message: String,
    },

    /// Failed to build the underlying client.
    #[error("Failed to build client: {0}")]
    Build(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Underlying HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl ClientError {
    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Check if this is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect())
    }

    /// Get the HTTP status code if this is a response error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<ClientError> for GatewayError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Response { status, message } => GatewayError::Rejected { status, message },
            other if other.is_timeout() => GatewayError::Transport("request timed out".to_string()),
            other => GatewayError::Transport(other.to_string()),
        }
    }
}
