//! Error types for the geodash OGC client.

use thiserror::Error;

/// Result type alias using OgcError.
pub type OgcResult<T> = Result<T, OgcError>;

/// Primary error type for URL building and layer access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OgcError {
    /// Caller error: malformed base URL, empty layer id.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network failure, timeout or non-success HTTP status.
    #[error("Remote fetch failed for {url}: {message}")]
    RemoteFetch { url: String, message: String },

    /// Response body is not a valid feature collection.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The HTTP client could not be constructed, e.g. TLS backend init.
    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),
}

impl OgcError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        OgcError::InvalidInput(message.into())
    }

    pub fn remote_fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        OgcError::RemoteFetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Whether a caller may reasonably retry the failed operation.
    ///
    /// Only remote failures qualify; nothing in this workspace retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OgcError::RemoteFetch { .. })
    }

    /// Short, stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            OgcError::InvalidInput(_) => "invalid_input",
            OgcError::RemoteFetch { .. } => "remote_fetch",
            OgcError::Parse(_) => "parse",
            OgcError::HttpClient(_) => "http_client",
        }
    }
}

impl From<serde_json::Error> for OgcError {
    fn from(err: serde_json::Error) -> Self {
        OgcError::Parse(format!("JSON error: {}", err))
    }
}
