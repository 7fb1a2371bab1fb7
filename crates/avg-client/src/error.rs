use thiserror::Error;

/// Result type alias for collaborator calls
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from the document store and webhook clients
#[derive(Error, Debug)]
pub enum ClientError {
    /// Server answered with a non-success status
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Response body or error message
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Invalid endpoint or proxy URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sample file could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// File being read
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// Build an I/O error tagged with a path
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the HTTP status code if the server answered
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
