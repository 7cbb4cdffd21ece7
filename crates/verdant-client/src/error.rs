//! Error types for verdant-client

use thiserror::Error;

/// Result type alias for verdant-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in verdant-client
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from verdant-core
    #[error("Core error: {0}")]
    Core(#[from] verdant_core::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// The `error` field of the response body, or the raw body
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response from {endpoint}: {message}")]
    UnexpectedResponse {
        /// Request path
        endpoint: String,
        /// What was wrong
        message: String,
    },
}

impl Error {
    /// Creates an unexpected-response error.
    pub fn unexpected<E: Into<String>, M: Into<String>>(endpoint: E, message: M) -> Self {
        Error::UnexpectedResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<Error> for verdant_storage::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Core(e) => verdant_storage::Error::Core(e),
            Error::Api { status: 400, message } => verdant_core::Error::validation(message).into(),
            Error::Api { status: 404, message } => verdant_core::Error::not_found(message).into(),
            Error::Api { status: 409, message } => verdant_core::Error::conflict(message).into(),
            other => verdant_storage::Error::unavailable(other.to_string()),
        }
    }
}

impl From<Error> for verdant_editor::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Api { message, .. } => verdant_editor::Error::upload(message),
            other => verdant_editor::Error::Storage(other.into()),
        }
    }
}
