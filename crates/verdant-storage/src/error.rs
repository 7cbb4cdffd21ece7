//! Error types for verdant-storage

use thiserror::Error;

/// Result type alias for verdant-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in verdant-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from verdant-core
    #[error("Core error: {0}")]
    Core(#[from] verdant_core::Error),

    /// The backing store could not be reached or refused the operation.
    #[error("Storage backend unavailable: {message}")]
    Unavailable {
        /// What went wrong
        message: String,
    },

    /// A stored document could not be decoded.
    #[error("Corrupt document '{id}': {source}")]
    Corrupt {
        /// Section id or file name of the document
        id: String,
        /// Decoding error
        #[source]
        source: serde_json::Error,
    },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Core(err.into())
    }
}

impl Error {
    /// Creates a new unavailable-backend error.
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Error::Unavailable {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Core(verdant_core::Error::NotFound { .. }))
    }

    /// Returns `true` for errors caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_client_error())
    }
}
