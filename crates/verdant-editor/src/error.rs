//! Error types for verdant-editor.

use thiserror::Error;

/// Errors raised while editing or persisting a section.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Validation or identifier errors from the core types.
    #[error(transparent)]
    Core(#[from] verdant_core::Error),

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] verdant_storage::Error),

    /// A field path that could not be parsed.
    #[error("Invalid field path '{path}': {message}")]
    Path {
        /// Offending path text
        path: String,
        /// What was wrong with it
        message: String,
    },

    /// The editor has no draft to work on.
    #[error("Editor for '{section}' is not ready ({status})")]
    NotReady {
        /// Section being edited
        section: String,
        /// Status at the time of the call
        status: String,
    },

    /// An upload was refused or failed.
    #[error("Upload failed: {message}")]
    Upload {
        /// Message shown next to the image control
        message: String,
    },
}

/// Result type alias for verdant-editor.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a validation error for a field path.
    pub fn invalid_edit<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::Core(verdant_core::Error::validation_field(path, message))
    }

    /// Create a path parse error.
    pub fn path<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::Path {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an upload error.
    pub fn upload<S: Into<String>>(message: S) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }

    /// Returns `true` if the error was caused by bad input rather than a
    /// failing backend.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Core(e) => e.is_client_error(),
            Error::Storage(e) => e.is_client_error(),
            Error::Path { .. } | Error::Upload { .. } => true,
            Error::NotReady { .. } => false,
        }
    }
}
