//! Error types for verdant-api.
//!
//! Every handler returns [`Result`]; [`Error`] turns itself into a JSON
//! `{ "error": ... }` response with a status chosen by what went wrong.

use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Result type alias for verdant-api handlers.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the HTTP layer.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from verdant-core
    #[error(transparent)]
    Core(#[from] verdant_core::Error),

    /// Error from verdant-storage
    #[error(transparent)]
    Storage(#[from] verdant_storage::Error),

    /// Error from verdant-editor
    #[error(transparent)]
    Editor(#[from] verdant_editor::Error),

    /// Request body could not be read as expected.
    #[error("{0}")]
    BadRequest(String),

    /// Input failed validation on several fields at once.
    #[error("{message}")]
    Fields {
        /// Summary message
        message: String,
        /// Per-field messages
        fields: BTreeMap<String, String>,
    },

    /// A multi-slice write stopped part-way.
    #[error("Failed to save '{failed}' (saved: {})", display_saved(.saved))]
    PartialSave {
        /// Slice that failed
        failed: String,
        /// Slices written before the failure
        saved: Vec<String>,
    },
}

fn display_saved(saved: &[String]) -> String {
    if saved.is_empty() {
        "none".to_string()
    } else {
        saved.join(", ")
    }
}

impl Error {
    /// Creates a bad-request error.
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Error::BadRequest(message.into())
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Core(e) => core_status(e),
            Error::Storage(verdant_storage::Error::Core(e)) => core_status(e),
            Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Editor(verdant_editor::Error::Core(e)) => core_status(e),
            Error::Editor(verdant_editor::Error::Storage(verdant_storage::Error::Core(e))) => {
                core_status(e)
            }
            Error::Editor(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Error::Editor(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::BadRequest(_) | Error::Fields { .. } => StatusCode::BAD_REQUEST,
            Error::PartialSave { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a client.
    ///
    /// Server-side failures get a generic message; the detail is logged.
    pub fn public_message(&self) -> String {
        if self.status().is_server_error() && !matches!(self, Error::PartialSave { .. }) {
            "Internal server error".to_string()
        } else {
            match self {
                Error::Core(verdant_core::Error::Validation { message, .. }) => message.clone(),
                Error::Storage(verdant_storage::Error::Core(verdant_core::Error::Validation {
                    message,
                    ..
                })) => message.clone(),
                other => other.to_string(),
            }
        }
    }
}

fn core_status(err: &verdant_core::Error) -> StatusCode {
    match err {
        verdant_core::Error::Validation { .. } => StatusCode::BAD_REQUEST,
        verdant_core::Error::NotFound { .. } => StatusCode::NOT_FOUND,
        verdant_core::Error::Conflict { .. } => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, "Request failed: {self}");
        } else {
            tracing::debug!(%status, "Request rejected: {self}");
        }
        let body = match &self {
            Error::Fields { message, fields } => json!({ "error": message, "fields": fields }),
            Error::PartialSave { saved, .. } => {
                json!({ "error": self.public_message(), "saved": saved })
            }
            _ => json!({ "error": self.public_message() }),
        };
        (status, Json(body)).into_response()
    }
}
