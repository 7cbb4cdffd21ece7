//! HTTP handlers, grouped by surface.

pub mod admin;
pub mod contact;
pub mod health;
pub mod resources;
pub mod sections;
pub mod seed;
pub mod site;
pub mod uploads;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Decode a JSON body, mapping every failure to a 400 with a JSON error.
///
/// Used instead of the `Json` extractor so malformed bodies get the same
/// `{ "error" }` shape as every other failure.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    if body.is_empty() {
        return Err(Error::bad_request("Request body is required"));
    }
    serde_json::from_slice(body).map_err(|e| Error::bad_request(format!("Invalid JSON body: {e}")))
}
