//! `/api/sections`: read and replace whole section documents.

use std::collections::HashSet;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde::Serialize;
use serde_json::{Value, json};
use verdant_core::{Section, SectionId};

use super::parse_json;
use crate::state::AppState;
use crate::{Error, Result};

/// One entry of the section listing.
#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    /// Section id.
    pub id: String,
    /// Editor title.
    pub title: String,
    /// Whether a document is stored.
    pub configured: bool,
}

/// Every editable section and whether it has content.
pub(crate) async fn summaries(state: &AppState) -> Result<Vec<SectionSummary>> {
    let stored: HashSet<SectionId> = state.content.list_ids().await?.into_iter().collect();
    Ok(state
        .schemas
        .iter()
        .map(|schema| SectionSummary {
            id: schema.id.clone(),
            title: schema.title.clone(),
            configured: SectionId::new(schema.id.as_str()).is_ok_and(|id| stored.contains(&id)),
        })
        .collect())
}

/// `GET /api/sections`
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>> {
    let sections = summaries(&state).await?;
    Ok(Json(json!({ "sections": sections })))
}

/// `GET /api/sections/{id}`: the document, or `null` when never written.
///
/// An id that could never be stored is simply unwritten.
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let Ok(id) = SectionId::new(id) else {
        return Ok(Json(Value::Null));
    };
    let section = state.content.fetch(&id).await?;
    Ok(Json(section.map(Section::into_value).unwrap_or(Value::Null)))
}

/// `PUT /api/sections/{id}`: replace the whole document.
pub async fn put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>> {
    let id = SectionId::new(id)?;
    let value: Value = parse_json(&body)?;
    let section = Section::from_value(value)
        .map_err(|_| Error::bad_request("Section body must be a JSON object"))?;
    state.content.set(&id, section).await?;
    Ok(Json(json!({ "success": true })))
}
