//! `/api/upload`: the image library.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use serde::Deserialize;
use serde_json::{Value, json};

use super::parse_json;
use crate::state::AppState;
use crate::{Error, Result};

/// Form field carrying the file.
pub const FILE_FIELD: &str = "file";

/// A file pulled out of a multipart body.
#[derive(Debug)]
pub(crate) struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Read the first non-empty `file` part.
pub(crate) async fn read_file(mut multipart: Multipart) -> Result<Option<FilePart>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::bad_request(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| Error::bad_request(format!("Failed to read upload: {e}")))?;
        if !bytes.is_empty() {
            return Ok(Some(FilePart {
                file_name,
                content_type,
                bytes,
            }));
        }
    }
    Ok(None)
}

/// `POST /api/upload`: store one image, respond with its URL.
pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> Result<Json<Value>> {
    let file = read_file(multipart)
        .await?
        .ok_or_else(|| Error::bad_request("No file provided"))?;
    let stored = state
        .blobs
        .put(&file.file_name, &file.content_type, &file.bytes)
        .await?;
    Ok(Json(json!({ "url": stored.url })))
}

/// `GET /api/upload`: every stored image, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>> {
    let files = state.blobs.list().await?;
    Ok(Json(json!({ "files": files })))
}

#[derive(Debug, Deserialize)]
struct DeleteRequest {
    url: String,
}

/// `DELETE /api/upload` with `{ "url": ... }`.
pub async fn delete(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>> {
    let request: DeleteRequest = parse_json(&body)?;
    state.blobs.delete(&request.url).await?;
    Ok(Json(json!({ "success": true })))
}
