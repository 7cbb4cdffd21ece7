//! `/api/{resource}`: multi-slice admin resources.
//!
//! A resource's slices are read together but written independently. A bulk
//! `PUT` writes the slices it names one after another; nothing is rolled
//! back if a later slice fails.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Map, Value, json};
use verdant_core::{Section, SectionId, normalize_slug};
use verdant_schema::{ITEMS_KEY, ResourceSpec, SliceSpec};
use verdant_storage::ContentStore;

use super::parse_json;
use crate::state::AppState;
use crate::{Error, Result};

fn resource<'a>(state: &'a AppState, name: &str) -> Result<&'a ResourceSpec> {
    state
        .resources
        .lookup(name)
        .ok_or_else(|| verdant_core::Error::not_found(format!("resource '{name}'")).into())
}

fn slice_id(slice: &SliceSpec) -> Result<SectionId> {
    Ok(SectionId::new(slice.section_id.as_str())?)
}

/// Current value of one slice: `[]`/items for lists, `null`/object for documents.
async fn read_slice(store: &ContentStore, slice: &SliceSpec) -> Result<Value> {
    let section = store.fetch(&slice_id(slice)?).await?;
    Ok(if slice.is_list() {
        let items = section
            .as_ref()
            .and_then(|s| s.get_array(ITEMS_KEY))
            .cloned()
            .unwrap_or_default();
        Value::Array(items)
    } else {
        section.map(Section::into_value).unwrap_or(Value::Null)
    })
}

/// Storage form of a slice value, or a 400 if the shape is wrong.
fn slice_section(slice: &SliceSpec, value: Value) -> Result<Section> {
    if slice.is_list() {
        match value {
            Value::Array(items) => Ok(Section::new().with(ITEMS_KEY, Value::Array(items))),
            _ => Err(Error::bad_request(format!("'{}' must be an array", slice.name))),
        }
    } else {
        Section::from_value(value)
            .map_err(|_| Error::bad_request(format!("'{}' must be an object", slice.name)))
    }
}

fn entity_slice(spec: &ResourceSpec) -> Result<(&SliceSpec, &str)> {
    spec.entity_slice()
        .and_then(|slice| Some((slice, slice.entity_key()?)))
        .ok_or_else(|| Error::bad_request(format!("'{}' has no individual entries", spec.name)))
}

async fn read_items(store: &ContentStore, slice: &SliceSpec) -> Result<Vec<Value>> {
    match read_slice(store, slice).await? {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

async fn write_items(store: &ContentStore, slice: &SliceSpec, items: Vec<Value>) -> Result<()> {
    let section = Section::new().with(ITEMS_KEY, Value::Array(items));
    store.set(&slice_id(slice)?, section).await?;
    Ok(())
}

fn position(items: &[Value], key: &str, slug: &str) -> Option<usize> {
    items
        .iter()
        .position(|item| item.get(key).and_then(Value::as_str) == Some(slug))
}

fn object_body(body: &Bytes) -> Result<Map<String, Value>> {
    match parse_json::<Value>(body)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::bad_request("Request body must be a JSON object")),
    }
}

/// `GET /api/{resource}`: every slice by name.
pub async fn get(State(state): State<AppState>, Path(name): Path<String>) -> Result<Json<Value>> {
    let spec = resource(&state, &name)?;
    let mut body = Map::new();
    for slice in &spec.slices {
        body.insert(slice.name.clone(), read_slice(&state.content, slice).await?);
    }
    Ok(Json(Value::Object(body)))
}

/// `PUT /api/{resource}`: replace the named slices, in declaration order.
pub async fn put(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<Value>> {
    let spec = resource(&state, &name)?;
    let mut body = object_body(&body)?;

    let unknown: Vec<&str> = body
        .keys()
        .filter(|key| spec.slice(key).is_none())
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(Error::bad_request(format!(
            "Unknown {} slice(s): {}",
            spec.name,
            unknown.join(", ")
        )));
    }
    if body.is_empty() {
        return Err(Error::bad_request("Nothing to save"));
    }

    let mut writes = Vec::new();
    for slice in &spec.slices {
        if let Some(value) = body.remove(&slice.name) {
            writes.push((slice, slice_section(slice, value)?));
        }
    }

    let mut saved = Vec::with_capacity(writes.len());
    for (slice, section) in writes {
        if let Err(e) = state.content.set(&slice_id(slice)?, section).await {
            tracing::error!(resource = %spec.name, slice = %slice.name, "Slice save failed: {e}");
            return Err(Error::PartialSave {
                failed: slice.name.clone(),
                saved,
            });
        }
        saved.push(slice.name.clone());
    }
    Ok(Json(json!({ "success": true, "saved": saved })))
}

/// `POST /api/{resource}`: seed (`{ "action": "seed" }`) or create one entry.
pub async fn post(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>)> {
    let spec = resource(&state, &name)?;
    let mut entity = object_body(&body)?;

    if entity.get("action").and_then(Value::as_str) == Some("seed") {
        let seeded = verdant_seed::seed_resource(&state.content, spec).await?;
        let ids: Vec<&str> = seeded.iter().map(SectionId::as_str).collect();
        return Ok((StatusCode::OK, Json(json!({ "success": true, "seeded": ids }))));
    }

    let (slice, key) = entity_slice(spec)?;
    let source = [key, "title", "name"]
        .iter()
        .find_map(|field| {
            entity
                .get(*field)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
        })
        .unwrap_or_default();
    let slug = normalize_slug(source);
    if slug.is_empty() {
        return Err(verdant_core::Error::validation_field(
            key,
            format!("A {key}, title, or name is required"),
        )
        .into());
    }

    let mut items = read_items(&state.content, slice).await?;
    if position(&items, key, &slug).is_some() {
        return Err(verdant_core::Error::conflict(format!("'{slug}' already exists")).into());
    }
    entity.insert(key.to_string(), Value::String(slug.clone()));
    if !entity.get("order").is_some_and(Value::is_number) {
        entity.insert("order".to_string(), json!(items.len()));
    }
    let created = Value::Object(entity);
    items.push(created.clone());
    write_items(&state.content, slice, items).await?;
    tracing::info!(resource = %spec.name, %slug, "Created entry");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/{resource}/{slug}`: replace one entry.
///
/// The path slug wins over any slug in the body. An entry sent without an
/// `order` keeps its current one.
pub async fn put_entity(
    State(state): State<AppState>,
    Path((name, slug)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Value>> {
    let spec = resource(&state, &name)?;
    let (slice, key) = entity_slice(spec)?;
    let mut entity = object_body(&body)?;

    let mut items = read_items(&state.content, slice).await?;
    let index = position(&items, key, &slug)
        .ok_or_else(|| verdant_core::Error::not_found(format!("{} '{slug}'", spec.name)))?;

    entity.insert(key.to_string(), Value::String(slug.clone()));
    if !entity.contains_key("order") {
        if let Some(order) = items[index].get("order") {
            entity.insert("order".to_string(), order.clone());
        }
    }
    let updated = Value::Object(entity);
    items[index] = updated.clone();
    write_items(&state.content, slice, items).await?;
    tracing::info!(resource = %spec.name, %slug, "Updated entry");
    Ok(Json(updated))
}

/// `DELETE /api/{resource}/{slug}`
pub async fn delete_entity(
    State(state): State<AppState>,
    Path((name, slug)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let spec = resource(&state, &name)?;
    let (slice, key) = entity_slice(spec)?;

    let mut items = read_items(&state.content, slice).await?;
    let index = position(&items, key, &slug)
        .ok_or_else(|| verdant_core::Error::not_found(format!("{} '{slug}'", spec.name)))?;
    items.remove(index);
    write_items(&state.content, slice, items).await?;
    tracing::info!(resource = %spec.name, %slug, "Deleted entry");
    Ok(Json(json!({ "success": true })))
}
