//! `POST /api/seed`

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::Result;
use crate::state::AppState;

/// Overwrite every known section with its default content.
pub async fn seed(State(state): State<AppState>) -> Result<Json<Value>> {
    let seeded = verdant_seed::seed_all(&state.content).await?;
    let ids: Vec<&str> = seeded.iter().map(|id| id.as_str()).collect();
    Ok(Json(json!({ "success": true, "seeded": ids })))
}
