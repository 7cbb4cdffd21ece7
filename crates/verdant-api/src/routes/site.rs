//! Public pages.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use verdant_pages::pages;
use verdant_pages::{ContactForm, RenderedPage};

use crate::state::AppState;

fn respond(page: RenderedPage) -> Response {
    let status = if page.found {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (status, Html(page.html)).into_response()
}

/// `?category=` on `/projects`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
    /// Category slug to filter by.
    pub category: Option<String>,
}

/// `?dimension=` on `/eco-matrix`.
#[derive(Debug, Default, Deserialize)]
pub struct EcoMatrixQuery {
    /// Dimension slug to show.
    pub dimension: Option<String>,
}

/// `GET /`
pub async fn home(State(state): State<AppState>) -> Response {
    respond(pages::home(&state.content).await)
}

/// `GET /about`
pub async fn about(State(state): State<AppState>) -> Response {
    respond(pages::about(&state.content).await)
}

/// `GET /sectors`
pub async fn sectors(State(state): State<AppState>) -> Response {
    respond(pages::sectors(&state.content).await)
}

/// `GET /sectors/{slug}`
pub async fn sector(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    respond(pages::sector_detail(&state.content, &slug).await)
}

/// `GET /projects`
pub async fn projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectsQuery>,
) -> Response {
    respond(pages::projects(&state.content, query.category.as_deref()).await)
}

/// `GET /projects/{slug}`
pub async fn project(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    respond(pages::project_detail(&state.content, &slug).await)
}

/// `GET /careers`
pub async fn careers(State(state): State<AppState>) -> Response {
    respond(pages::careers(&state.content).await)
}

/// `GET /contact`
pub async fn contact(State(state): State<AppState>) -> Response {
    respond(pages::contact(&state.content, &ContactForm::default()).await)
}

/// `GET /eco-matrix`
pub async fn eco_matrix(
    State(state): State<AppState>,
    Query(query): Query<EcoMatrixQuery>,
) -> Response {
    respond(pages::eco_matrix(&state.content, query.dimension.as_deref()).await)
}

/// Fallback for every unmatched path.
pub async fn not_found(State(state): State<AppState>) -> Response {
    respond(pages::not_found(&state.content).await)
}
