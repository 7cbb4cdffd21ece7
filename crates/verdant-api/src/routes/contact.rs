//! Contact form submissions, JSON and HTML.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::{Value, json};
use verdant_pages::{ContactForm, ContactSubmission, FieldErrors, record_inquiry};

use super::parse_json;
use crate::state::AppState;
use crate::{Error, Result};

const FIELDS_MESSAGE: &str = "Please correct the highlighted fields";

async fn submit(state: &AppState, submission: &ContactSubmission) -> Result<()> {
    submission.validate().map_err(|fields| Error::Fields {
        message: FIELDS_MESSAGE.to_string(),
        fields,
    })?;
    let received_at = chrono::Utc::now().to_rfc3339();
    record_inquiry(&state.content, submission, &received_at).await?;
    Ok(())
}

/// `POST /api/contact`
pub async fn api_submit(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>> {
    let submission: ContactSubmission = parse_json(&body)?;
    submit(&state, &submission).await?;
    Ok(Json(json!({ "success": true })))
}

/// `POST /contact`: re-render the page with errors or the thank-you note.
pub async fn form_submit(
    State(state): State<AppState>,
    Form(submission): Form<ContactSubmission>,
) -> Response {
    let (status, form) = match submit(&state, &submission).await {
        Ok(()) => (StatusCode::OK, ContactForm::sent()),
        Err(Error::Fields { fields, .. }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ContactForm::rejected(submission, fields),
        ),
        Err(e) => {
            tracing::error!("Failed to record contact inquiry: {e}");
            let mut fields = FieldErrors::new();
            fields.insert(
                "form".to_string(),
                "Your message could not be sent. Please try again.".to_string(),
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ContactForm::rejected(submission, fields),
            )
        }
    };
    let page = verdant_pages::pages::contact(&state.content, &form).await;
    (status, Html(page.html)).into_response()
}
