//! Server-rendered admin dashboard.
//!
//! The editor state lives in the request, not in the server: every form
//! carries its draft in a hidden field and names the requested action in
//! `_action`, so a page can be rebuilt from one submission alone.

use std::fmt::Write;

use axum::extract::{Form, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use serde_json::Value;
use verdant_core::html::escape;
use verdant_editor::form::UPLOAD_PREFIX;
use verdant_editor::{
    Draft, EditorStatus, FieldPath, FormAction, ImageField, ResourceManager, SectionEditor,
    UploadFile, render_form,
};
use verdant_schema::SectionSchema;

use super::sections::summaries;
use super::uploads::read_file;
use crate::state::AppState;
use crate::{Error, Result};

// ============================================================================
// Page shell
// ============================================================================

/// Banner shown above the page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Something worked.
    Info(String),
    /// Something went wrong.
    Error(String),
}

fn admin_page(title: &str, notice: Option<&Notice>, body: &str) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="robots" content="noindex">"#,
    );
    let _ = write!(
        html,
        r#"<title>{} | Verdant Admin</title></head><body class="admin"><header><a href="/admin">Dashboard</a><a href="/admin/uploads">Media</a><a href="/">View site</a></header><main><h1>{}</h1>"#,
        escape(title),
        escape(title)
    );
    match notice {
        Some(Notice::Info(message)) => {
            let _ = write!(html, r#"<p class="notice info">{}</p>"#, escape(message));
        }
        Some(Notice::Error(message)) => {
            let _ = write!(html, r#"<p class="notice error">{}</p>"#, escape(message));
        }
        None => {}
    }
    html.push_str(body);
    html.push_str("</main></body></html>");
    html
}

fn page(status: StatusCode, title: &str, notice: Option<&Notice>, body: &str) -> Response {
    (status, Html(admin_page(title, notice, body))).into_response()
}

fn error_page(err: Error) -> Response {
    let status = err.status();
    if status.is_server_error() {
        tracing::error!(%status, "Admin request failed: {err}");
    }
    let notice = Notice::Error(err.public_message());
    page(status, "Something went wrong", Some(&notice), r#"<p><a href="/admin">Back to dashboard</a></p>"#)
}

fn not_found(what: &str) -> Response {
    let notice = Notice::Error(format!("No editor for '{what}'"));
    page(StatusCode::NOT_FOUND, "Not Found", Some(&notice), r#"<p><a href="/admin">Back to dashboard</a></p>"#)
}

const SEED_FORM: &str = r#"<form method="post" action="/admin/seed"><button type="submit">Seed default content</button></form>"#;

// ============================================================================
// Dashboard
// ============================================================================

async fn dashboard_page(state: &AppState, notice: Option<Notice>) -> Response {
    let (sections, notice) = match summaries(state).await {
        Ok(sections) => (sections, notice),
        Err(e) => {
            tracing::warn!("Failed to list sections: {e}");
            (Vec::new(), Some(Notice::Error("Failed to load content".to_string())))
        }
    };

    let mut body = String::from(r#"<section><h2>Sections</h2><table><tbody>"#);
    for section in &sections {
        let _ = write!(
            body,
            r#"<tr><td><a href="/admin/sections/{id}">{title}</a></td><td>{id}</td><td>{state}</td></tr>"#,
            id = escape(&section.id),
            title = escape(&section.title),
            state = if section.configured { "configured" } else { "not seeded" }
        );
    }
    body.push_str(r#"</tbody></table></section><section><h2>Resources</h2><ul>"#);
    for resource in state.resources.iter() {
        let _ = write!(
            body,
            r#"<li><a href="/admin/resources/{}">{}</a></li>"#,
            escape(&resource.name),
            escape(&resource.title)
        );
    }
    body.push_str("</ul></section>");
    body.push_str(SEED_FORM);
    page(StatusCode::OK, "Dashboard", notice.as_ref(), &body)
}

/// `GET /admin`
pub async fn dashboard(State(state): State<AppState>) -> Response {
    dashboard_page(&state, None).await
}

/// `POST /admin/seed`
pub async fn seed(State(state): State<AppState>) -> Response {
    let notice = match verdant_seed::seed_all(&state.content).await {
        Ok(seeded) => Notice::Info(format!("Seeded {} sections", seeded.len())),
        Err(e) => {
            tracing::error!("Seeding failed: {e}");
            Notice::Error("Failed to seed content".to_string())
        }
    };
    dashboard_page(&state, Some(notice)).await
}

// ============================================================================
// Editor forms
// ============================================================================

/// A decoded editor form post.
#[derive(Debug, Default)]
struct Submission {
    pairs: Vec<(String, String)>,
    files: Vec<(FieldPath, UploadFile)>,
}

async fn read_submission(mut multipart: Multipart) -> Result<Submission> {
    let mut submission = Submission::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::bad_request(format!("Invalid form body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if let Some(path) = name.strip_prefix(UPLOAD_PREFIX) {
            let path = FieldPath::parse(path)?;
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::bad_request(format!("Failed to read upload: {e}")))?;
            if !bytes.is_empty() {
                submission
                    .files
                    .push((path, UploadFile::new(file_name, content_type, bytes.to_vec())));
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| Error::bad_request(format!("Failed to read field '{name}': {e}")))?;
            submission.pairs.push((name, value));
        }
    }
    Ok(submission)
}

/// Rebuild the editor a submission describes and run its uploads.
///
/// Returns the editor, the requested action, and one message per failed
/// upload. Nothing is saved here.
async fn apply_submission(
    state: &AppState,
    schema: SectionSchema,
    submission: Submission,
) -> Result<(SectionEditor, FormAction, Vec<String>)> {
    let (draft, action) = Draft::from_form(&schema, &submission.pairs)?;
    let mut editor = SectionEditor::with_draft(state.content.backend(), schema, draft)?;

    let uploader = state.uploader();
    let mut problems = Vec::new();
    for (path, file) in submission.files {
        let current = editor
            .draft()
            .and_then(|d| d.value_at(&path))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let mut field = ImageField::new(path.clone(), current);
        match field.upload(&uploader, file).await.map(|_| ()) {
            Ok(()) => editor.edit(field.edit())?,
            Err(verdant_editor::Error::Upload { message }) => {
                problems.push(format!("{path}: {message}"));
            }
            Err(e) => {
                tracing::warn!(field = %path, "Upload failed: {e}");
                problems.push(format!("{path}: Failed to upload image"));
            }
        }
    }
    Ok((editor, action, problems))
}

fn status_line(editor: &SectionEditor) -> (&'static str, String) {
    match editor.status() {
        EditorStatus::Loading => ("loading", "Loading...".to_string()),
        EditorStatus::Saving => ("saving", "Saving...".to_string()),
        EditorStatus::Success => ("success", "Changes saved".to_string()),
        EditorStatus::Ready if editor.is_dirty() => ("dirty", "Unsaved changes".to_string()),
        EditorStatus::Ready => ("ready", String::new()),
        EditorStatus::Error(e) => ("error", e.to_string()),
    }
}

/// One editor form posting to `action`.
fn editor_form(editor: &SectionEditor, problems: &[String], action: &str) -> String {
    let (class, message) = status_line(editor);
    let mut html = String::new();
    for problem in problems {
        let _ = write!(html, r#"<p class="notice error">{}</p>"#, escape(problem));
    }

    let Some(draft) = editor.draft() else {
        let _ = write!(html, r#"<p class="status {class}">{}</p>{SEED_FORM}"#, escape(&message));
        return html;
    };

    let _ = write!(
        html,
        r#"<form method="post" action="{}" enctype="multipart/form-data"><button type="submit" name="_action" value="save" class="default-action" tabindex="-1" aria-hidden="true"></button>"#,
        escape(action)
    );
    html.push_str(&draft.hidden_input());
    html.push_str(&render_form(editor.schema(), draft));
    let _ = write!(
        html,
        r#"<div class="actions"><span class="status {class}">{}</span><button type="submit" name="_action" value="save">Save</button></div></form>"#,
        escape(&message)
    );
    html
}

// ============================================================================
// Section editor
// ============================================================================

fn section_action(id: &str) -> String {
    format!("/admin/sections/{id}")
}

/// `GET /admin/sections/{id}`
pub async fn edit_section(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(schema) = state.schemas.lookup(&id).cloned() else {
        return not_found(&id);
    };
    let title = schema.title.clone();
    match SectionEditor::open(state.content.backend(), schema).await {
        Ok(editor) => page(
            StatusCode::OK,
            &title,
            None,
            &editor_form(&editor, &[], &section_action(&id)),
        ),
        Err(e) => error_page(e.into()),
    }
}

/// `POST /admin/sections/{id}`
pub async fn submit_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let Some(schema) = state.schemas.lookup(&id).cloned() else {
        return not_found(&id);
    };
    let title = schema.title.clone();
    let result = async {
        let submission = read_submission(multipart).await?;
        let (mut editor, action, problems) = apply_submission(&state, schema, submission).await?;
        if action == FormAction::Save && problems.is_empty() {
            // The failure is reported through the editor status.
            let _ = editor.save().await;
        }
        Ok::<_, Error>((editor, problems))
    }
    .await;

    match result {
        Ok((editor, problems)) => {
            let status = if problems.is_empty() {
                save_status(&editor)
            } else {
                StatusCode::BAD_REQUEST
            };
            page(status, &title, None, &editor_form(&editor, &problems, &section_action(&id)))
        }
        Err(e) => error_page(e),
    }
}

fn save_status(editor: &SectionEditor) -> StatusCode {
    match editor.status() {
        EditorStatus::Error(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    }
}

// ============================================================================
// Resource editors
// ============================================================================

fn resource_page(manager: &ResourceManager, focus: Option<(&str, &[String])>) -> String {
    let spec = manager.spec();
    let mut body = String::new();
    for slice in &spec.slices {
        let Some(editor) = manager.slice(&slice.name) else {
            continue;
        };
        let problems: &[String] = match focus {
            Some((name, problems)) if name == slice.name => problems,
            _ => &[],
        };
        let _ = write!(
            body,
            r#"<section class="slice" id="{}"><h2>{}</h2>{}</section>"#,
            escape(&slice.name),
            escape(&editor.schema().title),
            editor_form(
                editor,
                problems,
                &format!("/admin/resources/{}/{}", spec.name, slice.name)
            )
        );
    }
    body
}

async fn load_manager(state: &AppState, name: &str) -> Option<Result<ResourceManager>> {
    let spec = state.resources.lookup(name)?.clone();
    Some(
        match ResourceManager::new(state.content.backend(), spec, &state.schemas) {
            Ok(mut manager) => {
                manager.load_all().await;
                Ok(manager)
            }
            Err(e) => Err(e.into()),
        },
    )
}

/// `GET /admin/resources/{name}`
pub async fn edit_resource(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match load_manager(&state, &name).await {
        None => not_found(&name),
        Some(Err(e)) => error_page(e),
        Some(Ok(manager)) => {
            let title = manager.spec().title.clone();
            page(StatusCode::OK, &title, None, &resource_page(&manager, None))
        }
    }
}

/// `POST /admin/resources/{name}/{slice}`: save one slice only.
pub async fn submit_slice(
    State(state): State<AppState>,
    Path((name, slice)): Path<(String, String)>,
    multipart: Multipart,
) -> Response {
    let mut manager = match load_manager(&state, &name).await {
        None => return not_found(&name),
        Some(Err(e)) => return error_page(e),
        Some(Ok(manager)) => manager,
    };
    let Some(schema) = manager.slice(&slice).map(|e| e.schema().clone()) else {
        return not_found(&format!("{name}/{slice}"));
    };

    let result = async {
        let submission = read_submission(multipart).await?;
        let (editor, action, problems) = apply_submission(&state, schema, submission).await?;
        if let Some(slot) = manager.slice_mut(&slice) {
            *slot = editor;
        }
        if action == FormAction::Save && problems.is_empty() {
            // The failure is reported through the slice's status.
            let _ = manager.save_slice(&slice).await;
        }
        Ok::<_, Error>(problems)
    }
    .await;

    match result {
        Ok(problems) => {
            let status = match manager.slice(&slice) {
                _ if !problems.is_empty() => StatusCode::BAD_REQUEST,
                Some(editor) => save_status(editor),
                None => StatusCode::OK,
            };
            let title = manager.spec().title.clone();
            page(
                status,
                &title,
                None,
                &resource_page(&manager, Some((&slice, &problems))),
            )
        }
        Err(e) => error_page(e),
    }
}

// ============================================================================
// Media library
// ============================================================================

async fn uploads_page(state: &AppState, status: StatusCode, notice: Option<Notice>) -> Response {
    let mut body = String::from(
        r#"<form method="post" action="/admin/uploads" enctype="multipart/form-data"><input type="file" name="file" accept="image/*"><button type="submit">Upload</button></form>"#,
    );
    match state.blobs.list().await {
        Ok(files) if files.is_empty() => body.push_str(r#"<p class="empty">No images uploaded yet.</p>"#),
        Ok(files) => {
            body.push_str(r#"<ul class="media">"#);
            for file in files {
                let url = escape(&file.url);
                let _ = write!(
                    body,
                    r#"<li><img src="{url}" alt="{name}"><code>{url}</code><span>{name} ({size} bytes, {at})</span><form method="post" action="/admin/uploads/delete"><input type="hidden" name="url" value="{url}"><button type="submit">Delete</button></form></li>"#,
                    name = escape(&file.filename),
                    size = file.size,
                    at = file.uploaded_at.format("%Y-%m-%d %H:%M"),
                );
            }
            body.push_str("</ul>");
        }
        Err(e) => {
            tracing::warn!("Failed to list uploads: {e}");
            body.push_str(r#"<p class="notice error">Failed to load uploads</p>"#);
        }
    }
    page(status, "Media Library", notice.as_ref(), &body)
}

/// `GET /admin/uploads`
pub async fn uploads(State(state): State<AppState>) -> Response {
    uploads_page(&state, StatusCode::OK, None).await
}

/// `POST /admin/uploads`: upload one image through the image control.
pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> Response {
    let file = match read_file(multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            let notice = Notice::Error("Please select an image file".to_string());
            return uploads_page(&state, StatusCode::BAD_REQUEST, Some(notice)).await;
        }
        Err(e) => return error_page(e),
    };

    let mut field = ImageField::new(FieldPath::key("file"), "");
    let file = UploadFile::new(file.file_name, file.content_type, file.bytes.to_vec());
    let (status, notice) = match field.upload(&state.uploader(), file).await {
        Ok(url) => (StatusCode::OK, Notice::Info(format!("Uploaded {url}"))),
        Err(verdant_editor::Error::Upload { message }) => {
            (StatusCode::BAD_REQUEST, Notice::Error(message))
        }
        Err(e) => {
            tracing::error!("Upload failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Notice::Error("Failed to upload image".to_string()),
            )
        }
    };
    uploads_page(&state, status, Some(notice)).await
}

/// Body of the delete form.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    /// Public URL of the upload.
    pub url: String,
}

/// `POST /admin/uploads/delete`
pub async fn delete_upload(State(state): State<AppState>, Form(form): Form<DeleteForm>) -> Response {
    let (status, notice) = match state.blobs.delete(&form.url).await {
        Ok(()) => (StatusCode::OK, Notice::Info(format!("Deleted {}", form.url))),
        Err(e) => {
            let err = Error::from(e);
            (err.status(), Notice::Error(err.public_message()))
        }
    };
    uploads_page(&state, status, Some(notice)).await
}
