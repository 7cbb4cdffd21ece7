//! Server-rendered admin: dashboard, section editor, resources, media.

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{Part, TestHarness, png};

async fn hero_draft(harness: &TestHarness) -> String {
    harness.get("/api/sections/hero").await.json().to_string()
}

#[tokio::test]
async fn test_dashboard_lists_sections_and_resources() {
    let harness = TestHarness::new();
    let response = harness.get("/admin").await;
    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains(r#"href="/admin/sections/navbar""#));
    assert!(html.contains(r#"href="/admin/resources/eco-matrix""#));
    assert!(html.contains("not seeded"));
}

#[tokio::test]
async fn test_dashboard_seed_button() {
    let harness = TestHarness::new();
    let response = harness.form("/admin/seed", &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("Seeded"));
    assert!(harness.get("/api/sections/hero").await.json().is_object());
}

#[tokio::test]
async fn test_editor_for_unseeded_section_offers_seed() {
    let harness = TestHarness::new();
    let response = harness.get("/admin/sections/hero").await;
    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("No data found, seed the database first"));
    assert!(html.contains(r#"action="/admin/seed""#));
    assert!(!html.contains("name=\"_draft\""));
}

#[tokio::test]
async fn test_editor_unknown_section_is_404() {
    let harness = TestHarness::new();
    assert_eq!(
        harness.get("/admin/sections/gazebo").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_editor_save() {
    let harness = TestHarness::seeded().await;
    let form = harness.get("/admin/sections/hero").await.text();
    assert!(form.contains("name=\"_draft\""));
    assert!(form.contains("name=\"heading\""));

    let draft = hero_draft(&harness).await;
    let response = harness
        .multipart(
            "/admin/sections/hero",
            vec![
                Part::Text("_draft", &draft),
                Part::Text("heading", "Gardens for Everyone"),
                Part::Text("_action", "save"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("Changes saved"));

    let hero = harness.get("/api/sections/hero").await.json();
    assert_eq!(hero["heading"], "Gardens for Everyone");
    assert!(harness.get("/").await.text().contains("Gardens for Everyone"));
}

#[tokio::test]
async fn test_editor_non_save_action_does_not_write() {
    let harness = TestHarness::seeded().await;
    let draft = hero_draft(&harness).await;
    let writes = harness.memory.write_count();

    let response = harness
        .multipart(
            "/admin/sections/hero",
            vec![
                Part::Text("_draft", &draft),
                Part::Text("heading", "Draft only"),
                Part::Text("_action", "clear:backgroundImage"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("Unsaved changes"));
    assert_eq!(harness.memory.write_count(), writes);
}

#[tokio::test]
async fn test_editor_uploads_image_then_saves() {
    let harness = TestHarness::seeded().await;
    let draft = hero_draft(&harness).await;
    let response = harness
        .multipart(
            "/admin/sections/hero",
            vec![
                Part::Text("_draft", &draft),
                Part::File {
                    name: "upload:backgroundImage",
                    file_name: "lawn.png",
                    content_type: "image/png",
                    bytes: vec![1, 2, 3],
                },
                Part::Text("_action", "save"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let hero = harness.get("/api/sections/hero").await.json();
    let url = hero["backgroundImage"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"), "{url}");
    assert_eq!(harness.get(url).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_editor_rejected_upload_blocks_save() {
    let harness = TestHarness::seeded().await;
    let draft = hero_draft(&harness).await;
    let writes = harness.memory.write_count();

    let response = harness
        .multipart(
            "/admin/sections/hero",
            vec![
                Part::Text("_draft", &draft),
                Part::Text("heading", "Not yet"),
                Part::File {
                    name: "upload:backgroundImage",
                    file_name: "notes.txt",
                    content_type: "text/plain",
                    bytes: b"text".to_vec(),
                },
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let html = response.text();
    assert!(html.contains("backgroundImage: Please select an image file"));
    assert!(html.contains("Not yet"));
    assert_eq!(harness.memory.write_count(), writes);
}

#[tokio::test]
async fn test_editor_save_failure_keeps_draft() {
    let harness = TestHarness::seeded().await;
    let draft = hero_draft(&harness).await;
    harness.memory.set_fail_writes(true);

    let response = harness
        .multipart(
            "/admin/sections/hero",
            vec![
                Part::Text("_draft", &draft),
                Part::Text("heading", "Try again"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let html = response.text();
    assert!(html.contains("Failed to save changes"));
    assert!(html.contains("Try again"));
}

#[tokio::test]
async fn test_resource_editor_saves_one_slice() {
    let harness = TestHarness::seeded().await;
    let before = harness.get("/api/projects").await.json();
    let page = harness.get("/admin/resources/projects").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.text().contains(r#"action="/admin/resources/projects/pageData""#));

    let response = harness
        .multipart(
            "/admin/resources/projects/pageData",
            vec![
                Part::Text("heroTitle", "Our Portfolio"),
                Part::Text("_action", "save"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = harness.get("/api/projects").await.json();
    assert_eq!(body["pageData"]["heroTitle"], "Our Portfolio");
    assert_eq!(body["projects"], before["projects"]);
    assert_eq!(body["categories"], before["categories"]);
}

#[tokio::test]
async fn test_resource_editor_unknown_slice() {
    let harness = TestHarness::new();
    let response = harness
        .multipart("/admin/resources/projects/gallery", vec![Part::Text("_action", "save")])
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        harness.get("/admin/resources/gardens").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_media_library_upload_and_delete() {
    let harness = TestHarness::new();
    let empty = harness.get("/admin/uploads").await;
    assert!(empty.text().contains("No images uploaded yet."));

    let uploaded = harness.multipart("/admin/uploads", vec![png("fern.png")]).await;
    assert_eq!(uploaded.status, StatusCode::OK);
    assert!(uploaded.text().contains("Uploaded /uploads/"));

    let files = harness.get("/api/upload").await.json();
    let url = files["files"][0]["url"].as_str().unwrap().to_string();

    let deleted = harness.form("/admin/uploads/delete", &[("url", url.as_str())]).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(harness.get("/api/upload").await.json()["files"], Value::Array(vec![]));
}

#[tokio::test]
async fn test_media_library_rejects_non_image() {
    let harness = TestHarness::new();
    let response = harness
        .multipart(
            "/admin/uploads",
            vec![Part::File {
                name: "file",
                file_name: "notes.txt",
                content_type: "text/plain",
                bytes: b"text".to_vec(),
            }],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.text().contains("Please select an image file"));
}
