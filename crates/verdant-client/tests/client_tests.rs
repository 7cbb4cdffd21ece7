//! Client tests against a mock Verdant server.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use serde_json::json;
use verdant_client::{Error, SiteClient};
use verdant_core::{Section, SectionId};
use verdant_editor::{EditorStatus, FieldEdit, FieldPath, ImageField, SectionEditor, UploadFile};
use verdant_schema::SchemaRegistry;
use verdant_storage::SectionStore;
use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn id(s: &str) -> SectionId {
    SectionId::new(s).unwrap()
}

#[tokio::test]
async fn test_get_section_null_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sections/hero"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&server)
        .await;

    let client = SiteClient::new(server.uri());
    assert!(client.get_section(&id("hero")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_section_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sections/hero"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "heading": "Hi" })))
        .mount(&server)
        .await;

    let client = SiteClient::new(format!("{}/", server.uri()));
    let section = client.get_section(&id("hero")).await.unwrap().unwrap();
    assert_eq!(section.get_str("heading"), Some("Hi"));
}

#[tokio::test]
async fn test_put_section_sends_whole_document() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/sections/cta"))
        .and(body_json(json!({ "heading": "Call us", "buttonLabel": "Go" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SiteClient::new(server.uri());
    let section = Section::new().with("heading", "Call us").with("buttonLabel", "Go");
    client.put_section(&id("cta"), &section).await.unwrap();
}

#[tokio::test]
async fn test_error_body_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/sections/cta"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Section body must be a JSON object" })),
        )
        .mount(&server)
        .await;

    let client = SiteClient::new(server.uri());
    let err = client
        .put_section(&id("cta"), &Section::new())
        .await
        .unwrap_err();
    let Error::Api { status, message } = err else {
        unreachable!("Expected Api error variant");
    };
    assert_eq!(status, 400);
    assert_eq!(message, "Section body must be a JSON object");
}

#[tokio::test]
async fn test_list_ids_only_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sections": [
                { "id": "hero", "title": "Hero", "configured": true },
                { "id": "faq", "title": "FAQ", "configured": false }
            ]
        })))
        .mount(&server)
        .await;

    let client = SiteClient::new(server.uri());
    assert_eq!(client.list_ids().await.unwrap(), vec![id("hero")]);
    assert_eq!(client.backend_name(), "http");
}

#[tokio::test]
async fn test_upload_image_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": "/uploads/1-logo.png" })))
        .mount(&server)
        .await;

    let client = SiteClient::new(server.uri());
    let url = client
        .upload_image(UploadFile::new("logo.png", "image/png", vec![137, 80, 78, 71]))
        .await
        .unwrap();
    assert_eq!(url, "/uploads/1-logo.png");
}

#[tokio::test]
async fn test_oversized_image_never_hits_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": "/uploads/x.jpg" })))
        .expect(0)
        .mount(&server)
        .await;

    let client = SiteClient::new(server.uri());
    let mut field = ImageField::new(FieldPath::key("logo"), "/uploads/old.png");
    let file = UploadFile::new("big.jpg", "image/jpeg", vec![0; 12 * 1024 * 1024]);
    let err = field.upload(&client, file).await.unwrap_err();
    assert!(err.to_string().contains("must be less than 10MB"));
    assert_eq!(field.url(), "/uploads/old.png");
}

#[tokio::test]
async fn test_server_rejection_surfaces_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "Please select an image file" })))
        .mount(&server)
        .await;

    let client = SiteClient::new(server.uri());
    let mut field = ImageField::new(FieldPath::key("logo"), "");
    let err = field
        .upload(&client, UploadFile::new("a.png", "image/png", vec![1]))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Please select an image file"));
}

#[tokio::test]
async fn test_delete_upload_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/upload"))
        .and(body_json(json!({ "url": "/uploads/missing.png" })))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Not found: upload" })))
        .mount(&server)
        .await;

    let client = SiteClient::new(server.uri());
    let err = client.delete_upload("/uploads/missing.png").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_resource_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/careers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "jobs": [], "pageData": null })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/careers"))
        .and(body_json(json!({ "title": "Gardener" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "slug": "gardener", "title": "Gardener", "order": 0 })),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/careers/gardener"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SiteClient::new(server.uri());
    let slices = client.get_resource("careers").await.unwrap();
    assert_eq!(slices.get("jobs"), Some(&json!([])));
    assert_eq!(slices.get("pageData"), Some(&json!(null)));

    let created = client
        .create_entity("careers", &json!({ "title": "Gardener" }))
        .await
        .unwrap();
    assert_eq!(created["slug"], "gardener");

    client.delete_entity("careers", "gardener").await.unwrap();
}

#[tokio::test]
async fn test_section_editor_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sections/cta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "heading": "Ready?", "body": "", "buttonLabel": "Talk", "buttonHref": "/contact", "backgroundImage": ""
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/sections/cta"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "disk full" })))
        .mount(&server)
        .await;

    let schema = SchemaRegistry::standard().lookup("cta").cloned().unwrap();
    let mut editor = SectionEditor::open(Arc::new(SiteClient::new(server.uri())), schema)
        .await
        .unwrap();
    assert_eq!(editor.status(), EditorStatus::Ready);

    editor
        .edit(FieldEdit::set_text(FieldPath::key("heading"), "Let's talk"))
        .unwrap();
    assert!(editor.save().await.is_err());
    assert_eq!(
        editor.status().to_string(),
        "error: Failed to save changes"
    );
    assert!(editor.is_dirty());
}
