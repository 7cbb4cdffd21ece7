//! `/api/upload` and the static upload route.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{Part, TestHarness, png};

#[tokio::test]
async fn test_upload_list_serve_delete() {
    let harness = TestHarness::new();

    let uploaded = harness.multipart("/api/upload", vec![png("Garden Photo.png")]).await;
    assert_eq!(uploaded.status, StatusCode::OK);
    let url = uploaded.json()["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/"), "{url}");

    let listed = harness.get("/api/upload").await.json();
    let files = listed["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["url"], url.as_str());

    let served = harness.get(&url).await;
    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(served.body, vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3]);

    let deleted = harness
        .json("DELETE", "/api/upload", json!({ "url": url }))
        .await;
    assert_eq!(deleted.json(), json!({ "success": true }));
    let again = harness
        .json("DELETE", "/api/upload", json!({ "url": url }))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_image_rejected() {
    let harness = TestHarness::new();
    let response = harness
        .multipart(
            "/api/upload",
            vec![Part::File {
                name: "file",
                file_name: "notes.txt",
                content_type: "text/plain",
                bytes: b"hello".to_vec(),
            }],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Please select an image file");
}

#[tokio::test]
async fn test_oversized_image_rejected() {
    let harness = TestHarness::new();
    let response = harness
        .multipart(
            "/api/upload",
            vec![Part::File {
                name: "file",
                file_name: "huge.png",
                content_type: "image/png",
                bytes: vec![0; 11 * 1024 * 1024],
            }],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "File size must be less than 10MB");
    assert_eq!(harness.get("/api/upload").await.json()["files"], json!([]));
}

#[tokio::test]
async fn test_missing_file_rejected() {
    let harness = TestHarness::new();
    let response = harness
        .multipart("/api/upload", vec![Part::Text("caption", "no file here")])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "No file provided");
}

#[tokio::test]
async fn test_delete_foreign_url_is_404() {
    let harness = TestHarness::new();
    let response = harness
        .json(
            "DELETE",
            "/api/upload",
            json!({ "url": "https://elsewhere.example/images/a.png" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
