//! `/api/sections`, `/api/seed`, `/healthz`.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::common::TestHarness;

#[tokio::test]
async fn test_healthz() {
    let harness = TestHarness::new();
    let response = harness.get("/healthz").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "healthy");
}

#[tokio::test]
async fn test_unseeded_section_is_null() {
    let harness = TestHarness::new();
    let response = harness.get("/api/sections/hero").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), Value::Null);
}

#[tokio::test]
async fn test_put_then_get_round_trips() {
    let harness = TestHarness::new();
    let body = json!({ "heading": "Hello", "items": [{ "title": "A", "order": 0 }] });

    let put = harness.json("PUT", "/api/sections/hero", body.clone()).await;
    assert_eq!(put.status, StatusCode::OK);
    assert_eq!(put.json(), json!({ "success": true }));

    let get = harness.get("/api/sections/hero").await;
    assert_eq!(get.json(), body);
}

#[tokio::test]
async fn test_put_rejects_non_object() {
    let harness = TestHarness::new();
    let response = harness.json("PUT", "/api/sections/hero", json!([1, 2])).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Section body must be a JSON object");
}

#[tokio::test]
async fn test_invalid_section_id_reads_null_but_rejects_writes() {
    let harness = TestHarness::new();
    let response = harness.get("/api/sections/Not%20Valid").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.json().is_null());

    let response = harness
        .json("PUT", "/api/sections/Not%20Valid", json!({ "heading": "x" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn test_storage_failure_is_opaque_500() {
    let harness = TestHarness::new();
    harness.memory.set_fail_reads(true);
    let response = harness.get("/api/sections/hero").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["error"], "Internal server error");
}

#[tokio::test]
async fn test_list_reports_configured_sections() {
    let harness = TestHarness::new();
    harness
        .json("PUT", "/api/sections/hero", json!({ "heading": "Hi" }))
        .await;

    let response = harness.get("/api/sections").await;
    let sections = response.json()["sections"].as_array().unwrap().clone();
    let hero = sections.iter().find(|s| s["id"] == "hero").unwrap();
    let navbar = sections.iter().find(|s| s["id"] == "navbar").unwrap();
    assert_eq!(hero["configured"], true);
    assert_eq!(navbar["configured"], false);
}

#[tokio::test]
async fn test_seed_writes_every_section() {
    let harness = TestHarness::new();
    let response = harness.json("POST", "/api/seed", json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["success"], true);
    let seeded = body["seeded"].as_array().unwrap();
    assert!(seeded.iter().any(|id| id == "hero"));

    let hero = harness.get("/api/sections/hero").await.json();
    assert_eq!(hero["heading"], verdant_pages::HERO_HEADING);
}
