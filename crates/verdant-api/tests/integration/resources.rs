//! `/api/{resource}` and `/api/{resource}/{slug}`.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestHarness;

#[tokio::test]
async fn test_get_empty_resource() {
    let harness = TestHarness::new();
    let response = harness.get("/api/projects").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({ "projects": [], "categories": [], "pageData": null })
    );
}

#[tokio::test]
async fn test_unknown_resource_is_404() {
    let harness = TestHarness::new();
    assert_eq!(harness.get("/api/gardens").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_put_writes_named_slices() {
    let harness = TestHarness::new();
    let response = harness
        .json(
            "PUT",
            "/api/projects",
            json!({
                "categories": [{ "slug": "parks", "name": "Parks" }],
                "pageData": { "heading": "Our Work" }
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["saved"], json!(["categories", "pageData"]));

    let body = harness.get("/api/projects").await.json();
    assert_eq!(body["categories"][0]["slug"], "parks");
    assert_eq!(body["pageData"]["heading"], "Our Work");
    assert_eq!(body["projects"], json!([]));
}

#[tokio::test]
async fn test_bulk_put_rejects_unknown_slices_and_bad_shapes() {
    let harness = TestHarness::new();
    let unknown = harness
        .json("PUT", "/api/projects", json!({ "gallery": [] }))
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);

    let shape = harness
        .json("PUT", "/api/projects", json!({ "projects": { "slug": "x" } }))
        .await;
    assert_eq!(shape.status, StatusCode::BAD_REQUEST);
    assert_eq!(shape.json()["error"], "'projects' must be an array");

    let empty = harness.json("PUT", "/api/projects", json!({})).await;
    assert_eq!(empty.json()["error"], "Nothing to save");
    assert_eq!(harness.memory.write_count(), 0);
}

#[tokio::test]
async fn test_bulk_put_failure_reports_partial_save() {
    let harness = TestHarness::new();
    harness.memory.set_fail_writes(true);
    let response = harness
        .json(
            "PUT",
            "/api/sectors",
            json!({ "sectors": [], "pageData": { "heading": "Sectors" } }),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json();
    assert_eq!(body["saved"], json!([]));
    assert!(body["error"].as_str().unwrap().contains("sectors"));
}

#[tokio::test]
async fn test_entity_crud() {
    let harness = TestHarness::new();

    let created = harness
        .json("POST", "/api/projects", json!({ "title": "City Park Renewal" }))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let entity = created.json();
    assert_eq!(entity["slug"], "city-park-renewal");
    assert_eq!(entity["order"], 0);

    let duplicate = harness
        .json("POST", "/api/projects", json!({ "slug": "City Park Renewal" }))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let updated = harness
        .json(
            "PUT",
            "/api/projects/city-park-renewal",
            json!({ "slug": "renamed", "title": "City Park" }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["slug"], "city-park-renewal");
    assert_eq!(updated.json()["order"], 0);

    let missing = harness
        .json("PUT", "/api/projects/nowhere", json!({ "title": "X" }))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let deleted = harness.delete("/api/projects/city-park-renewal").await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(
        harness.delete("/api/projects/city-park-renewal").await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(harness.get("/api/projects").await.json()["projects"], json!([]));
}

#[tokio::test]
async fn test_create_requires_a_slug_source() {
    let harness = TestHarness::new();
    let response = harness
        .json("POST", "/api/careers", json!({ "title": "  ", "location": "Remote" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_seed_action_seeds_only_the_resource() {
    let harness = TestHarness::new();
    let response = harness
        .json("POST", "/api/careers", json!({ "action": "seed" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let seeded = response.json()["seeded"].as_array().unwrap().clone();
    assert!(seeded.iter().any(|id| id == "careers-jobs"));
    assert!(!seeded.iter().any(|id| id == "hero"));
    assert_eq!(harness.get("/api/sections/hero").await.json(), json!(null));
}
