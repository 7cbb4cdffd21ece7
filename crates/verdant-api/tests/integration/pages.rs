//! Public pages rendered through the router.

use axum::http::StatusCode;
use serde_json::json;
use verdant_pages::HERO_HEADING;

use crate::common::TestHarness;

#[tokio::test]
async fn test_home_renders_seeded_hero() {
    let harness = TestHarness::seeded().await;
    let response = harness.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains(HERO_HEADING));
}

#[tokio::test]
async fn test_home_shows_saved_override() {
    let harness = TestHarness::seeded().await;
    harness
        .json("PUT", "/api/sections/hero", json!({ "heading": "Rooted in Place" }))
        .await;
    let html = harness.get("/").await.text();
    assert!(html.contains("Rooted in Place"));
    assert!(!html.contains(HERO_HEADING));
}

#[tokio::test]
async fn test_pages_render_without_content() {
    let harness = TestHarness::new();
    for path in ["/", "/about", "/sectors", "/projects", "/careers", "/contact", "/eco-matrix"] {
        let response = harness.get(path).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
        assert!(response.text().contains("<nav>"), "{path}");
    }
}

#[tokio::test]
async fn test_pages_survive_storage_outage() {
    let harness = TestHarness::seeded().await;
    harness.memory.set_fail_reads(true);
    let response = harness.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains(HERO_HEADING));
}

#[tokio::test]
async fn test_navbar_ties_keep_stored_order() {
    let harness = TestHarness::new();
    harness
        .json(
            "PUT",
            "/api/sections/navbar",
            json!({
                "links": [
                    { "label": "Zinnia", "href": "/z", "order": 1 },
                    { "label": "Aster", "href": "/a", "order": 1 },
                    { "label": "Lupine", "href": "/f", "order": 0 }
                ]
            }),
        )
        .await;
    let html = harness.get("/").await.text();
    let first = html.find("Lupine").unwrap();
    let zinnia = html.find("Zinnia").unwrap();
    let aster = html.find("Aster").unwrap();
    assert!(first < zinnia && zinnia < aster);
}

#[tokio::test]
async fn test_unknown_path_is_404_with_chrome() {
    let harness = TestHarness::new();
    let response = harness.get("/no/such/page").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.text().contains("<nav>"));
}

#[tokio::test]
async fn test_detail_pages() {
    let harness = TestHarness::new();
    harness
        .json("POST", "/api/projects", json!({ "title": "Riverside Walk", "category": "parks" }))
        .await;

    let found = harness.get("/projects/riverside-walk").await;
    assert_eq!(found.status, StatusCode::OK);
    assert!(found.text().contains("Riverside Walk"));

    assert_eq!(harness.get("/projects/missing").await.status, StatusCode::NOT_FOUND);
    assert_eq!(harness.get("/sectors/missing").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_filter_unknown_category() {
    let harness = TestHarness::new();
    harness
        .json("POST", "/api/projects", json!({ "title": "Riverside Walk", "category": "parks" }))
        .await;
    let response = harness.get("/projects?category=rooftops").await;
    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("No projects to show yet."));
    assert!(!html.contains("Riverside Walk"));
}
