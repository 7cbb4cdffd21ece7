//! Contact submissions over JSON and the HTML form.

use axum::http::StatusCode;
use serde_json::json;
use verdant_pages::contact::inquiries;

use crate::common::TestHarness;

#[tokio::test]
async fn test_api_submit_records_inquiry() {
    let harness = TestHarness::new();
    let response = harness
        .json(
            "POST",
            "/api/contact",
            json!({ "name": "Ada", "email": "ada@example.com", "message": "A new lawn" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "success": true }));

    let recorded = inquiries(&harness.state.content).await;
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0]["email"], "ada@example.com");
    assert!(recorded[0]["receivedAt"].is_string());
}

#[tokio::test]
async fn test_api_submit_reports_field_errors() {
    let harness = TestHarness::new();
    let response = harness
        .json("POST", "/api/contact", json!({ "name": "Ada", "email": "not-an-email" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["fields"]["email"], "Please enter a valid email address");
    assert_eq!(body["fields"]["message"], "Message is required");
    assert!(body["fields"].get("name").is_none());
}

#[tokio::test]
async fn test_form_submit_thanks() {
    let harness = TestHarness::new();
    let response = harness
        .form(
            "/contact",
            &[("name", "Ada"), ("email", "ada@example.com"), ("message", "Hedges")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("Thank you! Your message has been sent."));
}

#[tokio::test]
async fn test_form_submit_keeps_values_on_error() {
    let harness = TestHarness::new();
    let response = harness
        .form("/contact", &[("name", "Ada <3"), ("email", ""), ("message", "")])
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let html = response.text();
    assert!(html.contains("Email is required"));
    assert!(html.contains("Ada &lt;3"));
    assert!(inquiries(&harness.state.content).await.is_empty());
}

#[tokio::test]
async fn test_form_submit_storage_failure() {
    let harness = TestHarness::new();
    harness.memory.set_fail_writes(true);
    let response = harness
        .form(
            "/contact",
            &[("name", "Ada"), ("email", "ada@example.com"), ("message", "Hedges")],
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("Your message could not be sent."));
}
