//! Health and documentation endpoint tests.

mod helpers;

use helpers::setup_test_app;
use serde_json::Value;

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app();

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "folio-api");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_openapi_document() {
    let app = setup_test_app();

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["openapi"].as_str().unwrap().starts_with("3."));
    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/routes/extract-text"));
    assert!(paths.contains_key("/routes/parse-resume"));
    assert!(body["components"]["schemas"]["ExtractionResult"].is_object());
}

#[tokio::test]
async fn test_docs_page_is_served() {
    let app = setup_test_app();

    let response = app.client().get("/docs").await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("rapi-doc"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = setup_test_app();

    let response = app.client().get("/routes/unknown").await;

    assert_eq!(response.status_code(), 404);
}
