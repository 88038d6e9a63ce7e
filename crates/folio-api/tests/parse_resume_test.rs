//! Resume parsing API integration tests.

mod helpers;

use helpers::fixtures::{
    build_docx, build_pdf, FixturePage, DOCX_MIME, PDF_MIME, RESUME_TEXT, TEXT_MIME,
};
use helpers::{file_form, setup_test_app};
use serde_json::Value;

const PARSE_RESUME: &str = "/routes/parse-resume";

#[tokio::test]
async fn test_parse_text_resume() {
    let app = setup_test_app();

    let response = app
        .client()
        .post(PARSE_RESUME)
        .multipart(file_form(RESUME_TEXT, "jane.txt", TEXT_MIME))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["filename"], "jane.txt");
    assert_eq!(body["content_type"], "text/plain");
    assert_eq!(body["text"], RESUME_TEXT.trim());
    assert_eq!(
        body["chars_extracted"].as_u64().unwrap() as usize,
        RESUME_TEXT.trim().chars().count()
    );

    let metadata = &body["metadata"];
    assert_eq!(metadata["detected_name"], "Jane Doe");
    assert_eq!(metadata["detected_email"], "jane.doe@example.com");
    assert_eq!(metadata["detected_phone"], "+1 555-123-4567");
    assert_eq!(metadata["detected_links"][0], "https://github.com/janedoe");

    let kinds: Vec<&str> = metadata["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["other", "summary", "experience", "skills"]);
    assert_eq!(metadata["sections"][3]["content"], "Rust, Go, SQL\n");
}

#[tokio::test]
async fn test_parse_word_resume() {
    let app = setup_test_app();
    let paragraphs: Vec<&str> = RESUME_TEXT.lines().collect();
    let docx = build_docx(&paragraphs);

    let response = app
        .client()
        .post(PARSE_RESUME)
        .multipart(file_form(docx, "jane.docx", DOCX_MIME))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["metadata"]["detected_email"], "jane.doe@example.com");
    assert_eq!(app.staged_file_count(), 0);
}

#[tokio::test]
async fn test_short_resume_is_insufficient() {
    let app = setup_test_app();
    let pdf = build_pdf(&[FixturePage::Text("Jane Doe")]);

    let response = app
        .client()
        .post(PARSE_RESUME)
        .multipart(file_form(pdf, "scan.pdf", PDF_MIME))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(
        body["detail"],
        "The document contains very little text. If this is a scanned document, please convert it to searchable PDF first."
    );
    assert!(body.get("supported_types").is_none());
}

#[tokio::test]
async fn test_resume_shares_upload_validation() {
    let app = setup_test_app();

    let response = app
        .client()
        .post(PARSE_RESUME)
        .multipart(file_form("hello", "resume.rtf", "application/rtf"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["supported_types"].as_array().unwrap().len(), 4);
}
