//! Test helpers: build the router over an isolated staging directory.
//!
//! Run from workspace root: `cargo test -p folio-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use folio_api::setup::routes;
use folio_api::AppState;
use folio_core::config::ExtractionConfig;
use folio_core::Config;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server plus the directory staged files are written to.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of entries left in the staging directory.
    pub fn staged_file_count(&self) -> usize {
        std::fs::read_dir(self.temp_dir.path())
            .expect("read staging dir")
            .count()
    }
}

pub fn create_test_config(temp_dir: &TempDir) -> Config {
    Config {
        environment: "test".to_string(),
        extraction: ExtractionConfig {
            temp_dir: Some(temp_dir.path().to_path_buf()),
            ..ExtractionConfig::default()
        },
        ..Config::default()
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {})
}

/// Setup test app after adjusting the default test config.
pub fn setup_test_app_with(customize: impl FnOnce(&mut Config)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = create_test_config(&temp_dir);
    customize(&mut config);

    let state = Arc::new(AppState::new(&config));
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, temp_dir }
}

/// Multipart form with a single `file` part.
pub fn file_form(data: impl Into<bytes::Bytes>, filename: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(data.into())
        .file_name(filename.to_string())
        .mime_type(mime_type);
    MultipartForm::new().add_part("file", part)
}
