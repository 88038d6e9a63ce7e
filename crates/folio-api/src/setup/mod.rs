//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use folio_core::Config;
use folio_processing::TempStaging;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()?;

    let state = Arc::new(AppState::new(&config));
    let staging_dir = TempStaging::new(config.extraction.temp_dir.clone()).dir();

    tracing::info!(
        environment = %config.environment,
        max_upload_size_bytes = config.max_upload_size_bytes(),
        extraction_timeout_secs = config.extraction.timeout.as_secs(),
        staging_dir = %staging_dir.display(),
        "Configuration loaded and validated successfully"
    );

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
