//! Route configuration and setup

use crate::constants::{
    DOCS_PATH, EXTRACT_TEXT_PATH, HEALTH_PATH, MULTIPART_OVERHEAD_BYTES, OPENAPI_PATH,
    PARSE_RESUME_PATH,
};
use crate::handlers;
use crate::middleware::request_id_middleware;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use folio_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Slightly above the file limit so the upload reader reports the precise
    // oversize error; anything beyond this fails inside the multipart stream.
    let body_limit = config
        .max_upload_size_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let http_concurrency_limit = config.http_concurrency_limit.max(1);
    tracing::info!(
        http_concurrency_limit,
        body_limit,
        "HTTP limits configured"
    );

    let extraction_routes = Router::new()
        .route(EXTRACT_TEXT_PATH, post(handlers::extract_text::extract_text))
        .route(PARSE_RESUME_PATH, post(handlers::parse_resume::parse_resume))
        .layer(DefaultBodyLimit::max(body_limit));

    let app = extraction_routes
        .route(HEALTH_PATH, get(handlers::health::health_check))
        .route(
            OPENAPI_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_PATH).path(DOCS_PATH))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any));
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_rejects_invalid_origin() {
        let config = Config {
            cors_origins: vec!["https://ok.example".to_string(), "bad\norigin".to_string()],
            ..Config::default()
        };
        assert!(setup_cors(&config).is_err());
    }

    #[test]
    fn test_cors_explicit_origins() {
        let config = Config {
            cors_origins: vec!["https://app.example".to_string()],
            ..Config::default()
        };
        assert!(setup_cors(&config).is_ok());
    }
}
