//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use folio_core::models;

/// Returns the OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio API",
        version = "0.1.0",
        description = "Document text extraction for PDF, DOC, DOCX and TXT uploads, with optional resume structure detection."
    ),
    paths(
        handlers::extract_text::extract_text,
        handlers::parse_resume::parse_resume,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::ExtractionResult,
            models::ResumeAnalysis,
            models::ResumeMetadata,
            models::ResumeSection,
            models::SectionType,
            error::ExtractErrorResponse,
            handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "extraction", description = "Text extraction from uploaded documents"),
        (name = "health", description = "Service liveness")
    )
)]
pub struct ApiDoc;
