use crate::error::{ExtractErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{read_upload, rejection_failure};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use folio_core::ExtractionResult;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/routes/extract-text",
    tag = "extraction",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Single field `file` carrying a PDF, DOC, DOCX or TXT document"),
    responses(
        (status = 200, description = "Text extracted", body = ExtractionResult),
        (status = 400, description = "Invalid, unsupported or unreadable upload", body = ExtractErrorResponse),
        (status = 500, description = "Unexpected processing failure", body = ExtractErrorResponse)
    )
)]
pub async fn extract_text(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractionResult>, HttpAppError> {
    let multipart = multipart.map_err(rejection_failure)?;
    let file = read_upload(multipart, state.extraction.config().max_upload_size_bytes).await?;

    tracing::info!(
        filename = %file.filename,
        content_type = file.content_type.as_deref().unwrap_or_default(),
        size = file.len(),
        "Received file upload"
    );

    let result = state.extraction.extract(file).await?;
    Ok(Json(result))
}
