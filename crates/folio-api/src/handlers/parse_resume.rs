use crate::error::{ExtractErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{read_upload, rejection_failure};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use folio_core::models::ResumeAnalysis;
use folio_core::AppError;
use folio_processing::analyze_resume;
use std::sync::Arc;

/// Resumes shorter than this are most likely scans without a text layer.
const MIN_RESUME_CHARS: usize = 50;

#[utoipa::path(
    post,
    path = "/routes/parse-resume",
    tag = "extraction",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Single field `file` carrying a resume as PDF, DOC, DOCX or TXT"),
    responses(
        (status = 200, description = "Text extracted and resume structure detected", body = ResumeAnalysis),
        (status = 400, description = "Invalid, unsupported or unreadable upload, or too little text", body = ExtractErrorResponse),
        (status = 500, description = "Unexpected processing failure", body = ExtractErrorResponse)
    )
)]
pub async fn parse_resume(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResumeAnalysis>, HttpAppError> {
    let multipart = multipart.map_err(rejection_failure)?;
    let file = read_upload(multipart, state.extraction.config().max_upload_size_bytes).await?;

    let result = state.extraction.extract(file).await?;
    if result.chars_extracted < MIN_RESUME_CHARS {
        tracing::info!(
            filename = %result.filename,
            chars = result.chars_extracted,
            "Insufficient text for resume analysis"
        );
        return Err(AppError::InsufficientText.into());
    }

    let metadata = analyze_resume(&result.text);
    tracing::info!(
        filename = %result.filename,
        chars = result.chars_extracted,
        sections = metadata.sections.len(),
        "Resume parsed"
    );

    Ok(Json(ResumeAnalysis::new(result, metadata)))
}
