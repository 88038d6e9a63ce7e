//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>` and use `?` on `AppError` values;
//! rendering (status, body, logging) is driven entirely by `ErrorMetadata`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_core::{AppError, ErrorMetadata, LogLevel};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned for every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExtractErrorResponse {
    pub detail: String,
    /// Accepted media types, present only when the declared type was missing or unsupported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_types: Option<Vec<String>>,
}

impl From<&AppError> for ExtractErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            detail: err.client_message(),
            supported_types: err
                .supported_types()
                .map(|types| types.iter().map(|t| t.to_string()).collect()),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: both the trait and `AppError` are foreign to this crate)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

fn log_error(error: &AppError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = ?error, code, "Request failed with internal error");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (status, Json(ExtractErrorResponse::from(app_error))).into_response()
    }
}
