//! Multipart intake for the extraction routes.

use crate::constants::{DEFAULT_FILENAME, FILE_FIELD};
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::multipart::MultipartRejection;
use axum::http::StatusCode;
use bytes::BytesMut;
use folio_core::{AppError, UploadedFile};

/// Read the single `file` field of a multipart body.
///
/// The declared content type is checked before any payload is read, and the
/// payload is read chunk by chunk so an oversized upload is rejected as soon
/// as it crosses `max_size`. Other fields are skipped.
pub async fn read_upload(
    mut multipart: Multipart,
    max_size: usize,
) -> Result<UploadedFile, AppError> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_failure(e, max_size))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::InvalidMultipart(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        let content_type = match field.content_type() {
            Some(ct) => ct.to_string(),
            None => {
                tracing::debug!(filename = %filename, "Upload has no declared content type");
                return Err(AppError::MissingContentType);
            }
        };

        let mut data = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_failure(e, max_size))?
        {
            let size = data.len() + chunk.len();
            if size > max_size {
                tracing::debug!(
                    filename = %filename,
                    read = size,
                    max = max_size,
                    "Upload exceeds size limit, stopped reading"
                );
                return Err(AppError::OversizedFile {
                    size,
                    max: max_size,
                });
            }
            data.extend_from_slice(&chunk);
        }

        upload = Some(UploadedFile::new(
            data.freeze(),
            Some(content_type),
            filename,
        ));
    }

    upload.ok_or(AppError::MissingFile)
}

/// The request was not a readable multipart body at all.
pub fn rejection_failure(rejection: MultipartRejection) -> AppError {
    AppError::InvalidMultipart(rejection.body_text())
}

fn multipart_failure(err: MultipartError, max_size: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        // The body limit tripped; the exact size is unknown beyond exceeding it
        AppError::OversizedFile {
            size: max_size.saturating_add(1),
            max: max_size,
        }
    } else {
        AppError::InvalidMultipart(err.body_text())
    }
}
