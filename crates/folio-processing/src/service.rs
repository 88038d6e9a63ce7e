//! Extraction service: validation, decoder dispatch and post-processing.

use crate::document::{decoder_for, DocumentDecoder};
use crate::staging::TempStaging;
use folio_core::config::ExtractionConfig;
use folio_core::{AppError, DocumentFormat, ExtractionResult, UploadedFile};
use std::any::Any;
use std::time::Instant;

/// Validates uploads and turns them into text. Cheap to clone; holds no
/// per-request state.
#[derive(Debug, Clone)]
pub struct ExtractionService {
    config: ExtractionConfig,
    staging: TempStaging,
}

impl ExtractionService {
    pub fn new(config: ExtractionConfig) -> Self {
        let staging = TempStaging::new(config.temp_dir.clone());
        Self { config, staging }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Check an upload and resolve its format. Checks run in a fixed order and
    /// the first failure wins: content type present, non-empty, within the size
    /// limit, supported type.
    pub fn validate(&self, file: &UploadedFile) -> Result<DocumentFormat, AppError> {
        let content_type = file
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .ok_or(AppError::MissingContentType)?;

        if file.is_empty() {
            return Err(AppError::EmptyFile("The uploaded file is empty".to_string()));
        }

        let max = self.config.max_upload_size_bytes;
        if file.len() > max {
            return Err(AppError::OversizedFile {
                size: file.len(),
                max,
            });
        }

        DocumentFormat::from_content_type(content_type)
            .ok_or_else(|| AppError::UnsupportedType(content_type.to_string()))
    }

    /// Extract the text of one upload.
    pub async fn extract(&self, file: UploadedFile) -> Result<ExtractionResult, AppError> {
        let format = self.validate(&file)?;
        let start = Instant::now();

        tracing::debug!(
            filename = %file.filename,
            format = %format,
            size = file.len(),
            "Dispatching upload to decoder"
        );

        let decoder = decoder_for(format);
        let raw = if format.requires_staging() {
            self.decode_blocking(decoder, &file).await?
        } else {
            decoder.decode(&file.data, &self.staging)?
        };

        let text = raw.trim();
        let result = ExtractionResult::new(
            text,
            file.filename,
            file.content_type.unwrap_or_default(),
        );

        if result.chars_extracted < self.config.short_text_warning_chars {
            tracing::warn!(
                filename = %result.filename,
                chars = result.chars_extracted,
                threshold = self.config.short_text_warning_chars,
                "Extracted text is unusually short"
            );
        }

        tracing::info!(
            filename = %result.filename,
            content_type = %result.content_type,
            chars = result.chars_extracted,
            duration_ms = start.elapsed().as_millis(),
            "Text extracted"
        );

        Ok(result)
    }

    /// Run a staging decoder on the blocking pool under the configured timeout.
    ///
    /// On timeout the task is abandoned but keeps its `StagedFile`, which is
    /// removed when the task finishes.
    async fn decode_blocking(
        &self,
        decoder: &'static dyn DocumentDecoder,
        file: &UploadedFile,
    ) -> Result<String, AppError> {
        let format = decoder.format();
        let data = file.data.clone();
        let staging = self.staging.clone();
        let timeout = self.config.timeout;

        let task = tokio::task::spawn_blocking(move || decoder.decode(&data, &staging));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => {
                let message = if join_err.is_panic() {
                    panic_message(join_err.into_panic())
                } else {
                    join_err.to_string()
                };
                tracing::error!(
                    filename = %file.filename,
                    format = %format,
                    error = %message,
                    "Decoder task failed"
                );
                Err(AppError::Internal(message))
            }
            Err(_) => {
                tracing::error!(
                    filename = %file.filename,
                    format = %format,
                    timeout_secs = timeout.as_secs(),
                    "Extraction timed out"
                );
                Err(AppError::Timeout {
                    seconds: timeout.as_secs(),
                })
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "decoder panicked".to_string()
    }
}
