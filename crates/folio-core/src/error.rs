//! Error types module
//!
//! All failures of the extraction pipeline are unified under `AppError`. Each
//! variant self-describes how it is presented to clients through `ErrorMetadata`,
//! so the HTTP layer only has to render what the error reports.

use std::fmt::Display;
use std::io;

use crate::models::{DocumentFormat, SUPPORTED_CONTENT_TYPES};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for files we could not decode
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNSUPPORTED_TYPE")
    fn error_code(&self) -> &'static str;

    /// Client-facing detail string
    fn client_message(&self) -> String;

    /// Supported media types, attached only where a client can self-correct
    fn supported_types(&self) -> Option<&'static [&'static str]>;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Why a decoder rejected a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFailureKind {
    /// Not a valid file of the declared format
    Corrupt,
    /// Encrypted without a usable password
    Encrypted,
    /// Decoder ran out of memory or hit an internal size limit
    OversizedInternal,
    Generic,
}

impl DecodeFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Corrupt => "corrupt",
            Self::Encrypted => "encrypted",
            Self::OversizedInternal => "oversized-internal",
            Self::Generic => "generic",
        }
    }
}

impl Display for DecodeFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const UNSUPPORTED_TYPE_DETAIL: &str =
    "Unsupported file type. Please upload a PDF, DOC, DOCX, or TXT file.";

const INSUFFICIENT_TEXT_DETAIL: &str = "The document contains very little text. \
    If this is a scanned document, please convert it to searchable PDF first.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Invalid multipart upload: {0}")]
    InvalidMultipart(String),

    #[error("Missing content type")]
    MissingContentType,

    #[error("Empty file: {0}")]
    EmptyFile(String),

    #[error("File too large: {size} bytes exceeds max {max} bytes")]
    OversizedFile { size: usize, max: usize },

    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("Failed to decode {format} ({kind}): {message}")]
    DecodeFailure {
        format: DocumentFormat,
        kind: DecodeFailureKind,
        /// Client-facing detail; raw library errors are logged, not stored here
        message: String,
    },

    #[error("No extractable text: {0}")]
    NoExtractableText(String),

    #[error("Insufficient text content")]
    InsufficientText,

    #[error("Extraction timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Build a decode failure whose client detail is derived from its kind.
    /// `raw` is only embedded for `Generic`, where nothing better is known.
    pub fn decode_failure(
        format: DocumentFormat,
        kind: DecodeFailureKind,
        raw: impl Display,
    ) -> Self {
        let label = format.label();
        let message = match kind {
            DecodeFailureKind::Corrupt => format!("Invalid or corrupted {}", label),
            DecodeFailureKind::Encrypted => format!(
                "Invalid or encrypted {}. Please upload an unencrypted copy.",
                label
            ),
            DecodeFailureKind::OversizedInternal => {
                format!("The {} is too large to process", label)
            }
            DecodeFailureKind::Generic => {
                format!("Error extracting text from {}: {}", label, raw)
            }
        };
        AppError::DecodeFailure {
            format,
            kind,
            message,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Only the error kind reaches clients; I/O messages can carry file paths.
impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        tracing::error!(error = %err, "I/O failure during extraction");
        AppError::Internal(format!("IO error: {}", err.kind()))
    }
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::MissingFile => (400, "MISSING_FILE", LogLevel::Debug),
        AppError::InvalidMultipart(_) => (400, "INVALID_MULTIPART", LogLevel::Debug),
        AppError::MissingContentType => (400, "MISSING_CONTENT_TYPE", LogLevel::Debug),
        AppError::EmptyFile(_) => (400, "EMPTY_FILE", LogLevel::Debug),
        AppError::OversizedFile { .. } => (400, "OVERSIZED_FILE", LogLevel::Debug),
        AppError::UnsupportedType(_) => (400, "UNSUPPORTED_TYPE", LogLevel::Debug),
        AppError::DecodeFailure { .. } => (400, "DECODE_FAILURE", LogLevel::Warn),
        AppError::NoExtractableText(_) => (400, "NO_EXTRACTABLE_TEXT", LogLevel::Warn),
        AppError::InsufficientText => (400, "INSUFFICIENT_TEXT", LogLevel::Debug),
        AppError::Timeout { .. } => (500, "EXTRACTION_TIMEOUT", LogLevel::Error),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => {
            (500, "INTERNAL_ERROR", LogLevel::Error)
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingFile => "No file uploaded".to_string(),
            AppError::InvalidMultipart(msg) => format!("Invalid multipart upload: {}", msg),
            AppError::MissingContentType => format!(
                "File content type is missing. {}",
                UNSUPPORTED_TYPE_DETAIL.trim_start_matches("Unsupported file type. ")
            ),
            AppError::EmptyFile(detail) => detail.clone(),
            AppError::OversizedFile { max, .. } => format!(
                "File too large. Maximum size is {} MB",
                max / 1024 / 1024
            ),
            AppError::UnsupportedType(_) => UNSUPPORTED_TYPE_DETAIL.to_string(),
            AppError::DecodeFailure { message, .. } => message.clone(),
            AppError::NoExtractableText(detail) => detail.clone(),
            AppError::InsufficientText => INSUFFICIENT_TEXT_DETAIL.to_string(),
            AppError::Timeout { seconds } => format!(
                "Error processing file: extraction did not finish within {} seconds",
                seconds
            ),
            AppError::Internal(msg) => format!("Error processing file: {}", msg),
            AppError::InternalWithSource { message, .. } => {
                format!("Error processing file: {}", message)
            }
        }
    }

    fn supported_types(&self) -> Option<&'static [&'static str]> {
        match self {
            AppError::MissingContentType | AppError::UnsupportedType(_) => {
                Some(&SUPPORTED_CONTENT_TYPES)
            }
            _ => None,
        }
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}
