//! Plain-text decoding: UTF-8 straight from memory.

use super::DocumentDecoder;
use crate::staging::TempStaging;
use folio_core::{AppError, DecodeFailureKind, DocumentFormat};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Plain text is read straight from memory and never staged.
pub struct PlainTextDecoder;

impl DocumentDecoder for PlainTextDecoder {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::PlainText
    }

    fn decode(&self, data: &[u8], _staging: &TempStaging) -> Result<String, AppError> {
        let body = data.strip_prefix(UTF8_BOM).unwrap_or(data);

        let text = std::str::from_utf8(body).map_err(|e| {
            tracing::warn!(
                valid_up_to = e.valid_up_to(),
                "Text upload is not valid UTF-8"
            );
            AppError::DecodeFailure {
                format: DocumentFormat::PlainText,
                kind: DecodeFailureKind::Corrupt,
                message: "The text file is not valid UTF-8".to_string(),
            }
        })?;

        if text.trim().is_empty() {
            return Err(AppError::EmptyFile("The text file is empty".to_string()));
        }

        Ok(text.to_string())
    }
}
