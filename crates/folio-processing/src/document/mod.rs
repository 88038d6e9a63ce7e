//! Format-specific text decoders.

mod pdf;
mod text;
mod word;

pub use pdf::PdfDecoder;
pub use text::PlainTextDecoder;
pub use word::WordDecoder;

use crate::staging::TempStaging;
use folio_core::{AppError, DecodeFailureKind, DocumentFormat};

/// Turns a complete payload of one format into text.
///
/// Decoders are blocking; callers run them off the async executor. Decoders
/// that need random access stage the payload through `staging` and must keep
/// the `StagedFile` scoped to the call.
pub trait DocumentDecoder: Send + Sync {
    fn format(&self) -> DocumentFormat;

    /// Decode `data` into text. Emptiness rules are format-specific and enforced
    /// here, so an `Ok` value always contains non-whitespace text.
    fn decode(&self, data: &[u8], staging: &TempStaging) -> Result<String, AppError>;
}

static PDF_DECODER: PdfDecoder = PdfDecoder;
static WORD_DECODER: WordDecoder = WordDecoder;
static PLAIN_TEXT_DECODER: PlainTextDecoder = PlainTextDecoder;

/// The decoder responsible for `format`.
pub fn decoder_for(format: DocumentFormat) -> &'static dyn DocumentDecoder {
    match format {
        DocumentFormat::Pdf => &PDF_DECODER,
        DocumentFormat::Word => &WORD_DECODER,
        DocumentFormat::PlainText => &PLAIN_TEXT_DECODER,
    }
}

/// Last-resort classification of a decoder library's error text, used only when
/// the library exposes no structured signal for the failure.
pub(crate) fn classify_message(message: &str) -> DecodeFailureKind {
    let lower = message.to_lowercase();
    let contains_any = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if contains_any(&["encrypt", "decrypt", "password"]) {
        DecodeFailureKind::Encrypted
    } else if contains_any(&["memory", "alloc", "too large", "capacity overflow"]) {
        DecodeFailureKind::OversizedInternal
    } else if contains_any(&[
        "not a pdf",
        "header",
        "xref",
        "trailer",
        "invalid file",
        "invalid zip",
        "archive",
    ]) {
        DecodeFailureKind::Corrupt
    } else {
        DecodeFailureKind::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_for_matches_format() {
        for format in [
            DocumentFormat::Pdf,
            DocumentFormat::Word,
            DocumentFormat::PlainText,
        ] {
            assert_eq!(decoder_for(format).format(), format);
        }
    }

    #[test]
    fn test_classify_message() {
        assert_eq!(
            classify_message("File is encrypted, password required"),
            DecodeFailureKind::Encrypted
        );
        assert_eq!(
            classify_message("memory allocation of 1073741824 bytes failed"),
            DecodeFailureKind::OversizedInternal
        );
        assert_eq!(
            classify_message("Invalid file header"),
            DecodeFailureKind::Corrupt
        );
        assert_eq!(
            classify_message("EOF while parsing an object"),
            DecodeFailureKind::Generic
        );
    }
}
