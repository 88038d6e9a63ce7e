use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const MSWORD_CONTENT_TYPE: &str = "application/msword";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Media types accepted for extraction, in the order reported to clients.
pub const SUPPORTED_CONTENT_TYPES: [&str; 4] = [
    PDF_CONTENT_TYPE,
    MSWORD_CONTENT_TYPE,
    DOCX_CONTENT_TYPE,
    TEXT_CONTENT_TYPE,
];

/// Strip MIME parameters and fold case ("Text/Plain; charset=utf-8" -> "text/plain").
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Closed set of formats the extraction pipeline knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    /// Word processing documents (`.doc` declared, `.docx` decoded)
    Word,
    PlainText,
}

impl DocumentFormat {
    /// Resolve a declared media type. Parameters and case are ignored.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match normalize_content_type(content_type).as_str() {
            PDF_CONTENT_TYPE => Some(Self::Pdf),
            MSWORD_CONTENT_TYPE | DOCX_CONTENT_TYPE => Some(Self::Word),
            TEXT_CONTENT_TYPE => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Human-readable name used in client-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Word => "Word document",
            Self::PlainText => "text file",
        }
    }

    /// Whether decoding needs the payload staged on disk.
    pub fn requires_staging(&self) -> bool {
        !matches!(self, Self::PlainText)
    }

    /// File suffix used for staged copies.
    pub fn staging_suffix(&self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Word => ".docx",
            Self::PlainText => ".txt",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single upload, alive only for the request that carried it.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Bytes,
    /// Declared media type, exactly as received
    pub content_type: Option<String>,
    /// Advisory only; never used to pick a decoder
    pub filename: String,
}

impl UploadedFile {
    pub fn new(
        data: impl Into<Bytes>,
        content_type: Option<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            data: data.into(),
            content_type,
            filename: filename.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Successful extraction payload returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtractionResult {
    /// Extracted text, trimmed
    pub text: String,
    pub filename: String,
    pub content_type: String,
    /// Number of Unicode scalar values in `text`
    pub chars_extracted: usize,
}

impl ExtractionResult {
    pub fn new(
        text: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let chars_extracted = text.chars().count();
        Self {
            text,
            filename: filename.into(),
            content_type: content_type.into(),
            chars_extracted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_content_type_supported() {
        assert_eq!(
            DocumentFormat::from_content_type("application/pdf"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_content_type("application/msword"),
            Some(DocumentFormat::Word)
        );
        assert_eq!(
            DocumentFormat::from_content_type(DOCX_CONTENT_TYPE),
            Some(DocumentFormat::Word)
        );
        assert_eq!(
            DocumentFormat::from_content_type("text/plain"),
            Some(DocumentFormat::PlainText)
        );
    }

    #[test]
    fn test_from_content_type_ignores_parameters_and_case() {
        assert_eq!(
            DocumentFormat::from_content_type("Text/Plain; charset=utf-8"),
            Some(DocumentFormat::PlainText)
        );
    }

    #[test]
    fn test_from_content_type_unsupported() {
        assert_eq!(DocumentFormat::from_content_type("image/png"), None);
        assert_eq!(DocumentFormat::from_content_type(""), None);
    }

    #[test]
    fn test_plain_text_never_staged() {
        assert!(!DocumentFormat::PlainText.requires_staging());
        assert!(DocumentFormat::Pdf.requires_staging());
        assert!(DocumentFormat::Word.requires_staging());
    }

    #[test]
    fn test_chars_extracted_counts_scalar_values() {
        let result = ExtractionResult::new("héllo", "a.txt", "text/plain");
        assert_eq!(result.chars_extracted, 5);
    }

    #[test]
    fn test_extraction_result_shape() {
        let result = ExtractionResult::new("abc", "a.txt", "text/plain");
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["text"], "abc");
        assert_eq!(json["filename"], "a.txt");
        assert_eq!(json["content_type"], "text/plain");
        assert_eq!(json["chars_extracted"], 3);
    }
}
