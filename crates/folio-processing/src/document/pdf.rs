//! PDF text extraction, page by page.

use super::{classify_message, DocumentDecoder};
use crate::staging::TempStaging;
use folio_core::{AppError, DecodeFailureKind, DocumentFormat};
use lopdf::Document;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Pages are separated by a blank line in the combined text.
const PAGE_SEPARATOR: &str = "\n\n";

/// The PDF header may be preceded by junk, but only within the first 1024 bytes.
const HEADER_SEARCH_WINDOW: usize = 1024;

const NO_TEXT_DETAIL: &str = "No text could be extracted from the PDF. \
    It may be a scanned or image-only document; please upload a searchable PDF.";

pub struct PdfDecoder;

impl DocumentDecoder for PdfDecoder {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn decode(&self, data: &[u8], staging: &TempStaging) -> Result<String, AppError> {
        if !has_pdf_header(data) {
            tracing::warn!(size = data.len(), "Upload declared as PDF has no PDF header");
            return Err(AppError::decode_failure(
                DocumentFormat::Pdf,
                DecodeFailureKind::Corrupt,
                "missing %PDF header",
            ));
        }

        let staged = staging.stage(data, DocumentFormat::Pdf.staging_suffix())?;

        let document = Document::load(staged.path()).map_err(|e| {
            let message = e.to_string();
            let kind = classify_message(&message);
            tracing::warn!(error = %message, kind = %kind, "Failed to load PDF");
            AppError::decode_failure(DocumentFormat::Pdf, kind, message)
        })?;

        if document.is_encrypted() {
            tracing::warn!("PDF is encrypted and could not be opened without a password");
            return Err(AppError::decode_failure(
                DocumentFormat::Pdf,
                DecodeFailureKind::Encrypted,
                "encrypted",
            ));
        }

        let pages = extract_pages(&document);
        if pages.is_empty() {
            return Err(AppError::NoExtractableText(NO_TEXT_DETAIL.to_string()));
        }

        Ok(pages.join(PAGE_SEPARATOR))
    }
}

fn has_pdf_header(data: &[u8]) -> bool {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

/// Text of every page that yielded any, in page order. Failing pages are skipped.
fn extract_pages(document: &Document) -> Vec<String> {
    let pages = document.get_pages();
    let total = pages.len();
    let mut texts = Vec::with_capacity(total);

    for &page_number in pages.keys() {
        // lopdf can panic on malformed content streams; treat that as a page failure
        let result = catch_unwind(AssertUnwindSafe(|| document.extract_text(&[page_number])));
        match result {
            Ok(Ok(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    tracing::debug!(page = page_number, "Page has no extractable text");
                } else {
                    texts.push(trimmed.to_string());
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    page = page_number,
                    error = %e,
                    "Failed to extract text from PDF page, skipping"
                );
            }
            Err(_) => {
                tracing::warn!(
                    page = page_number,
                    "PDF decoder panicked on page, skipping"
                );
            }
        }
    }

    tracing::debug!(
        pages_total = total,
        pages_with_text = texts.len(),
        "PDF page extraction finished"
    );
    texts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{build_pdf, FixturePage};
    use folio_core::ErrorMetadata;
    use tempfile::TempDir;

    fn staging(dir: &TempDir) -> TempStaging {
        TempStaging::new(Some(dir.path().to_path_buf()))
    }

    #[test]
    fn test_extracts_pages_in_order() {
        let dir = TempDir::new().unwrap();
        let pdf = build_pdf(&[FixturePage::Text("First page"), FixturePage::Text("Second page")]);

        let text = PdfDecoder.decode(&pdf, &staging(&dir)).unwrap();
        assert_eq!(text, "First page\n\nSecond page");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_skips_pages_without_text() {
        let dir = TempDir::new().unwrap();
        let pdf = build_pdf(&[
            FixturePage::Text("Page one"),
            FixturePage::Garbled,
            FixturePage::Blank,
            FixturePage::Text("Page four"),
        ]);

        let text = PdfDecoder.decode(&pdf, &staging(&dir)).unwrap();
        assert_eq!(text, "Page one\n\nPage four");
    }

    #[test]
    fn test_no_text_on_any_page() {
        let dir = TempDir::new().unwrap();
        let pdf = build_pdf(&[FixturePage::Blank, FixturePage::Garbled]);

        let err = PdfDecoder.decode(&pdf, &staging(&dir)).unwrap_err();
        match err {
            AppError::NoExtractableText(detail) => assert!(detail.contains("scanned")),
            other => panic!("Expected NoExtractableText, got {:?}", other),
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_rejects_missing_header_without_staging() {
        let dir = TempDir::new().unwrap();
        let err = PdfDecoder
            .decode(b"this is not a pdf", &staging(&dir))
            .unwrap_err();
        match err {
            AppError::DecodeFailure { kind, format, .. } => {
                assert_eq!(kind, DecodeFailureKind::Corrupt);
                assert_eq!(format, DocumentFormat::Pdf);
            }
            other => panic!("Expected DecodeFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_pdf_is_client_error() {
        let dir = TempDir::new().unwrap();
        let err = PdfDecoder
            .decode(b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog", &staging(&dir))
            .unwrap_err();
        // Reported as a client error whichever way the parser gives up
        assert_eq!(err.http_status_code(), 400, "{:?}", err);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_header_search_window() {
        assert!(has_pdf_header(b"%PDF-1.7"));
        assert!(has_pdf_header(b"\xEF\xBB\xBF%PDF-1.4"));
        assert!(!has_pdf_header(b"PDF-1.4"));

        let mut late = vec![b' '; HEADER_SEARCH_WINDOW];
        late.extend_from_slice(b"%PDF-1.4");
        assert!(!has_pdf_header(&late));
    }
}
