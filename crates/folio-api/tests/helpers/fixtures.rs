//! Upload payloads for integration tests.

#![allow(dead_code)]

pub use folio_processing::test_fixtures::{build_docx, build_encrypted_pdf, build_pdf, FixturePage};

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOC_MIME: &str = "application/msword";
pub const PDF_MIME: &str = "application/pdf";
pub const TEXT_MIME: &str = "text/plain";

pub const SUPPORTED_TYPES: [&str; 4] = [PDF_MIME, DOC_MIME, DOCX_MIME, TEXT_MIME];

pub const RESUME_TEXT: &str = "Jane Doe
jane.doe@example.com | +1 555-123-4567
https://github.com/janedoe

Summary
Systems engineer with ten years of experience building storage engines.

Experience
Acme Corp, Staff Engineer
Built a distributed cache used by every product team.

Skills: Rust, Go, SQL
";

/// A multipart body whose `file` part has no Content-Type header, which test
/// clients always add on their own.
pub fn multipart_without_content_type(boundary: &str, body: &str) -> String {
    format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\r\n{body}\r\n--{b}--\r\n",
        b = boundary,
        body = body
    )
}
