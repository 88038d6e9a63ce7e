//! Folio Processing Library
//!
//! Turns uploaded documents into plain text: format decoders, scoped staging of
//! payloads on disk, the extraction service that ties them together, and resume
//! structure analysis on top of the extracted text.

pub mod document;
pub mod resume;
pub mod service;
pub mod staging;

pub use document::{decoder_for, DocumentDecoder, PdfDecoder, PlainTextDecoder, WordDecoder};
pub use resume::analyze_resume;
pub use service::ExtractionService;
pub use staging::{StagedFile, TempStaging};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_fixtures;
