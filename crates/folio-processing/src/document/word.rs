//! Word (OOXML) text extraction: ordered paragraphs of `word/document.xml`.

use super::{classify_message, DocumentDecoder};
use crate::staging::TempStaging;
use folio_core::{AppError, DecodeFailureKind, DocumentFormat};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{self, Read};
use zip::result::ZipError;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the uncompressed main document part (zip bomb guard).
const MAX_DOCUMENT_PART_BYTES: u64 = 64 * 1024 * 1024;

/// OLE2 compound file signature used by legacy binary `.doc` files.
const OLE_MAGIC: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];

const LEGACY_DOC_DETAIL: &str = "Legacy binary .doc files cannot be read. \
    Please save the document as .docx and upload it again.";

const NO_TEXT_DETAIL: &str = "No text could be extracted from the Word document. \
    The file may be empty or corrupted.";

pub struct WordDecoder;

impl DocumentDecoder for WordDecoder {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Word
    }

    fn decode(&self, data: &[u8], staging: &TempStaging) -> Result<String, AppError> {
        if data.starts_with(&OLE_MAGIC) {
            tracing::warn!(size = data.len(), "Legacy OLE Word document uploaded");
            return Err(AppError::DecodeFailure {
                format: DocumentFormat::Word,
                kind: DecodeFailureKind::Corrupt,
                message: LEGACY_DOC_DETAIL.to_string(),
            });
        }

        let staged = staging.stage(data, DocumentFormat::Word.staging_suffix())?;
        let file = File::open(staged.path())?;

        let mut archive = ZipArchive::new(file).map_err(zip_failure)?;
        let mut part = archive.by_name(DOCUMENT_PART).map_err(zip_failure)?;

        if part.size() > MAX_DOCUMENT_PART_BYTES {
            tracing::warn!(
                uncompressed_size = part.size(),
                "Word document body exceeds size limit"
            );
            return Err(oversized_part());
        }

        // The declared size can lie; bound what is actually inflated
        let xml = read_bounded(&mut part, MAX_DOCUMENT_PART_BYTES)?;

        let paragraphs = parse_paragraphs(&xml).map_err(|e| {
            tracing::warn!(error = %e, "Malformed Word document XML");
            AppError::decode_failure(DocumentFormat::Word, DecodeFailureKind::Corrupt, e)
        })?;

        let text = paragraphs.join("\n");
        if text.trim().is_empty() {
            return Err(AppError::NoExtractableText(NO_TEXT_DETAIL.to_string()));
        }

        tracing::debug!(paragraphs = paragraphs.len(), "Word document decoded");
        Ok(text)
    }
}

fn oversized_part() -> AppError {
    AppError::decode_failure(
        DocumentFormat::Word,
        DecodeFailureKind::OversizedInternal,
        "document part too large",
    )
}

/// Read at most `limit` bytes of UTF-8; more than that is an oversize failure.
fn read_bounded(reader: impl Read, limit: u64) -> Result<String, AppError> {
    let mut xml = String::new();
    reader
        .take(limit + 1)
        .read_to_string(&mut xml)
        .map_err(io_failure)?;
    if xml.len() as u64 > limit {
        tracing::warn!(limit, "Word document body inflated past size limit");
        return Err(oversized_part());
    }
    Ok(xml)
}

fn zip_failure(err: ZipError) -> AppError {
    let kind = match &err {
        ZipError::InvalidArchive(_) | ZipError::FileNotFound => DecodeFailureKind::Corrupt,
        ZipError::UnsupportedArchive(msg) => match classify_message(msg) {
            DecodeFailureKind::Encrypted => DecodeFailureKind::Encrypted,
            _ => DecodeFailureKind::Corrupt,
        },
        ZipError::Io(e) if e.kind() == io::ErrorKind::OutOfMemory => {
            DecodeFailureKind::OversizedInternal
        }
        ZipError::Io(e) => classify_message(&e.to_string()),
    };
    tracing::warn!(error = %err, kind = %kind, "Failed to open Word document archive");
    AppError::decode_failure(DocumentFormat::Word, kind, err)
}

fn io_failure(err: io::Error) -> AppError {
    let kind = match err.kind() {
        io::ErrorKind::OutOfMemory => DecodeFailureKind::OversizedInternal,
        io::ErrorKind::InvalidData => DecodeFailureKind::Corrupt,
        _ => classify_message(&err.to_string()),
    };
    tracing::warn!(error = %err, kind = %kind, "Failed to read Word document body");
    AppError::decode_failure(DocumentFormat::Word, kind, err)
}

/// Paragraph texts in document order. Empty paragraphs are kept as empty strings;
/// tabs and line breaks inside a paragraph become `\t` and `\n`. Paragraphs nested
/// in another (text boxes) follow their enclosing paragraph.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open: Vec<OpenParagraph> = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => open.push(OpenParagraph::default()),
                b"t" => in_text_run = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => match open.last_mut() {
                    Some(parent) => parent.nested.push(String::new()),
                    None => paragraphs.push(String::new()),
                },
                b"tab" => {
                    if let Some(current) = open.last_mut() {
                        current.text.push('\t');
                    }
                }
                b"br" | b"cr" => {
                    if let Some(current) = open.last_mut() {
                        current.text.push('\n');
                    }
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    if let Some(done) = open.pop() {
                        let target = match open.last_mut() {
                            Some(parent) => &mut parent.nested,
                            None => &mut paragraphs,
                        };
                        target.push(done.text);
                        target.extend(done.nested);
                    }
                }
                b"t" => in_text_run = false,
                _ => {}
            },
            Event::Text(t) if in_text_run => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&t.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[derive(Default)]
struct OpenParagraph {
    text: String,
    /// Finished paragraphs nested inside this one, in order
    nested: Vec<String>,
}
