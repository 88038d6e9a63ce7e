//! In-memory document builders for tests.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

/// Content of one page in a fixture PDF.
#[derive(Debug, Clone, Copy)]
pub enum FixturePage<'a> {
    Text(&'a str),
    /// Vector drawing only, no text operators
    Blank,
    /// A content stream the text extractor cannot make sense of
    Garbled,
}

/// Build a PDF with one page per entry.
pub fn build_pdf(pages: &[FixturePage<'_>]) -> Vec<u8> {
    save(pdf_document(pages))
}

/// Like `build_pdf`, with a standard security handler referenced from the
/// trailer. Contents are left in the clear; only the marker matters to readers.
pub fn build_encrypted_pdf(pages: &[FixturePage<'_>]) -> Vec<u8> {
    let mut doc = pdf_document(pages);
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "O" => Object::string_literal(vec![0u8; 32]),
        "U" => Object::string_literal(vec![0u8; 32]),
        "P" => -4,
    });
    doc.trailer.set("Encrypt", encrypt_id);
    save(doc)
}

fn pdf_document(pages: &[FixturePage<'_>]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = match page {
            FixturePage::Text(text) => Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            }
            .encode()
            .expect("encode text page"),
            FixturePage::Blank => Content {
                operations: vec![
                    Operation::new("m", vec![72.into(), 72.into()]),
                    Operation::new("l", vec![500.into(), 500.into()]),
                    Operation::new("S", vec![]),
                ],
            }
            .encode()
            .expect("encode blank page"),
            FixturePage::Garbled => b"BT /F1 24 Tf (unterminated Tj ET".to_vec(),
        };

        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn save(mut doc: Document) -> Vec<u8> {
    let mut out = Vec::new();
    doc.save_to(&mut out).expect("write fixture pdf");
    out
}

/// Build a DOCX whose body has one paragraph per entry. Empty entries become
/// empty paragraphs.
pub fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let mut body = String::new();
    for paragraph in paragraphs {
        if paragraph.is_empty() {
            body.push_str("<w:p/>");
        } else {
            body.push_str(&format!(
                r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                escape_xml(paragraph)
            ));
        }
    }

    docx_from_document_xml(&format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    ))
}

/// Package a raw `word/document.xml` into a minimal DOCX container.
pub fn docx_from_document_xml(document_xml: &str) -> Vec<u8> {
    zip_with_entries(&[
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("word/document.xml", document_xml),
    ])
}

/// A deflated zip archive with the given entries.
pub fn zip_with_entries(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        zip.start_file(*name, FileOptions::default())
            .expect("start zip entry");
        zip.write_all(contents.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish zip").into_inner()
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;
