//! Resume structure detection over extracted text.
//!
//! Lines are scanned once for contact details and once for section headers.
//! A header line opens a new section; everything up to the next header is its
//! content. Text before the first header lands in an `other` section.

use folio_core::{ResumeMetadata, ResumeSection, SectionType};
use regex::Regex;
use std::sync::LazyLock;

const HEADER_CONFIDENCE: f32 = 0.8;

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("valid email regex")
});
static RE_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}")
        .expect("valid phone regex")
});
static RE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?[A-Za-z0-9-]+(?:\.[A-Za-z]{2,})+(?:/\S*)*")
        .expect("valid link regex")
});

/// Header patterns, checked in order; the first match wins.
static SECTION_HEADERS: LazyLock<Vec<(SectionType, Regex)>> = LazyLock::new(|| {
    [
        (SectionType::Summary, r"(?i)^(?:summary|profile|objective|about)\b"),
        (
            SectionType::Education,
            r"(?i)^(?:education|academic|qualification)",
        ),
        (
            SectionType::Experience,
            r"(?i)^(?:experience|employment|work history|professional background)\b",
        ),
        (
            SectionType::Skills,
            r"(?i)^(?:skills|technical skills|competencies|expertise)\b",
        ),
        (
            SectionType::Contact,
            r"(?i)^(?:contact|personal information|details)\b",
        ),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("valid section regex")))
    .collect()
});

/// Detect sections and contact details in resume text.
pub fn analyze_resume(text: &str) -> ResumeMetadata {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut metadata = ResumeMetadata::default();

    for line in &lines {
        if metadata.detected_email.is_none() {
            metadata.detected_email = RE_EMAIL.find(line).map(|m| m.as_str().to_string());
        }
        if metadata.detected_phone.is_none() {
            metadata.detected_phone = RE_PHONE.find(line).map(|m| m.as_str().to_string());
        }
        metadata.detected_links.extend(links_in(line));
    }

    metadata.sections = split_sections(&lines);

    metadata.detected_name = lines
        .first()
        .filter(|first| !RE_EMAIL.is_match(first) && !RE_PHONE.is_match(first))
        .map(|first| first.to_string());

    tracing::debug!(
        sections = metadata.sections.len(),
        links = metadata.detected_links.len(),
        has_email = metadata.detected_email.is_some(),
        has_phone = metadata.detected_phone.is_some(),
        "Resume analysis finished"
    );

    metadata
}

/// Links on a line, excluding anything inside an email address.
fn links_in(line: &str) -> Vec<String> {
    let emails: Vec<_> = RE_EMAIL.find_iter(line).map(|m| m.range()).collect();
    RE_LINK
        .find_iter(line)
        .filter(|m| !emails.iter().any(|e| m.start() < e.end && e.start < m.end()))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn header_of(line: &str) -> Option<(SectionType, &str)> {
    SECTION_HEADERS.iter().find_map(|(kind, re)| {
        re.find(line).map(|m| {
            let rest = line[m.end()..].trim_start_matches(|c: char| {
                c.is_whitespace() || c == ':' || c == '-'
            });
            (*kind, rest.trim())
        })
    })
}

fn split_sections(lines: &[&str]) -> Vec<ResumeSection> {
    let mut sections = Vec::new();
    let mut current = ResumeSection {
        section_type: SectionType::Other,
        content: String::new(),
        confidence: 0.0,
    };

    for line in lines {
        match header_of(line) {
            Some((kind, rest)) => {
                let finished = std::mem::replace(
                    &mut current,
                    ResumeSection {
                        section_type: kind,
                        content: String::new(),
                        confidence: HEADER_CONFIDENCE,
                    },
                );
                if !finished.content.is_empty() {
                    sections.push(finished);
                }
                // "Skills: Rust, Go" keeps its inline content
                if !rest.is_empty() {
                    current.content.push_str(rest);
                    current.content.push('\n');
                }
            }
            None => {
                current.content.push_str(line);
                current.content.push('\n');
            }
        }
    }

    if !current.content.is_empty() {
        sections.push(current);
    }
    sections
}
