use super::ExtractionResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Contact,
    Education,
    Experience,
    Skills,
    Summary,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResumeSection {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub content: String,
    /// 0.0 for text preceding any recognised header
    pub confidence: f32,
}

/// Structure detected in extracted resume text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResumeMetadata {
    pub sections: Vec<ResumeSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_phone: Option<String>,
    pub detected_links: Vec<String>,
}

/// Extraction result plus the structure detected in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResumeAnalysis {
    pub text: String,
    pub filename: String,
    pub content_type: String,
    pub chars_extracted: usize,
    pub metadata: ResumeMetadata,
}

impl ResumeAnalysis {
    pub fn new(result: ExtractionResult, metadata: ResumeMetadata) -> Self {
        Self {
            text: result.text,
            filename: result.filename,
            content_type: result.content_type,
            chars_extracted: result.chars_extracted,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_serializes_type_field() {
        let section = ResumeSection {
            section_type: SectionType::Skills,
            content: "Rust\n".to_string(),
            confidence: 0.8,
        };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["type"], "skills");
        assert_eq!(json["content"], "Rust\n");
    }

    #[test]
    fn test_absent_detections_are_omitted() {
        let json = serde_json::to_value(ResumeMetadata::default()).unwrap();
        assert!(json.get("detected_name").is_none());
        assert!(json.get("detected_email").is_none());
        assert_eq!(json["detected_links"], serde_json::json!([]));
        assert_eq!(json["sections"], serde_json::json!([]));
    }
}
