pub mod document;
pub mod resume;

pub use document::{
    normalize_content_type, DocumentFormat, ExtractionResult, UploadedFile,
    SUPPORTED_CONTENT_TYPES,
};
pub use resume::{ResumeAnalysis, ResumeMetadata, ResumeSection, SectionType};
