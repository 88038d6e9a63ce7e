//! Folio Core Library
//!
//! This crate provides the request-scoped models, error types and configuration
//! shared by the extraction pipeline and the HTTP surface.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, ExtractionConfig};
pub use error::{AppError, DecodeFailureKind, ErrorMetadata, LogLevel};
pub use models::{
    DocumentFormat, ExtractionResult, ResumeAnalysis, ResumeMetadata, ResumeSection, SectionType,
    UploadedFile, SUPPORTED_CONTENT_TYPES,
};
