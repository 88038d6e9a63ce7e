//! Route paths and multipart conventions.

pub const EXTRACT_TEXT_PATH: &str = "/routes/extract-text";
pub const PARSE_RESUME_PATH: &str = "/routes/parse-resume";
pub const HEALTH_PATH: &str = "/health";
pub const OPENAPI_PATH: &str = "/api/openapi.json";
pub const DOCS_PATH: &str = "/docs";

/// Name of the multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

/// Filename reported when the client sends none
pub const DEFAULT_FILENAME: &str = "upload";

/// Allowance for multipart framing and small extra fields on top of the file limit
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
