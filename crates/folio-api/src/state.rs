//! Application state shared by all handlers.

use folio_core::Config;
use folio_processing::ExtractionService;

#[derive(Clone)]
pub struct AppState {
    pub extraction: ExtractionService,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            extraction: ExtractionService::new(config.extraction.clone()),
        }
    }
}
