//! Folio API Library
//!
//! HTTP surface of the extraction service: routes, handlers, multipart intake,
//! error rendering and application setup.

mod api_doc;
pub mod constants;
pub mod error;
mod handlers;
pub mod middleware;
pub mod setup;
pub mod state;
pub mod telemetry;
mod utils;

pub use error::{ExtractErrorResponse, HttpAppError};
pub use state::AppState;
