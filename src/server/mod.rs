//! HTTP transport
//!
//! Exposes the anonymization engine over JSON routes for the browser
//! extension:
//!
//! - `GET /health`
//! - `GET /get_mappings`
//! - `POST /config`
//! - `POST /anonymize`
//! - `POST /deanonymize`
//!
//! Errors are returned as `{"error": "..."}` with 400 for bad input, 404
//! for unknown contexts and 500 otherwise.

pub mod app;
pub mod routes;

pub use app::{build_app, serve, AppState};
pub use routes::ApiError;
