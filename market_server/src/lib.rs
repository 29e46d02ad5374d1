//! Market data HTTP server.
//!
//! Serves the dashboard's JSON routes from in-process quote sources:
//!
//! - `model`: the `QuoteSource` capability and the providers built on it.
//! - `api`: axum router, handlers and shared `AppState`.
//! - `error`: mapping of provider failures to `{success: false, error}` responses.
//! - `config`: command-line and environment configuration.
#![warn(missing_docs)]
pub mod api;
pub mod config;
pub mod error;
pub mod model;

pub use api::{AppState, app_router};
pub use config::Config;
