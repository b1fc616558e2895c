//! HTTP API module for the quote engine.
//!
//! This module provides the REST endpoints for pricing a job snapshot,
//! rolling up a single category, creating jobs from the configured
//! defaults and reading the settings.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CategoryRequest, JobRequest, LineItemRequest, QuoteRequest};
pub use response::{ApiError, ApiErrorResponse, SettingsResponse};
pub use state::AppState;
