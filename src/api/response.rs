//! Response types for the quote engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{CommonUnits, Settings};
use crate::validation::ValidationError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Field-level problems, for validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            errors: Vec::new(),
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response listing every failed field.
    pub fn validation_failed(errors: Vec<ValidationError>) -> Self {
        Self {
            errors,
            ..Self::new("VALIDATION_ERROR", "Validation failed")
        }
    }

    /// Creates a category not found error response.
    pub fn category_not_found(category_id: &str) -> Self {
        Self::with_details(
            "CATEGORY_NOT_FOUND",
            format!("Category not found: {}", category_id),
            format!(
                "The category '{}' is not one of the job's categories",
                category_id
            ),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a missing content type error response.
    pub fn missing_content_type() -> Self {
        Self::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status code.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            ),
            EngineError::ConfigParseError { path, message } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            ),
            EngineError::InvalidConfig { path, errors } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError {
                    errors,
                    ..ApiError::with_details(
                        "CONFIG_ERROR",
                        "Invalid configuration",
                        format!("Invalid values in {}", path),
                    )
                },
            ),
            EngineError::Validation { errors } => ApiErrorResponse::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::validation_failed(errors),
            ),
            EngineError::CategoryNotFound { category_id } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::category_not_found(&category_id),
            ),
        }
    }
}

/// Response body for `GET /settings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsResponse {
    /// Defaults applied to newly created jobs.
    pub settings: Settings,
    /// Suggested unit labels per line item type.
    pub units: CommonUnits,
}
