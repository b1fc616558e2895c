//! Error types for the quote engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The totals calculations themselves never fail; errors come from loading
//! configuration, converting user input, and the HTTP layer.

use thiserror::Error;

use crate::validation::ValidationError;

/// The main error type for the quote engine.
///
/// # Example
///
/// ```
/// use quote_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values that fail validation.
    #[error("Invalid configuration in '{path}': {}", join_errors(.errors))]
    InvalidConfig {
        /// The path to the offending file.
        path: String,
        /// Every field that failed validation.
        errors: Vec<ValidationError>,
    },

    /// User input failed field-level validation.
    #[error("Validation failed: {}", join_errors(.errors))]
    Validation {
        /// Every field that failed validation.
        errors: Vec<ValidationError>,
    },

    /// A category identifier did not match any category of the job.
    #[error("Category not found: {category_id}")]
    CategoryNotFound {
        /// The identifier that was looked up.
        category_id: String,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
