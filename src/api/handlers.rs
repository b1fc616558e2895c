//! HTTP request handlers for the quote engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_category_total, calculate_quote};
use crate::error::EngineError;
use crate::models::{Category, Job, LineItem};
use crate::validation::{JobInput, validate_quote};

use super::request::QuoteRequest;
use super::response::{ApiError, ApiErrorResponse, SettingsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quote/totals", post(quote_totals_handler))
        .route(
            "/quote/categories/:category_id/total",
            post(category_total_handler),
        )
        .route("/jobs", post(create_job_handler))
        .route("/settings", get(settings_handler))
        .with_state(state)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::missing_content_type(),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response()
}

/// Converts and validates a quote snapshot.
fn validated_parts(
    correlation_id: Uuid,
    request: QuoteRequest,
) -> Result<(Job, Vec<Category>, Vec<LineItem>), Response> {
    let (job, categories, line_items) = request.into_parts();

    let errors = validate_quote(&job, &categories, &line_items);
    if !errors.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            job_id = %job.id,
            error_count = errors.len(),
            "Quote failed validation"
        );
        return Err(ApiErrorResponse::from(EngineError::Validation { errors }).into_response());
    }

    Ok((job, categories, line_items))
}

/// Handler for POST /quote/totals.
///
/// Accepts a job snapshot and returns its totals, per-category totals and
/// per-item pricing.
async fn quote_totals_handler(payload: Result<Json<QuoteRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote totals request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let (job, categories, line_items) = match validated_parts(correlation_id, request) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let result = calculate_quote(&job, &categories, &line_items);
    info!(
        correlation_id = %correlation_id,
        job_id = %job.id,
        categories_count = categories.len(),
        line_items_count = line_items.len(),
        grand_total = %result.totals.grand_total,
        duration_us = start_time.elapsed().as_micros(),
        "Quote totals calculated"
    );

    (StatusCode::OK, Json(result)).into_response()
}

/// Handler for POST /quote/categories/:category_id/total.
///
/// Returns the rolled-up total of one category and its descendants.
async fn category_total_handler(
    Path(category_id): Path<String>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        category_id = %category_id,
        "Processing category total request"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let (job, categories, line_items) = match validated_parts(correlation_id, request) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    if !categories.iter().any(|c| c.id == category_id) {
        warn!(
            correlation_id = %correlation_id,
            category_id = %category_id,
            "Category not found"
        );
        return ApiErrorResponse::from(EngineError::CategoryNotFound { category_id })
            .into_response();
    }

    let total = calculate_category_total(&category_id, &job, &categories, &line_items);
    info!(
        correlation_id = %correlation_id,
        job_id = %job.id,
        category_id = %category_id,
        total = %total.total,
        "Category total calculated"
    );

    (StatusCode::OK, Json(total)).into_response()
}

/// Handler for POST /jobs.
///
/// Validates the input and returns a new job seeded with the configured
/// defaults.
async fn create_job_handler(
    State(state): State<AppState>,
    payload: Result<Json<JobInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create job request");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.config().new_job(input) {
        Ok(job) => {
            info!(
                correlation_id = %correlation_id,
                job_id = %job.id,
                surcharge_mode = %job.surcharge_mode,
                "Job created"
            );
            (StatusCode::CREATED, Json(job)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Job creation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /settings.
async fn settings_handler(State(state): State<AppState>) -> Json<SettingsResponse> {
    let config = state.config();
    Json(SettingsResponse {
        settings: config.settings().clone(),
        units: config.units().clone(),
    })
}
