//! HTTP request handlers for the scheduling API.
//!
//! This module contains the handler functions for all API endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::approval::{self, RequestBook};
use crate::error::{WorkflowError, WorkflowResult};
use crate::metrics::compute_metrics;
use crate::models::{Actor, TeamRequest, ValidationResult};
use crate::permissions::{ActorPermissions, BulkAction, Capability};
use crate::query::{QueryCache, filter_requests};
use crate::validation::{ScheduleSnapshot, ShiftContext};

use super::request::{
    BulkReviewRequest, MetricsRequest, QueryRequest, ReviewRequest, ShiftValidationRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts/validate", post(validate_shift_handler))
        .route("/schedules/validate", post(validate_schedule_handler))
        .route("/schedules/metrics", post(metrics_handler))
        .route("/requests/approve", post(approve_handler))
        .route("/requests/reject", post(reject_handler))
        .route("/requests/escalate", post(escalate_handler))
        .route("/requests/request-info", post(request_info_handler))
        .route("/requests/bulk-approve", post(bulk_approve_handler))
        .route("/requests/bulk-reject", post(bulk_reject_handler))
        .route("/requests/query", post(query_handler))
        .with_state(state)
}

/// Handler for POST /shifts/validate.
async fn validate_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftValidationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift validation request");

    let body = match parse_body(correlation_id, payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let context = ShiftContext {
        employees: &body.employees,
        existing_shifts: &body.existing_shifts,
        today: body.today.unwrap_or_else(|| Utc::now().date_naive()),
    };
    let result = state.engine().validate_shift(&body.draft, &context);
    log_validation(correlation_id, &result, start_time, "Shift validation completed");

    json_ok(&result)
}

/// Handler for POST /schedules/validate.
async fn validate_schedule_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleSnapshot>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing schedule validation request");

    let snapshot = match parse_body(correlation_id, payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let result = state.engine().validate_schedule(&snapshot);
    log_validation(correlation_id, &result, start_time, "Schedule validation completed");

    json_ok(&result)
}

/// Handler for POST /schedules/metrics.
async fn metrics_handler(
    State(state): State<AppState>,
    payload: Result<Json<MetricsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing metrics request");

    let body = match parse_body(correlation_id, payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let business = state.config().business();
    let budget = body.weekly_budget.unwrap_or(business.weekly_budget);
    let metrics = compute_metrics(&body.shifts, &body.employees, budget, business);
    info!(
        correlation_id = %correlation_id,
        weekly_cost = %metrics.weekly_cost,
        budget_utilization = %metrics.budget_utilization,
        "Metrics computed"
    );

    json_ok(&metrics)
}

/// Handler for POST /requests/approve.
async fn approve_handler(payload: Result<Json<ReviewRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing approve request");

    let body = match parse_body(correlation_id, payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let actor = ActorPermissions::new(body.actor);
    let result = approval::approve(&body.request, &actor, body.comments.as_deref(), Utc::now());
    transition_response(correlation_id, "approve", result)
}

/// Handler for POST /requests/reject.
async fn reject_handler(payload: Result<Json<ReviewRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reject request");

    let body = match parse_body(correlation_id, payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let actor = ActorPermissions::new(body.actor);
    let comments = body.comments.as_deref().unwrap_or_default();
    let result = approval::reject(&body.request, &actor, comments, Utc::now());
    transition_response(correlation_id, "reject", result)
}

/// Handler for POST /requests/escalate.
async fn escalate_handler(payload: Result<Json<ReviewRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing escalate request");

    let body = match parse_body(correlation_id, payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let actor = ActorPermissions::new(body.actor);
    let result = approval::escalate(&body.request, &actor, body.comments.as_deref(), Utc::now());
    transition_response(correlation_id, "escalate", result)
}

/// Handler for POST /requests/request-info.
async fn request_info_handler(payload: Result<Json<ReviewRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing request-info request");

    let body = match parse_body(correlation_id, payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let actor = ActorPermissions::new(body.actor);
    let comments = body.comments.as_deref().unwrap_or_default();
    let result = approval::request_more_info(&body.request, &actor, comments, Utc::now());
    transition_response(correlation_id, "request_info", result)
}

/// Handler for POST /requests/bulk-approve.
async fn bulk_approve_handler(payload: Result<Json<BulkReviewRequest>, JsonRejection>) -> Response {
    bulk_review(BulkAction::Approve, payload)
}

/// Handler for POST /requests/bulk-reject.
async fn bulk_reject_handler(payload: Result<Json<BulkReviewRequest>, JsonRejection>) -> Response {
    bulk_review(BulkAction::Reject, payload)
}

fn bulk_review(action: BulkAction, payload: Result<Json<BulkReviewRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, action = action.as_str(), "Processing bulk request");

    let body = match parse_body(correlation_id, payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let actor = ActorPermissions::new(body.actor);
    if !actor.can(Capability::BulkActions) {
        let err = WorkflowError::BulkNotAllowed {
            action: action.as_str().to_string(),
        };
        warn!(correlation_id = %correlation_id, role = actor.role().as_str(), "Bulk action not allowed");
        return error_response(err.into());
    }

    let book = RequestBook::new(body.requests);
    let now = Utc::now();
    let outcome = match action {
        BulkAction::Approve => {
            book.bulk_approve(&body.request_ids, &actor, body.comments.as_deref(), now)
        }
        BulkAction::Reject => book.bulk_reject(
            &body.request_ids,
            &actor,
            body.comments.as_deref().unwrap_or_default(),
            now,
        ),
    };
    info!(
        correlation_id = %correlation_id,
        action = action.as_str(),
        succeeded = outcome.succeeded.len(),
        failed = outcome.failed.len(),
        "Bulk request completed"
    );

    json_ok(&outcome)
}

/// Handler for POST /requests/query.
async fn query_handler(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing request query");

    let body = match parse_body(correlation_id, payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let today = body.today.unwrap_or_else(|| Utc::now().date_naive());
    let filter = body.resolved_filter(today);
    let visible: Vec<TeamRequest> = match &body.actor {
        Some(actor) => ActorPermissions::new(actor.clone())
            .visible_requests(&body.requests)
            .into_iter()
            .cloned()
            .collect(),
        None => body.requests.clone(),
    };
    let compute = || filter_requests(&visible, &filter);

    let result = match &body.snapshot_version {
        Some(version) => {
            let scope = cache_scope(body.actor.as_ref(), version);
            match QueryCache::key(&scope, &filter, Some(today)) {
                Ok(key) => state.cache().get_or_compute(key, compute),
                Err(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "Cache key encoding failed");
                    return error_response(err.into());
                }
            }
        }
        None => Arc::new(compute()),
    };
    info!(
        correlation_id = %correlation_id,
        matched = result.matched,
        total = result.counts.total,
        "Request query completed"
    );

    json_ok(&*result)
}

/// Cache scope for a query. Visibility depends on the actor's id, role and
/// locations, so all of them go into the scope.
fn cache_scope(actor: Option<&Actor>, version: &str) -> String {
    match actor {
        Some(actor) => {
            let mut locations: Vec<&str> = actor.location_ids.iter().map(String::as_str).collect();
            locations.sort_unstable();
            locations.dedup();
            format!(
                "{}:{}:{}:{}",
                actor.id,
                actor.role.as_str(),
                locations.join(","),
                version
            )
        }
        None => format!("*:{}", version),
    }
}

/// Extracts a JSON body, turning rejections into `400` responses.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

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
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(error_response(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }))
}

fn transition_response(
    correlation_id: Uuid,
    action: &str,
    result: WorkflowResult<TeamRequest>,
) -> Response {
    match result {
        Ok(updated) => {
            info!(
                correlation_id = %correlation_id,
                action,
                request_id = %updated.id,
                status = updated.status.as_str(),
                stage = updated.approval_flow.current_stage.as_str(),
                "Request transition completed"
            );
            json_ok(&updated)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                action,
                code = err.code(),
                error = %err,
                "Request transition refused"
            );
            error_response(err.into())
        }
    }
}

fn log_validation(
    correlation_id: Uuid,
    result: &ValidationResult,
    start_time: Instant,
    message: &'static str,
) {
    info!(
        correlation_id = %correlation_id,
        is_valid = result.is_valid,
        errors = result.summary.total_errors,
        warnings = result.summary.total_warnings,
        duration_us = start_time.elapsed().as_micros(),
        "{}",
        message
    );
}

fn json_ok<T: Serialize>(value: &T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(value),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}
