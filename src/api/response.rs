//! Response types for the scheduling API.
//!
//! This module defines the error response structures and the mapping from
//! engine and workflow errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, WorkflowError};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { field, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    format!("{}: {}", field, message),
                ),
            },
            EngineError::InvalidShift { shift_id, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SHIFT",
                    format!("Invalid shift '{}': {}", shift_id, message),
                    "The shift data contains invalid information",
                ),
            },
            EngineError::Serialization { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("SERIALIZATION_ERROR", message),
            },
        }
    }
}

impl From<WorkflowError> for ApiErrorResponse {
    fn from(error: WorkflowError) -> Self {
        let status = match &error {
            WorkflowError::InsufficientPermissions { .. } | WorkflowError::BulkNotAllowed { .. } => {
                StatusCode::FORBIDDEN
            }
            WorkflowError::RequestNotFound { .. } => StatusCode::NOT_FOUND,
            WorkflowError::InvalidStatus { .. } | WorkflowError::InvalidStage { .. } => {
                StatusCode::CONFLICT
            }
            WorkflowError::CommentsRequired { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(error.code(), error.to_string()),
        }
    }
}
