//! Error types for the scheduling engine.
//!
//! Two families live here. [`EngineError`] covers configuration and input
//! faults that stop an operation outright. [`WorkflowError`] covers every
//! way a request-workflow mutation can be refused; each variant carries a
//! stable machine-readable code via [`WorkflowError::code`].
//!
//! Validation findings are *not* errors; see [`crate::models::ValidationFinding`].

use thiserror::Error;

use crate::models::{ApprovalStage, RequestStatus};

/// Configuration and input errors.
///
/// # Example
///
/// ```
/// use schedule_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/labor.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/labor.yaml");
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

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A shift draft could not be turned into a schedulable shift.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift (or `"new"` for unsaved drafts).
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A value could not be encoded, e.g. a filter used as a cache key.
    #[error("Serialization error: {message}")]
    Serialization {
        /// The underlying serializer message.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Reasons a request-workflow operation was refused.
///
/// Every mutating workflow operation returns this instead of panicking, so
/// the caller can render a precise message. Nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The actor lacks the capability, location scope, or stage role.
    #[error("Insufficient permissions to {action} request '{request_id}'")]
    InsufficientPermissions {
        /// The attempted action (e.g. "approve").
        action: String,
        /// The targeted request.
        request_id: String,
    },

    /// No request with the given id exists in the snapshot.
    #[error("Request not found: {request_id}")]
    RequestNotFound {
        /// The missing id.
        request_id: String,
    },

    /// The request's status does not allow the action.
    #[error("Request '{request_id}' cannot be {action} while {status}")]
    InvalidStatus {
        /// The targeted request.
        request_id: String,
        /// Past-tense action, used in the message.
        action: String,
        /// The status that blocked the action.
        status: RequestStatus,
    },

    /// The request's approval stage does not allow the action.
    #[error("Request '{request_id}' cannot be {action} at stage {stage}")]
    InvalidStage {
        /// The targeted request.
        request_id: String,
        /// Past-tense action, used in the message.
        action: String,
        /// The stage that blocked the action.
        stage: ApprovalStage,
    },

    /// Comments were mandatory and missing or blank.
    #[error("Comments are required to {action} request '{request_id}'")]
    CommentsRequired {
        /// The attempted action.
        action: String,
        /// The targeted request.
        request_id: String,
    },

    /// The actor's role does not allow bulk actions at all.
    #[error("Bulk {action} is not allowed for this role")]
    BulkNotAllowed {
        /// The attempted bulk action.
        action: String,
    },
}

impl WorkflowError {
    /// Stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::InsufficientPermissions { .. } => "INSUFFICIENT_PERMISSIONS",
            WorkflowError::RequestNotFound { .. } => "REQUEST_NOT_FOUND",
            WorkflowError::InvalidStatus { .. } => "INVALID_STATUS",
            WorkflowError::InvalidStage { .. } => "INVALID_STAGE",
            WorkflowError::CommentsRequired { .. } => "COMMENTS_REQUIRED",
            WorkflowError::BulkNotAllowed { .. } => "BULK_NOT_ALLOWED",
        }
    }
}

/// A type alias for Results that return WorkflowError.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
