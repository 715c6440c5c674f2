//! HTTP API module for the scheduling engine.
//!
//! Stateless JSON endpoints over validation, metrics, request review, and
//! request queries. Callers send hydrated entities and the acting user in
//! every body.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BulkReviewRequest, MetricsRequest, QueryRequest, ReviewRequest, ShiftValidationRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
