//! Approval and escalation workflow for team requests.
//!
//! [`state_machine`] holds the pure transitions over a single request;
//! [`RequestBook`] addresses them by id over a snapshot and runs bulk
//! operations with per-id success/failure partitioning.

mod service;
pub mod state_machine;

pub use service::{BulkFailure, BulkOutcome, RequestBook};
pub use state_machine::{approve, cancel, escalate, reject, request_more_info, submit};
