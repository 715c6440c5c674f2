//! Id-addressed workflow over a request snapshot.
//!
//! [`RequestBook`] is the caller's immutable snapshot of requests. Every
//! operation looks a request up by id, runs the matching transition, and
//! returns the updated request; the book itself is only changed through
//! [`RequestBook::with_updates`], which the caller applies after persisting.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{WorkflowError, WorkflowResult};
use crate::models::TeamRequest;
use crate::permissions::{ActorPermissions, BulkAction, Capability};

use super::state_machine;

/// One id that a bulk operation could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    /// The request id.
    pub request_id: String,
    /// Stable error code, as in [`WorkflowError::code`].
    pub code: String,
    /// Human-readable reason.
    pub message: String,
}

impl BulkFailure {
    fn new(request_id: &str, error: &WorkflowError) -> Self {
        Self {
            request_id: request_id.to_string(),
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Per-id partition of a bulk operation.
///
/// A failure on one id never undoes the successes on others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    /// Ids processed successfully, in input order.
    pub succeeded: Vec<String>,
    /// Ids that failed, with reasons, in input order.
    pub failed: Vec<BulkFailure>,
    /// The updated requests for every succeeded id.
    pub updated: Vec<TeamRequest>,
}

/// A snapshot of requests addressed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestBook {
    requests: Vec<TeamRequest>,
}

impl RequestBook {
    /// Wraps a snapshot.
    pub fn new(requests: Vec<TeamRequest>) -> Self {
        Self { requests }
    }

    /// All requests, in snapshot order.
    pub fn requests(&self) -> &[TeamRequest] {
        &self.requests
    }

    /// Looks a request up by id.
    pub fn get(&self, request_id: &str) -> WorkflowResult<&TeamRequest> {
        self.requests
            .iter()
            .find(|r| r.id == request_id)
            .ok_or_else(|| WorkflowError::RequestNotFound {
                request_id: request_id.to_string(),
            })
    }

    /// Returns a new book with `updated` requests replacing those with the
    /// same id. Unknown ids are appended.
    pub fn with_updates(&self, updated: impl IntoIterator<Item = TeamRequest>) -> Self {
        let mut requests = self.requests.clone();
        for request in updated {
            match requests.iter_mut().find(|r| r.id == request.id) {
                Some(slot) => *slot = request,
                None => requests.push(request),
            }
        }
        Self { requests }
    }

    /// Submits a draft.
    pub fn submit(&self, request_id: &str, actor: &ActorPermissions) -> WorkflowResult<TeamRequest> {
        state_machine::submit(self.get(request_id)?, actor)
    }

    /// Cancels a request before review.
    pub fn cancel(&self, request_id: &str, actor: &ActorPermissions) -> WorkflowResult<TeamRequest> {
        state_machine::cancel(self.get(request_id)?, actor)
    }

    /// Approves at the current stage.
    pub fn approve(
        &self,
        request_id: &str,
        actor: &ActorPermissions,
        comments: Option<&str>,
        now: DateTime<Utc>,
    ) -> WorkflowResult<TeamRequest> {
        state_machine::approve(self.get(request_id)?, actor, comments, now)
    }

    /// Rejects; comments are mandatory.
    pub fn reject(
        &self,
        request_id: &str,
        actor: &ActorPermissions,
        comments: &str,
        now: DateTime<Utc>,
    ) -> WorkflowResult<TeamRequest> {
        state_machine::reject(self.get(request_id)?, actor, comments, now)
    }

    /// Escalates to business-admin review.
    pub fn escalate(
        &self,
        request_id: &str,
        actor: &ActorPermissions,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> WorkflowResult<TeamRequest> {
        state_machine::escalate(self.get(request_id)?, actor, reason, now)
    }

    /// Returns the request to the requester for more information.
    pub fn request_more_info(
        &self,
        request_id: &str,
        actor: &ActorPermissions,
        comments: &str,
        now: DateTime<Utc>,
    ) -> WorkflowResult<TeamRequest> {
        state_machine::request_more_info(self.get(request_id)?, actor, comments, now)
    }

    /// Approves each id independently.
    pub fn bulk_approve(
        &self,
        request_ids: &[String],
        actor: &ActorPermissions,
        comments: Option<&str>,
        now: DateTime<Utc>,
    ) -> BulkOutcome {
        self.bulk(BulkAction::Approve, request_ids, actor, |request| {
            state_machine::approve(request, actor, comments, now)
        })
    }

    /// Rejects each id independently with the same comments.
    pub fn bulk_reject(
        &self,
        request_ids: &[String],
        actor: &ActorPermissions,
        comments: &str,
        now: DateTime<Utc>,
    ) -> BulkOutcome {
        self.bulk(BulkAction::Reject, request_ids, actor, |request| {
            state_machine::reject(request, actor, comments, now)
        })
    }

    fn bulk<F>(
        &self,
        action: BulkAction,
        request_ids: &[String],
        actor: &ActorPermissions,
        transition: F,
    ) -> BulkOutcome
    where
        F: Fn(&TeamRequest) -> WorkflowResult<TeamRequest>,
    {
        let mut outcome = BulkOutcome::default();
        let mut seen: HashSet<&str> = HashSet::with_capacity(request_ids.len());

        for request_id in request_ids {
            if !seen.insert(request_id.as_str()) {
                continue;
            }

            let result = if actor.can(Capability::BulkActions) {
                self.get(request_id).and_then(&transition)
            } else {
                Err(WorkflowError::BulkNotAllowed {
                    action: action.as_str().to_string(),
                })
            };

            match result {
                Ok(updated) => {
                    outcome.succeeded.push(request_id.clone());
                    outcome.updated.push(updated);
                }
                Err(error) => outcome.failed.push(BulkFailure::new(request_id, &error)),
            }
        }

        tracing::debug!(
            action = action.as_str(),
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Bulk request action"
        );
        outcome
    }
}
