//! Request lifecycle transitions.
//!
//! Every function takes the current request by reference and returns a new
//! request; the input is never mutated. Reviewer decisions append one
//! [`ApprovalReview`] to the history. Failures are typed [`WorkflowError`]s
//! and leave nothing changed.
//!
//! ```text
//! supervisor ──approve──▶ business_admin ──approve──▶ completed
//!     │  └─────approve (no admin step)──────────────▶ completed
//!     └──escalate──▶ business_admin (escalated) ──approve──▶ completed
//! any stage ──reject──▶ completed
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{WorkflowError, WorkflowResult};
use crate::models::{
    ApprovalReview, ApprovalStage, RequestStatus, ReviewDecision, TeamRequest,
};
use crate::permissions::{ActorPermissions, RequestAction};

fn denied(action: &str, request: &TeamRequest) -> WorkflowError {
    WorkflowError::InsufficientPermissions {
        action: action.to_string(),
        request_id: request.id.clone(),
    }
}

fn require_reviewable(request: &TeamRequest, action: &str) -> WorkflowResult<()> {
    if !request.status.is_reviewable() {
        return Err(WorkflowError::InvalidStatus {
            request_id: request.id.clone(),
            action: action.to_string(),
            status: request.status,
        });
    }
    if request.stage() == ApprovalStage::Completed {
        return Err(WorkflowError::InvalidStage {
            request_id: request.id.clone(),
            action: action.to_string(),
            stage: request.stage(),
        });
    }
    Ok(())
}

fn required_comments<'a>(
    comments: &'a str,
    action: &str,
    request: &TeamRequest,
) -> WorkflowResult<&'a str> {
    let trimmed = comments.trim();
    if trimmed.is_empty() {
        return Err(WorkflowError::CommentsRequired {
            action: action.to_string(),
            request_id: request.id.clone(),
        });
    }
    Ok(trimmed)
}

fn optional_comments(comments: Option<&str>) -> Option<String> {
    comments
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Returns `request` with one more review in its history.
fn reviewed(
    request: &TeamRequest,
    actor: &ActorPermissions,
    decision: ReviewDecision,
    comments: Option<String>,
    now: DateTime<Utc>,
) -> TeamRequest {
    let review = ApprovalReview {
        id: Uuid::new_v4(),
        reviewer_id: actor.actor().id.clone(),
        reviewer_role: actor.role(),
        stage: request.stage(),
        decision,
        comments,
        timestamp: now,
    };
    let mut next = request.clone();
    next.approval_flow.approval_history = request.approval_flow.approval_history.appended(review);
    next
}

/// Sends a draft to review. Only the owner may submit.
pub fn submit(request: &TeamRequest, actor: &ActorPermissions) -> WorkflowResult<TeamRequest> {
    if !request.is_owned_by(&actor.actor().id) {
        return Err(denied("submit", request));
    }
    if request.status != RequestStatus::Draft {
        return Err(WorkflowError::InvalidStatus {
            request_id: request.id.clone(),
            action: "submitted".to_string(),
            status: request.status,
        });
    }

    let mut next = request.clone();
    next.status = RequestStatus::Pending;
    tracing::debug!(request_id = %request.id, "Request submitted");
    Ok(next)
}

/// Withdraws a request before anyone has reviewed it. Only the owner may
/// cancel.
pub fn cancel(request: &TeamRequest, actor: &ActorPermissions) -> WorkflowResult<TeamRequest> {
    if !request.is_owned_by(&actor.actor().id) {
        return Err(denied("cancel", request));
    }
    let pre_review = matches!(request.status, RequestStatus::Draft | RequestStatus::Pending)
        && request.approval_flow.approval_history.is_empty();
    if !pre_review {
        return Err(WorkflowError::InvalidStatus {
            request_id: request.id.clone(),
            action: "cancelled".to_string(),
            status: request.status,
        });
    }

    let mut next = request.clone();
    next.status = RequestStatus::Cancelled;
    next.approval_flow.current_stage = ApprovalStage::Completed;
    tracing::debug!(request_id = %request.id, "Request cancelled");
    Ok(next)
}

/// Approves at the current stage.
///
/// At the supervisor stage the request moves on to business-admin review
/// when its flow requires it, and is approved outright otherwise. At the
/// business-admin or escalated stage it is always approved.
pub fn approve(
    request: &TeamRequest,
    actor: &ActorPermissions,
    comments: Option<&str>,
    now: DateTime<Utc>,
) -> WorkflowResult<TeamRequest> {
    require_reviewable(request, "approved")?;
    if !actor.can_manage_request(request, RequestAction::Approve) {
        return Err(denied("approve", request));
    }

    let mut next = reviewed(
        request,
        actor,
        ReviewDecision::Approved,
        optional_comments(comments),
        now,
    );
    let needs_admin = request.stage() == ApprovalStage::Supervisor
        && request.approval_flow.flow_config.requires_business_admin_approval;
    if needs_admin {
        next.approval_flow.current_stage = ApprovalStage::BusinessAdmin;
        next.status = RequestStatus::UnderReview;
    } else {
        next.approval_flow.current_stage = ApprovalStage::Completed;
        next.status = RequestStatus::Approved;
    }

    tracing::debug!(
        request_id = %request.id,
        from = %request.stage(),
        to = %next.stage(),
        status = %next.status,
        "Request approved at stage"
    );
    Ok(next)
}

/// Rejects from any stage. Comments are mandatory.
pub fn reject(
    request: &TeamRequest,
    actor: &ActorPermissions,
    comments: &str,
    now: DateTime<Utc>,
) -> WorkflowResult<TeamRequest> {
    require_reviewable(request, "rejected")?;
    if !actor.can_manage_request(request, RequestAction::Reject) {
        return Err(denied("reject", request));
    }
    let comments = required_comments(comments, "reject", request)?;

    let mut next = reviewed(
        request,
        actor,
        ReviewDecision::Rejected,
        Some(comments.to_string()),
        now,
    );
    next.approval_flow.current_stage = ApprovalStage::Completed;
    next.status = RequestStatus::Rejected;

    tracing::debug!(request_id = %request.id, from = %request.stage(), "Request rejected");
    Ok(next)
}

/// Forces business-admin review and bumps the priority one level.
///
/// Supervisor-only, from the supervisor stage, while pending or under
/// review.
pub fn escalate(
    request: &TeamRequest,
    actor: &ActorPermissions,
    reason: Option<&str>,
    now: DateTime<Utc>,
) -> WorkflowResult<TeamRequest> {
    require_reviewable(request, "escalated")?;
    if request.stage() != ApprovalStage::Supervisor {
        return Err(WorkflowError::InvalidStage {
            request_id: request.id.clone(),
            action: "escalated".to_string(),
            stage: request.stage(),
        });
    }
    if !actor.can_escalate_request(request) {
        return Err(denied("escalate", request));
    }

    let mut next = reviewed(
        request,
        actor,
        ReviewDecision::Escalated,
        optional_comments(reason),
        now,
    );
    next.approval_flow.current_stage = ApprovalStage::BusinessAdmin;
    next.approval_flow.is_escalated = true;
    next.status = RequestStatus::UnderReview;
    next.priority = request.priority.escalated();

    tracing::debug!(
        request_id = %request.id,
        priority = ?next.priority,
        "Request escalated"
    );
    Ok(next)
}

/// Sends the request back to the requester without changing its stage, so
/// the same reviewer sees it again. Comments are mandatory.
pub fn request_more_info(
    request: &TeamRequest,
    actor: &ActorPermissions,
    comments: &str,
    now: DateTime<Utc>,
) -> WorkflowResult<TeamRequest> {
    require_reviewable(request, "returned for information")?;
    if !actor.can_manage_request(request, RequestAction::Approve) {
        return Err(denied("request information on", request));
    }
    let comments = required_comments(comments, "request information on", request)?;

    let mut next = reviewed(
        request,
        actor,
        ReviewDecision::InfoRequested,
        Some(comments.to_string()),
        now,
    );
    next.status = RequestStatus::Pending;

    tracing::debug!(request_id = %request.id, stage = %request.stage(), "More information requested");
    Ok(next)
}
