//! Team requests (leave, shift changes, overtime) and their approval flow.
//!
//! A request carries its own [`ApprovalFlow`]: the current review stage, the
//! escalation flag, the append-only [`ReviewLog`], and the [`FlowConfig`]
//! derived from the request type. Transitions live in
//! [`crate::approval`]; this module only defines the data.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::actor::Role;

/// What the employee is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// Swap or move a scheduled shift.
    ShiftChange,
    /// Paid annual leave.
    Vacation,
    /// Medical leave.
    SickLeave,
    /// Personal leave.
    PersonalLeave,
    /// Unpaid time off.
    TimeOff,
    /// Planned absence.
    Absence,
    /// Permission to work extra hours.
    Overtime,
    /// Leaving before the end of a shift.
    EarlyLeave,
    /// Starting after the beginning of a shift.
    LateArrival,
}

impl RequestType {
    /// Every request type, in declaration order.
    pub const ALL: [RequestType; 9] = [
        RequestType::ShiftChange,
        RequestType::Vacation,
        RequestType::SickLeave,
        RequestType::PersonalLeave,
        RequestType::TimeOff,
        RequestType::Absence,
        RequestType::Overtime,
        RequestType::EarlyLeave,
        RequestType::LateArrival,
    ];

    /// Returns true when an approved request of this type keeps the employee
    /// off work for its whole date range.
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            RequestType::Vacation
                | RequestType::SickLeave
                | RequestType::PersonalLeave
                | RequestType::TimeOff
                | RequestType::Absence
        )
    }
}

/// Lifecycle status of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Being written; invisible to reviewers.
    Draft,
    /// Submitted and waiting for the current stage's reviewer.
    Pending,
    /// Past the first stage, waiting for final review.
    UnderReview,
    /// Terminal: granted.
    Approved,
    /// Terminal: refused.
    Rejected,
    /// Terminal: withdrawn before any review.
    Cancelled,
}

impl RequestStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Draft => "draft",
            RequestStatus::Pending => "pending",
            RequestStatus::UnderReview => "under_review",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true for statuses a reviewer can act on.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::UnderReview)
    }

    /// Returns true once no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Approved | RequestStatus::Rejected | RequestStatus::Cancelled
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestPriority {
    /// Rank 1.
    Low,
    /// Rank 2.
    Medium,
    /// Rank 3.
    High,
    /// Rank 4.
    Urgent,
    /// Rank 5.
    Emergency,
}

impl RequestPriority {
    /// Fixed sort rank: emergency = 5 down to low = 1.
    pub fn rank(&self) -> u8 {
        match self {
            RequestPriority::Low => 1,
            RequestPriority::Medium => 2,
            RequestPriority::High => 3,
            RequestPriority::Urgent => 4,
            RequestPriority::Emergency => 5,
        }
    }

    /// Priority after escalation: low → medium, medium → high, others unchanged.
    pub fn escalated(&self) -> Self {
        match self {
            RequestPriority::Low => RequestPriority::Medium,
            RequestPriority::Medium => RequestPriority::High,
            other => *other,
        }
    }
}

/// The checkpoint a request occupies in its review lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStage {
    /// First review, by a supervisor or business admin.
    Supervisor,
    /// Final review, by a business admin.
    BusinessAdmin,
    /// Forced business-admin review; reviewed exactly like `BusinessAdmin`.
    Escalated,
    /// No reviewer acts any more.
    Completed,
}

impl ApprovalStage {
    /// Returns the wire name of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStage::Supervisor => "supervisor",
            ApprovalStage::BusinessAdmin => "business_admin",
            ApprovalStage::Escalated => "escalated",
            ApprovalStage::Completed => "completed",
        }
    }

    /// Roles allowed to review at this stage.
    pub fn reviewer_roles(&self) -> &'static [Role] {
        match self {
            ApprovalStage::Supervisor => &[Role::Supervisor, Role::BusinessAdmin],
            ApprovalStage::BusinessAdmin | ApprovalStage::Escalated => &[Role::BusinessAdmin],
            ApprovalStage::Completed => &[],
        }
    }
}

impl std::fmt::Display for ApprovalStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a reviewer decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Approved at the reviewer's stage.
    Approved,
    /// Rejected outright.
    Rejected,
    /// Escalated to business-admin review.
    Escalated,
    /// Sent back to the requester for more information.
    InfoRequested,
}

/// One immutable entry in a request's review history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalReview {
    /// Unique identifier for the review.
    pub id: Uuid,
    /// The reviewer.
    pub reviewer_id: String,
    /// The reviewer's role at the time of review.
    pub reviewer_role: Role,
    /// The stage the request was at when reviewed.
    pub stage: ApprovalStage,
    /// The decision taken.
    pub decision: ReviewDecision,
    /// Reviewer comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// When the review happened.
    pub timestamp: DateTime<Utc>,
}

/// Append-only review history.
///
/// There is no way to edit or remove an entry: [`ReviewLog::appended`]
/// returns a new log with one more record and leaves the original intact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewLog(Vec<ApprovalReview>);

impl ReviewLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this log with `review` added at the end.
    pub fn appended(&self, review: ApprovalReview) -> Self {
        let mut entries = self.0.clone();
        entries.push(review);
        Self(entries)
    }

    /// Iterates reviews oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ApprovalReview> {
        self.0.iter()
    }

    /// The most recent review.
    pub fn last(&self) -> Option<&ApprovalReview> {
        self.0.last()
    }

    /// Number of reviews.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when nobody has reviewed the request yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which review stages a request type must pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Whether a supervisor reviews first.
    pub requires_supervisor_approval: bool,
    /// Whether a business admin must also approve.
    pub requires_business_admin_approval: bool,
}

impl FlowConfig {
    /// Derives the flow for a request type.
    ///
    /// Requests that commit budget or remove an employee for days (vacation,
    /// personal leave, absence, overtime) need business-admin sign-off; the
    /// rest are settled by the supervisor.
    pub fn for_type(request_type: RequestType) -> Self {
        let requires_business_admin_approval = matches!(
            request_type,
            RequestType::Vacation
                | RequestType::PersonalLeave
                | RequestType::Absence
                | RequestType::Overtime
        );
        Self {
            requires_supervisor_approval: true,
            requires_business_admin_approval,
        }
    }
}

/// Review state embedded in every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalFlow {
    /// Where the request currently sits.
    pub current_stage: ApprovalStage,
    /// Whether a supervisor escalated the request.
    pub is_escalated: bool,
    /// Every review so far, oldest first.
    pub approval_history: ReviewLog,
    /// Required stages.
    pub flow_config: FlowConfig,
}

impl ApprovalFlow {
    /// A fresh flow at the supervisor stage.
    pub fn new(request_type: RequestType) -> Self {
        Self {
            current_stage: ApprovalStage::Supervisor,
            is_escalated: false,
            approval_history: ReviewLog::new(),
            flow_config: FlowConfig::for_type(request_type),
        }
    }
}

/// A leave, shift-change, or other request raised by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The requesting employee.
    pub employee_id: String,
    /// The requesting employee's display name, used for sorting and search.
    pub employee_name: String,
    /// The employee's location.
    pub location_id: String,
    /// What is being requested.
    #[serde(rename = "type")]
    pub request_type: RequestType,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Urgency.
    pub priority: RequestPriority,
    /// When the request was created.
    pub submitted_date: DateTime<Utc>,
    /// Single affected day (shift changes, early leave, late arrival).
    #[serde(default)]
    pub requested_date: Option<NaiveDate>,
    /// First day of a date range.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of a date range (inclusive).
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Short reason.
    pub reason: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Review state.
    pub approval_flow: ApprovalFlow,
}

impl TeamRequest {
    /// Creates a draft request with a fresh approval flow.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        location_id: impl Into<String>,
        request_type: RequestType,
        priority: RequestPriority,
        reason: impl Into<String>,
        submitted_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            location_id: location_id.into(),
            request_type,
            status: RequestStatus::Draft,
            priority,
            submitted_date,
            requested_date: None,
            start_date: None,
            end_date: None,
            reason: reason.into(),
            description: String::new(),
            approval_flow: ApprovalFlow::new(request_type),
        }
    }

    /// Sets an inclusive date range.
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Sets the single affected day.
    pub fn with_requested_date(mut self, date: NaiveDate) -> Self {
        self.requested_date = Some(date);
        self
    }

    /// The current review stage.
    pub fn stage(&self) -> ApprovalStage {
        self.approval_flow.current_stage
    }

    /// Returns true when `actor_id` raised this request.
    pub fn is_owned_by(&self, actor_id: &str) -> bool {
        self.employee_id == actor_id
    }

    /// The date the request is "about": range start, else the single
    /// requested day, else the submission day.
    pub fn effective_date(&self) -> NaiveDate {
        self.start_date
            .or(self.requested_date)
            .unwrap_or_else(|| self.submitted_date.date_naive())
    }

    /// Returns true when `date` falls inside the request's affected days.
    pub fn covers(&self, date: NaiveDate) -> bool {
        match (self.start_date, self.end_date, self.requested_date) {
            (Some(start), Some(end), _) => date >= start && date <= end,
            (Some(start), None, _) => date == start,
            (None, _, Some(day)) => date == day,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submitted() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn review(decision: ReviewDecision) -> ApprovalReview {
        ApprovalReview {
            id: Uuid::new_v4(),
            reviewer_id: "sup_1".to_string(),
            reviewer_role: Role::Supervisor,
            stage: ApprovalStage::Supervisor,
            decision,
            comments: None,
            timestamp: submitted(),
        }
    }

    #[test]
    fn test_new_request_starts_as_draft_at_supervisor_stage() {
        let request = TeamRequest::new(
            "req_1",
            "emp_1",
            "Ana Gómez",
            "loc_centro",
            RequestType::Vacation,
            RequestPriority::Low,
            "Vacaciones",
            submitted(),
        );
        assert_eq!(request.status, RequestStatus::Draft);
        assert_eq!(request.stage(), ApprovalStage::Supervisor);
        assert!(!request.approval_flow.is_escalated);
        assert!(request.approval_flow.approval_history.is_empty());
        assert!(request.approval_flow.flow_config.requires_business_admin_approval);
    }

    #[test]
    fn test_flow_config_per_type() {
        let needs_admin: Vec<RequestType> = RequestType::ALL
            .into_iter()
            .filter(|t| FlowConfig::for_type(*t).requires_business_admin_approval)
            .collect();
        assert_eq!(
            needs_admin,
            vec![
                RequestType::Vacation,
                RequestType::PersonalLeave,
                RequestType::Absence,
                RequestType::Overtime
            ]
        );
        assert!(
            RequestType::ALL
                .into_iter()
                .all(|t| FlowConfig::for_type(t).requires_supervisor_approval)
        );
    }

    #[test]
    fn test_priority_rank_and_escalation() {
        assert_eq!(RequestPriority::Low.rank(), 1);
        assert_eq!(RequestPriority::Emergency.rank(), 5);
        assert_eq!(RequestPriority::Low.escalated(), RequestPriority::Medium);
        assert_eq!(RequestPriority::Medium.escalated(), RequestPriority::High);
        assert_eq!(RequestPriority::High.escalated(), RequestPriority::High);
        assert_eq!(RequestPriority::Urgent.escalated(), RequestPriority::Urgent);
        assert_eq!(RequestPriority::Emergency.escalated(), RequestPriority::Emergency);
    }

    #[test]
    fn test_review_log_appended_leaves_original_untouched() {
        let log = ReviewLog::new();
        let first = log.appended(review(ReviewDecision::Approved));
        let second = first.appended(review(ReviewDecision::Rejected));

        assert!(log.is_empty());
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(second.last().unwrap().decision, ReviewDecision::Rejected);
        assert_eq!(
            second.iter().next().unwrap().decision,
            ReviewDecision::Approved
        );
    }

    #[test]
    fn test_review_log_serializes_as_plain_list() {
        let log = ReviewLog::new().appended(review(ReviewDecision::Escalated));
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["decision"], "escalated");
    }

    #[test]
    fn test_stage_reviewer_roles() {
        assert_eq!(
            ApprovalStage::Supervisor.reviewer_roles(),
            &[Role::Supervisor, Role::BusinessAdmin]
        );
        assert_eq!(ApprovalStage::Escalated.reviewer_roles(), &[Role::BusinessAdmin]);
        assert!(ApprovalStage::Completed.reviewer_roles().is_empty());
    }

    #[test]
    fn test_covers_date_range_inclusive() {
        let request = TeamRequest::new(
            "req_1",
            "emp_1",
            "Ana",
            "loc_centro",
            RequestType::Vacation,
            RequestPriority::Low,
            "Vacaciones",
            submitted(),
        )
        .with_dates(date("2024-01-15"), date("2024-01-17"));

        assert!(request.covers(date("2024-01-15")));
        assert!(request.covers(date("2024-01-17")));
        assert!(!request.covers(date("2024-01-18")));
        assert_eq!(request.effective_date(), date("2024-01-15"));
    }

    #[test]
    fn test_effective_date_falls_back_to_submission() {
        let request = TeamRequest::new(
            "req_2",
            "emp_1",
            "Ana",
            "loc_centro",
            RequestType::ShiftChange,
            RequestPriority::Medium,
            "Cambio",
            submitted(),
        );
        assert_eq!(request.effective_date(), date("2024-01-10"));
        assert!(!request.covers(date("2024-01-10")));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::UnderReview).unwrap(),
            "\"under_review\""
        );
        assert_eq!(RequestStatus::UnderReview.to_string(), "under_review");
        assert!(RequestStatus::Pending.is_reviewable());
        assert!(!RequestStatus::Draft.is_reviewable());
        assert!(RequestStatus::Cancelled.is_terminal());
    }
}
