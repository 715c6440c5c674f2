//! Request body types for the scheduling API.
//!
//! Every endpoint is stateless: callers send the hydrated entities and the
//! acting user in the body.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Actor, Employee, ScheduleShift, ShiftDraft, TeamRequest};
use crate::query::{FilterPreset, RequestFilter};

/// Body for `POST /shifts/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftValidationRequest {
    /// The shift being created or edited.
    pub draft: ShiftDraft,
    /// The roster.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Shifts already in the schedule.
    #[serde(default)]
    pub existing_shifts: Vec<ScheduleShift>,
    /// Reference date for the past-date check; the server date when absent.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Body for `POST /schedules/metrics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsRequest {
    /// Scheduled shifts.
    pub shifts: Vec<ScheduleShift>,
    /// The roster.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Weekly budget; the configured budget applies when absent.
    #[serde(default)]
    pub weekly_budget: Option<Decimal>,
}

/// Body for single-request review endpoints.
///
/// For `/requests/escalate` the comments are the escalation reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// The request being reviewed.
    pub request: TeamRequest,
    /// The acting user.
    pub actor: Actor,
    /// Reviewer comments.
    #[serde(default)]
    pub comments: Option<String>,
}

/// Body for bulk review endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkReviewRequest {
    /// The snapshot the ids are looked up in.
    pub requests: Vec<TeamRequest>,
    /// Ids to process.
    pub request_ids: Vec<String>,
    /// The acting user.
    pub actor: Actor,
    /// Comments applied to every id.
    #[serde(default)]
    pub comments: Option<String>,
}

/// Body for `POST /requests/query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The requests to filter.
    pub requests: Vec<TeamRequest>,
    /// When present, only requests this actor may view are considered.
    #[serde(default)]
    pub actor: Option<Actor>,
    /// Explicit filter.
    #[serde(default)]
    pub filter: Option<RequestFilter>,
    /// Named preset; takes precedence over `filter`.
    #[serde(default)]
    pub preset: Option<FilterPreset>,
    /// Reference date for date-relative presets; the server date when absent.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// Caller's version of the request snapshot. Results are cached only
    /// when this is set, keyed by it.
    #[serde(default)]
    pub snapshot_version: Option<String>,
}

impl QueryRequest {
    /// The filter to apply: the preset expanded for `today`, else the
    /// explicit filter, else match-all.
    pub fn resolved_filter(&self, today: NaiveDate) -> RequestFilter {
        match self.preset {
            Some(preset) => preset.to_filter(today),
            None => self.filter.clone().unwrap_or_default(),
        }
    }
}
