//! In-memory filtering and sorting of requests and shifts.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    RequestPriority, RequestStatus, RequestType, ScheduleShift, ShiftStatus, ShiftType,
    TeamRequest,
};

/// Field to sort requests by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Submission timestamp.
    #[default]
    Date,
    /// Employee display name, case-insensitive.
    EmployeeName,
    /// Fixed priority rank.
    Priority,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

/// How to order query results. Defaults to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// Sort key.
    #[serde(default)]
    pub field: SortField,
    /// Direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    /// Shorthand constructor.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    fn compare(&self, a: &TeamRequest, b: &TeamRequest) -> Ordering {
        let primary = match self.field {
            SortField::Date => a.submitted_date.cmp(&b.submitted_date),
            SortField::EmployeeName => a
                .employee_name
                .to_lowercase()
                .cmp(&b.employee_name.to_lowercase()),
            SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        };
        let primary = match self.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Request filter. Empty lists and `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestFilter {
    /// Allowed statuses.
    pub statuses: Vec<RequestStatus>,
    /// Allowed types.
    pub types: Vec<RequestType>,
    /// Allowed priorities.
    pub priorities: Vec<RequestPriority>,
    /// Allowed locations.
    pub location_ids: Vec<String>,
    /// Allowed requesters.
    pub employee_ids: Vec<String>,
    /// Only escalated requests.
    pub escalated_only: bool,
    /// Earliest affected day, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Latest affected day, inclusive.
    pub date_to: Option<NaiveDate>,
    /// Case-insensitive text matched against id, name, reason, and description.
    pub search: Option<String>,
    /// Result ordering.
    pub sort: SortSpec,
}

fn allowed<T: PartialEq>(list: &[T], value: &T) -> bool {
    list.is_empty() || list.contains(value)
}

/// First and last day a request affects: its date range, else its single
/// requested day, else its submission day.
fn affected_span(request: &TeamRequest) -> (NaiveDate, NaiveDate) {
    let first = request.effective_date();
    let last = request.end_date.unwrap_or(first).max(first);
    (first, last)
}

impl RequestFilter {
    /// Returns true when the request passes every criterion.
    pub fn matches(&self, request: &TeamRequest) -> bool {
        if !allowed(&self.statuses, &request.status)
            || !allowed(&self.types, &request.request_type)
            || !allowed(&self.priorities, &request.priority)
            || !allowed(&self.location_ids, &request.location_id)
            || !allowed(&self.employee_ids, &request.employee_id)
        {
            return false;
        }
        if self.escalated_only && !request.approval_flow.is_escalated {
            return false;
        }

        let (first, last) = affected_span(request);
        if self.date_from.is_some_and(|from| last < from)
            || self.date_to.is_some_and(|to| first > to)
        {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                [
                    &request.id,
                    &request.employee_name,
                    &request.reason,
                    &request.description,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }
}

/// Per-dimension counts for building filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCounts {
    /// Requests in the input collection.
    pub total: usize,
    /// Count per status.
    pub by_status: BTreeMap<RequestStatus, usize>,
    /// Count per type.
    pub by_type: BTreeMap<RequestType, usize>,
    /// Count per priority.
    pub by_priority: BTreeMap<RequestPriority, usize>,
    /// Count per location.
    pub by_location: BTreeMap<String, usize>,
}

impl RequestCounts {
    /// Counts a collection.
    pub fn of(requests: &[TeamRequest]) -> Self {
        let mut counts = Self {
            total: requests.len(),
            ..Self::default()
        };
        for request in requests {
            *counts.by_status.entry(request.status).or_default() += 1;
            *counts.by_type.entry(request.request_type).or_default() += 1;
            *counts.by_priority.entry(request.priority).or_default() += 1;
            *counts
                .by_location
                .entry(request.location_id.clone())
                .or_default() += 1;
        }
        counts
    }
}

/// Filtered, sorted requests plus counts over the unfiltered input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestQueryResult {
    /// Matching requests in sort order.
    pub items: Vec<TeamRequest>,
    /// Number of matching requests.
    pub matched: usize,
    /// Counts over the whole input.
    pub counts: RequestCounts,
}

/// Applies a filter and its sort to a request collection.
///
/// # Example
///
/// ```
/// use schedule_engine::query::{RequestFilter, filter_requests};
///
/// let result = filter_requests(&[], &RequestFilter::default());
/// assert_eq!(result.matched, 0);
/// ```
pub fn filter_requests(requests: &[TeamRequest], filter: &RequestFilter) -> RequestQueryResult {
    let mut items: Vec<TeamRequest> = requests
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();
    items.sort_by(|a, b| filter.sort.compare(a, b));

    RequestQueryResult {
        matched: items.len(),
        items,
        counts: RequestCounts::of(requests),
    }
}

/// Shift filter. Empty lists and `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftFilter {
    /// Allowed employees.
    pub employee_ids: Vec<String>,
    /// Allowed locations.
    pub location_ids: Vec<String>,
    /// Allowed shift types.
    pub types: Vec<ShiftType>,
    /// Allowed statuses.
    pub statuses: Vec<ShiftStatus>,
    /// Earliest date, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub date_to: Option<NaiveDate>,
}

impl ShiftFilter {
    /// Returns true when the shift passes every criterion.
    pub fn matches(&self, shift: &ScheduleShift) -> bool {
        allowed(&self.employee_ids, &shift.employee_id)
            && allowed(&self.location_ids, &shift.location_id)
            && allowed(&self.types, &shift.shift_type)
            && allowed(&self.statuses, &shift.status)
            && self.date_from.is_none_or(|from| shift.date >= from)
            && self.date_to.is_none_or(|to| shift.date <= to)
    }
}

/// Filters shifts and orders them by date, start time, then id.
pub fn filter_shifts(shifts: &[ScheduleShift], filter: &ShiftFilter) -> Vec<ScheduleShift> {
    let mut items: Vec<ScheduleShift> = shifts
        .iter()
        .filter(|s| filter.matches(s))
        .cloned()
        .collect();
    items.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.start_time.cmp(&b.start_time))
            .then_with(|| a.id.cmp(&b.id))
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_clock_time;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn request(
        id: &str,
        name: &str,
        priority: RequestPriority,
        status: RequestStatus,
        submitted_day: u32,
    ) -> TeamRequest {
        let mut request = TeamRequest::new(
            id,
            format!("emp_{}", id),
            name,
            "loc_centro",
            RequestType::Vacation,
            priority,
            "Vacaciones en familia",
            Utc.with_ymd_and_hms(2024, 1, submitted_day, 9, 0, 0).unwrap(),
        );
        request.status = status;
        request
    }

    fn sample() -> Vec<TeamRequest> {
        vec![
            request("r1", "Carlos", RequestPriority::Low, RequestStatus::Pending, 3),
            request("r2", "ana", RequestPriority::Emergency, RequestStatus::Pending, 1),
            request("r3", "Beatriz", RequestPriority::High, RequestStatus::Approved, 2),
        ]
    }

    #[test]
    fn test_empty_filter_matches_all_newest_first() {
        let result = filter_requests(&sample(), &RequestFilter::default());
        let ids: Vec<&str> = result.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3", "r2"]);
        assert_eq!(result.matched, 3);
    }

    #[test]
    fn test_status_filter_and_counts_over_input() {
        let filter = RequestFilter {
            statuses: vec![RequestStatus::Pending],
            ..RequestFilter::default()
        };
        let result = filter_requests(&sample(), &filter);
        assert_eq!(result.matched, 2);
        assert_eq!(result.counts.total, 3);
        assert_eq!(result.counts.by_status[&RequestStatus::Approved], 1);
        assert_eq!(result.counts.by_location["loc_centro"], 3);
    }

    #[test]
    fn test_sort_by_priority_uses_rank() {
        let filter = RequestFilter {
            sort: SortSpec::new(SortField::Priority, SortDirection::Desc),
            ..RequestFilter::default()
        };
        let ids: Vec<String> = filter_requests(&sample(), &filter)
            .items
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["r2", "r3", "r1"]);
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let filter = RequestFilter {
            sort: SortSpec::new(SortField::EmployeeName, SortDirection::Asc),
            ..RequestFilter::default()
        };
        let names: Vec<String> = filter_requests(&sample(), &filter)
            .items
            .into_iter()
            .map(|r| r.employee_name)
            .collect();
        assert_eq!(names, vec!["ana", "Beatriz", "Carlos"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = RequestFilter {
            search: Some("  BEATR ".to_string()),
            ..RequestFilter::default()
        };
        assert_eq!(filter_requests(&sample(), &filter).matched, 1);

        let blank = RequestFilter {
            search: Some("   ".to_string()),
            ..RequestFilter::default()
        };
        assert_eq!(filter_requests(&sample(), &blank).matched, 3);
    }

    #[test]
    fn test_date_range_intersects_affected_days() {
        let ranged = request("r9", "Diana", RequestPriority::Low, RequestStatus::Pending, 1)
            .with_dates(day(10), day(14));
        let in_range = RequestFilter {
            date_from: Some(day(14)),
            date_to: Some(day(20)),
            ..RequestFilter::default()
        };
        let out_of_range = RequestFilter {
            date_from: Some(day(15)),
            ..RequestFilter::default()
        };
        assert!(in_range.matches(&ranged));
        assert!(!out_of_range.matches(&ranged));
    }

    #[test]
    fn test_escalated_only() {
        let mut escalated = request("r5", "Eva", RequestPriority::Medium, RequestStatus::UnderReview, 4);
        escalated.approval_flow.is_escalated = true;
        let filter = RequestFilter {
            escalated_only: true,
            ..RequestFilter::default()
        };
        let mut all = sample();
        all.push(escalated);
        let result = filter_requests(&all, &filter);
        assert_eq!(result.matched, 1);
        assert_eq!(result.items[0].id, "r5");
    }

    #[test]
    fn test_filter_deserializes_with_defaults() {
        let filter: RequestFilter =
            serde_json::from_str(r#"{"priorities": ["urgent"], "sort": {"field": "priority"}}"#).unwrap();
        assert_eq!(filter.priorities, vec![RequestPriority::Urgent]);
        assert_eq!(filter.sort.direction, SortDirection::Desc);
        assert!(filter.statuses.is_empty());
    }

    fn shift(id: &str, d: u32, start: &str, shift_type: ShiftType) -> ScheduleShift {
        ScheduleShift {
            id: id.to_string(),
            employee_id: "emp_1".to_string(),
            location_id: "loc_centro".to_string(),
            date: day(d),
            start_time: parse_clock_time(start).unwrap(),
            end_time: parse_clock_time("23:00").unwrap(),
            shift_type,
            cost: Decimal::ZERO,
            status: ShiftStatus::Draft,
            notes: None,
        }
    }

    #[test]
    fn test_filter_shifts_sorted_by_date_then_start() {
        let shifts = vec![
            shift("c", 16, "06:00", ShiftType::Regular),
            shift("b", 15, "14:00", ShiftType::Night),
            shift("a", 15, "06:00", ShiftType::Regular),
            shift("z", 20, "06:00", ShiftType::Regular),
        ];
        let filter = ShiftFilter {
            date_to: Some(day(16)),
            ..ShiftFilter::default()
        };
        let ids: Vec<String> = filter_shifts(&shifts, &filter).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let night = ShiftFilter {
            types: vec![ShiftType::Night],
            ..ShiftFilter::default()
        };
        assert_eq!(filter_shifts(&shifts, &night).len(), 1);
    }
}
