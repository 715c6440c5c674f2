//! Named filter presets.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{RequestPriority, RequestStatus};
use crate::validation::week_start;

use super::filter::{RequestFilter, SortDirection, SortField, SortSpec};

const OPEN_STATUSES: [RequestStatus; 2] = [RequestStatus::Pending, RequestStatus::UnderReview];

/// A named, ready-made request filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPreset {
    /// Open requests, oldest first.
    PendingApproval,
    /// Open urgent and emergency requests, most urgent first.
    UrgentRequests,
    /// Open escalated requests, most urgent first.
    EscalatedRequests,
    /// Requests affecting the current ISO week.
    ThisWeek,
    /// Requests affecting today through the next 30 days.
    NextThirtyDays,
}

impl FilterPreset {
    /// Every preset.
    pub const ALL: [FilterPreset; 5] = [
        FilterPreset::PendingApproval,
        FilterPreset::UrgentRequests,
        FilterPreset::EscalatedRequests,
        FilterPreset::ThisWeek,
        FilterPreset::NextThirtyDays,
    ];

    /// Wire name of the preset.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterPreset::PendingApproval => "pending_approval",
            FilterPreset::UrgentRequests => "urgent_requests",
            FilterPreset::EscalatedRequests => "escalated_requests",
            FilterPreset::ThisWeek => "this_week",
            FilterPreset::NextThirtyDays => "next_thirty_days",
        }
    }

    /// Parses a wire name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    /// Expands the preset into a concrete filter relative to `today`.
    ///
    /// # Example
    ///
    /// ```
    /// use schedule_engine::query::FilterPreset;
    /// use chrono::NaiveDate;
    ///
    /// let wednesday = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
    /// let filter = FilterPreset::ThisWeek.to_filter(wednesday);
    /// assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2024, 1, 15));
    /// assert_eq!(filter.date_to, NaiveDate::from_ymd_opt(2024, 1, 21));
    /// ```
    pub fn to_filter(&self, today: NaiveDate) -> RequestFilter {
        match self {
            FilterPreset::PendingApproval => RequestFilter {
                statuses: OPEN_STATUSES.to_vec(),
                sort: SortSpec::new(SortField::Date, SortDirection::Asc),
                ..RequestFilter::default()
            },
            FilterPreset::UrgentRequests => RequestFilter {
                statuses: OPEN_STATUSES.to_vec(),
                priorities: vec![RequestPriority::Urgent, RequestPriority::Emergency],
                sort: SortSpec::new(SortField::Priority, SortDirection::Desc),
                ..RequestFilter::default()
            },
            FilterPreset::EscalatedRequests => RequestFilter {
                statuses: OPEN_STATUSES.to_vec(),
                escalated_only: true,
                sort: SortSpec::new(SortField::Priority, SortDirection::Desc),
                ..RequestFilter::default()
            },
            FilterPreset::ThisWeek => {
                let monday = week_start(today);
                RequestFilter {
                    date_from: Some(monday),
                    date_to: Some(monday + Duration::days(6)),
                    ..RequestFilter::default()
                }
            }
            FilterPreset::NextThirtyDays => RequestFilter {
                date_from: Some(today),
                date_to: Some(today + Duration::days(30)),
                sort: SortSpec::new(SortField::Date, SortDirection::Asc),
                ..RequestFilter::default()
            },
        }
    }
}
