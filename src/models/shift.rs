//! Shift model and related types.
//!
//! This module defines [`ScheduleShift`] (a parsed, schedulable shift),
//! [`ShiftDraft`] (raw create/update input from the UI), and [`RestDay`].

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Surcharges;
use crate::error::{EngineError, EngineResult};

use super::clock::{self, hhmm};

/// Placeholder id used for drafts that have not been saved yet.
pub const UNSAVED_SHIFT_ID: &str = "new";

/// The kind of shift, which determines its surcharge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// Ordinary daytime work.
    #[default]
    Regular,
    /// Work beyond the ordinary day.
    Overtime,
    /// Night work.
    Night,
    /// Sunday or public-holiday work.
    Holiday,
}

/// Publication state of a shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Visible to schedulers only.
    #[default]
    Draft,
    /// Visible to the employee.
    Published,
}

/// A scheduled work interval for one employee on one date.
///
/// Times are wall-clock `HH:mm`. When `end_time <= start_time` the shift
/// crosses midnight and ends on the following day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleShift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The employee working the shift.
    pub employee_id: String,
    /// The location the shift belongs to.
    pub location_id: String,
    /// The calendar day the shift starts on.
    pub date: NaiveDate,
    /// Wall-clock start.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Wall-clock end.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// The kind of shift.
    #[serde(rename = "type", default)]
    pub shift_type: ShiftType,
    /// Labor cost in currency units.
    pub cost: Decimal,
    /// Publication state.
    #[serde(default)]
    pub status: ShiftStatus,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ScheduleShift {
    /// Returns true when the shift ends on the day after it starts.
    pub fn crosses_midnight(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Length of the shift in minutes. Always positive.
    pub fn duration_minutes(&self) -> i64 {
        clock::shift_duration_minutes(self.start_time, self.end_time)
    }

    /// Length of the shift in hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_engine::models::{ScheduleShift, ShiftStatus, ShiftType, parse_clock_time};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let shift = ScheduleShift {
    ///     id: "s1".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     location_id: "loc_centro".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    ///     start_time: parse_clock_time("22:00").unwrap(),
    ///     end_time: parse_clock_time("06:00").unwrap(),
    ///     shift_type: ShiftType::Night,
    ///     cost: Decimal::ZERO,
    ///     status: ShiftStatus::Draft,
    ///     notes: None,
    /// };
    /// assert!(shift.crosses_midnight());
    /// assert_eq!(shift.duration_hours(), Decimal::new(8, 0));
    /// ```
    pub fn duration_hours(&self) -> Decimal {
        Decimal::new(self.duration_minutes(), 0) / Decimal::new(60, 0)
    }

    /// Absolute start of the shift.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// Absolute end of the shift, on the next day when crossing midnight.
    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at() + Duration::minutes(self.duration_minutes())
    }

    /// Day-of-week index with 0 = Sunday, matching employee availability.
    pub fn day_index(&self) -> u32 {
        self.date.weekday().num_days_from_sunday()
    }
}

/// Estimates the cost of a shift from its hours, rate, and type surcharge.
///
/// Rounded to whole currency units.
pub fn estimate_shift_cost(
    hours: Decimal,
    hourly_rate: Decimal,
    shift_type: ShiftType,
    surcharges: &Surcharges,
) -> Decimal {
    (hours * hourly_rate * surcharges.multiplier(shift_type)).round_dp(0)
}

/// Raw shift input from a create/update form.
///
/// Times are kept as the strings the user typed so that malformed input can
/// be reported as a validation finding rather than a deserialization error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDraft {
    /// Existing shift id on update; `None` when creating.
    #[serde(default)]
    pub id: Option<String>,
    /// The employee to schedule.
    pub employee_id: String,
    /// The location of the shift.
    pub location_id: String,
    /// The calendar day the shift starts on.
    pub date: NaiveDate,
    /// Raw start time, expected `HH:mm`.
    pub start_time: String,
    /// Raw end time, expected `HH:mm`.
    pub end_time: String,
    /// The kind of shift.
    #[serde(rename = "type", default)]
    pub shift_type: ShiftType,
    /// Cost; estimated from the employee's rate when absent.
    #[serde(default)]
    pub cost: Option<Decimal>,
    /// Publication state.
    #[serde(default)]
    pub status: ShiftStatus,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl ShiftDraft {
    /// The id this draft will be validated under.
    pub fn effective_id(&self) -> &str {
        self.id.as_deref().unwrap_or(UNSAVED_SHIFT_ID)
    }

    /// Parses the draft into a [`ScheduleShift`].
    ///
    /// When the draft has no cost and `hourly_rate` is known, the cost is
    /// estimated with [`estimate_shift_cost`]; otherwise it defaults to zero.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShift`] when either time is not `HH:mm`.
    pub fn to_shift(
        &self,
        hourly_rate: Option<Decimal>,
        surcharges: &Surcharges,
    ) -> EngineResult<ScheduleShift> {
        let start_time = self.parse_time("start", &self.start_time)?;
        let end_time = self.parse_time("end", &self.end_time)?;

        let mut shift = ScheduleShift {
            id: self.effective_id().to_string(),
            employee_id: self.employee_id.clone(),
            location_id: self.location_id.clone(),
            date: self.date,
            start_time,
            end_time,
            shift_type: self.shift_type,
            cost: Decimal::ZERO,
            status: self.status,
            notes: self.notes.clone(),
        };

        shift.cost = match (self.cost, hourly_rate) {
            (Some(cost), _) => cost,
            (None, Some(rate)) => {
                estimate_shift_cost(shift.duration_hours(), rate, shift.shift_type, surcharges)
            }
            (None, None) => Decimal::ZERO,
        };

        Ok(shift)
    }

    fn parse_time(&self, which: &str, raw: &str) -> EngineResult<NaiveTime> {
        clock::parse_clock_time(raw).ok_or_else(|| EngineError::InvalidShift {
            shift_id: self.effective_id().to_string(),
            message: format!("{} time '{}' is not a 24-hour HH:mm time", which, raw),
        })
    }
}

/// A calendar day on which an employee must not be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RestDay {
    /// The employee resting.
    pub employee_id: String,
    /// The rest date.
    pub date: NaiveDate,
}
