//! Employee model and weekly availability.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clock::hhmm_option;

/// An employee's declared availability for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAvailability {
    /// Day-of-week index, 0 = Sunday through 6 = Saturday.
    pub day: u32,
    /// Whether the employee can work that day at all.
    pub available: bool,
    /// Earliest start, if restricted.
    #[serde(default, with = "hhmm_option", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    /// Latest end, if restricted.
    #[serde(default, with = "hhmm_option", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
}

/// An employee on the business roster.
///
/// Shifts, rest days, and requests refer to employees by id; they never own
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Job position (e.g. "Cajero", "Mesero").
    pub position: String,
    /// Home location.
    pub location_id: String,
    /// Personal weekly ceiling; the configured default applies when absent.
    #[serde(default)]
    pub max_weekly_hours: Option<Decimal>,
    /// Ordinary hourly rate, used to estimate shift cost.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Weekly availability, one entry per weekday.
    #[serde(default)]
    pub availability: Vec<DayAvailability>,
}

impl Employee {
    /// Returns the availability entry for a day index (0 = Sunday).
    pub fn availability_for(&self, day: u32) -> Option<&DayAvailability> {
        self.availability.iter().find(|a| a.day == day)
    }

    /// Returns the employee's weekly ceiling, falling back to `default`.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ana Gómez".to_string(),
    ///     position: "Cajera".to_string(),
    ///     location_id: "loc_centro".to_string(),
    ///     max_weekly_hours: None,
    ///     hourly_rate: None,
    ///     availability: vec![],
    /// };
    /// assert_eq!(employee.weekly_hours_limit(Decimal::new(42, 0)), Decimal::new(42, 0));
    /// ```
    pub fn weekly_hours_limit(&self, default: Decimal) -> Decimal {
        self.max_weekly_hours.unwrap_or(default)
    }
}
