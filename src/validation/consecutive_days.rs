//! Consecutive work-day runs.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};

use crate::config::LaborRules;
use crate::models::{FindingKind, FixAction, ScheduleShift, ValidationFinding};

/// Rule identifier for consecutive work days.
pub const CONSECUTIVE_DAYS_RULE: &str = "consecutive_work_days";

/// Splits sorted distinct dates into runs of consecutive calendar days,
/// returned as (first day, length).
pub fn consecutive_runs(dates: &BTreeSet<NaiveDate>) -> Vec<(NaiveDate, u32)> {
    let mut runs: Vec<(NaiveDate, u32)> = Vec::new();
    let mut previous: Option<NaiveDate> = None;
    for &date in dates {
        match (previous, runs.last_mut()) {
            (Some(prev), Some(run)) if date - prev == Duration::days(1) => run.1 += 1,
            _ => runs.push((date, 1)),
        }
        previous = Some(date);
    }
    runs
}

/// Warns for each run longer than the configured maximum.
pub fn check_consecutive_days(
    shifts: &[ScheduleShift],
    rules: &LaborRules,
) -> Vec<ValidationFinding> {
    let mut dates: BTreeMap<&str, BTreeSet<NaiveDate>> = BTreeMap::new();
    for shift in shifts {
        dates
            .entry(shift.employee_id.as_str())
            .or_default()
            .insert(shift.date);
    }

    let max_days = rules.max_consecutive_work_days;
    dates
        .into_iter()
        .flat_map(|(employee_id, days)| {
            consecutive_runs(&days)
                .into_iter()
                .filter(move |&(_, length)| length > max_days)
                .map(move |(first_day, length)| {
                    ValidationFinding::warning(
                        CONSECUTIVE_DAYS_RULE,
                        FindingKind::ConsecutiveDays {
                            employee_id: employee_id.to_string(),
                            first_day,
                            days: length,
                            max_days,
                        },
                        format!(
                            "{} consecutive work days starting {}; maximum is {}",
                            length, first_day, max_days
                        ),
                    )
                    .with_fix(FixAction::AssignRestDay, "Break the run with a day off")
                })
        })
        .collect()
}
