//! Minimum headcount per date and location.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::models::{FindingKind, FixAction, ScheduleShift, ValidationFinding};

/// Rule identifier for staffing.
pub const STAFFING_RULE: &str = "minimum_staffing";

/// Warns for every (date, location) with fewer distinct employees than
/// `min_staff`. Only dates and locations that have shifts are checked.
pub fn check_staffing(shifts: &[ScheduleShift], min_staff: u32) -> Vec<ValidationFinding> {
    let mut coverage: BTreeMap<(NaiveDate, &str), BTreeSet<&str>> = BTreeMap::new();
    for shift in shifts {
        coverage
            .entry((shift.date, shift.location_id.as_str()))
            .or_default()
            .insert(shift.employee_id.as_str());
    }

    coverage
        .into_iter()
        .filter_map(|((date, location_id), staff)| {
            let scheduled = u32::try_from(staff.len()).unwrap_or(u32::MAX);
            (scheduled < min_staff).then(|| {
                ValidationFinding::warning(
                    STAFFING_RULE,
                    FindingKind::Understaffed {
                        date,
                        location_id: location_id.to_string(),
                        scheduled,
                        required: min_staff,
                    },
                    format!(
                        "Only {} of {} required staff scheduled at {} on {}",
                        scheduled, min_staff, location_id, date
                    ),
                )
                .with_fix(
                    FixAction::AddStaff,
                    format!("Schedule {} more", min_staff - scheduled),
                )
            })
        })
        .collect()
}
