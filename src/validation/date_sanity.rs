//! Past-date check.

use chrono::NaiveDate;

use crate::models::{FindingKind, ScheduleShift, ValidationFinding};

/// Rule identifier for shifts dated in the past.
pub const PAST_DATE_RULE: &str = "past_date";

/// Warns when a shift is dated before `today`. Never blocking.
pub fn check_shift_date(shift: &ScheduleShift, today: NaiveDate) -> Option<ValidationFinding> {
    (shift.date < today).then(|| {
        ValidationFinding::warning(
            PAST_DATE_RULE,
            FindingKind::PastDate {
                shift_id: shift.id.clone(),
                date: shift.date,
            },
            format!("Shift date {} is in the past", shift.date),
        )
    })
}
