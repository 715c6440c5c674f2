//! 24-hour `HH:mm` format check for shift drafts.

use crate::models::{FindingKind, FixAction, ShiftDraft, ValidationFinding, parse_clock_time};

/// Rule identifier for malformed times.
pub const TIME_FORMAT_RULE: &str = "time_format";

/// Reports one error per malformed time field of a draft.
///
/// # Example
///
/// ```
/// use schedule_engine::models::{ShiftDraft, ShiftStatus, ShiftType};
/// use schedule_engine::validation::check_time_format;
/// use chrono::NaiveDate;
///
/// let draft = ShiftDraft {
///     id: None,
///     employee_id: "emp_001".to_string(),
///     location_id: "loc_centro".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     start_time: "6:00".to_string(),
///     end_time: "14:00".to_string(),
///     shift_type: ShiftType::Regular,
///     cost: None,
///     status: ShiftStatus::Draft,
///     notes: None,
/// };
/// let findings = check_time_format(&draft);
/// assert_eq!(findings.len(), 1);
/// assert!(findings[0].is_error());
/// ```
pub fn check_time_format(draft: &ShiftDraft) -> Vec<ValidationFinding> {
    [("start_time", &draft.start_time), ("end_time", &draft.end_time)]
        .into_iter()
        .filter(|(_, value)| parse_clock_time(value).is_none())
        .map(|(field, value)| {
            ValidationFinding::error(
                TIME_FORMAT_RULE,
                FindingKind::TimeFormat {
                    shift_id: draft.effective_id().to_string(),
                    field: field.to_string(),
                    value: value.clone(),
                },
                format!("'{}' is not a valid 24-hour HH:mm time for {}", value, field),
            )
            .with_fix(FixAction::AdjustTimes, "Enter the time as HH:mm, e.g. 06:00")
        })
        .collect()
}
