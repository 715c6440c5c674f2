//! Shift length bounds.
//!
//! Shifts shorter than the configured minimum are blocking; shifts longer
//! than the configured maximum of consecutive hours only warn.

use crate::config::LaborRules;
use crate::models::{FindingKind, FixAction, ScheduleShift, ValidationFinding};

/// Rule identifier for shift length.
pub const SHIFT_DURATION_RULE: &str = "shift_duration";

/// Checks one shift's duration against the labor limits.
pub fn check_shift_duration(shift: &ScheduleShift, rules: &LaborRules) -> Option<ValidationFinding> {
    let hours = shift.duration_hours();
    let kind = FindingKind::ShiftDuration {
        shift_id: shift.id.clone(),
        hours,
    };

    if hours < rules.min_shift_hours {
        Some(
            ValidationFinding::error(
                SHIFT_DURATION_RULE,
                kind,
                format!(
                    "Shift is too short: {}h is under the {}h minimum",
                    hours.round_dp(2).normalize(),
                    rules.min_shift_hours.normalize()
                ),
            )
            .with_fix(FixAction::AdjustTimes, "Extend the shift or remove it"),
        )
    } else if hours > rules.max_consecutive_hours {
        Some(
            ValidationFinding::warning(
                SHIFT_DURATION_RULE,
                kind,
                format!(
                    "Shift is {}h long, over the {}h consecutive-hours limit",
                    hours.round_dp(2).normalize(),
                    rules.max_consecutive_hours.normalize()
                ),
            )
            .with_fix(FixAction::AdjustTimes, "Split the shift in two"),
        )
    } else {
        None
    }
}
