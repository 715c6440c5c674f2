//! Overlap detection between shifts of the same employee on the same date.
//!
//! Two shifts overlap when `start1 < end2 && end1 > start2`, in minutes from
//! the start of their shared date. Ends of shifts crossing midnight run past
//! 1440, so an overnight shift still collides with a late shift that day.

use crate::models::{FindingKind, FixAction, ScheduleShift, ValidationFinding, minutes_of_day};

/// Rule identifier for overlapping shifts.
pub const OVERLAP_RULE: &str = "shift_overlap";

fn interval(shift: &ScheduleShift) -> (i64, i64) {
    let start = minutes_of_day(shift.start_time);
    (start, start + shift.duration_minutes())
}

/// Returns true when both shifts belong to one employee on one date and
/// their minute intervals intersect.
pub fn shifts_overlap(a: &ScheduleShift, b: &ScheduleShift) -> bool {
    if a.employee_id != b.employee_id || a.date != b.date {
        return false;
    }
    let (start_a, end_a) = interval(a);
    let (start_b, end_b) = interval(b);
    start_a < end_b && end_a > start_b
}

fn overlap_finding(shift: &ScheduleShift, other: &ScheduleShift) -> ValidationFinding {
    ValidationFinding::error(
        OVERLAP_RULE,
        FindingKind::Overlap {
            shift_id: shift.id.clone(),
            conflicting_shift_id: other.id.clone(),
        },
        format!(
            "Shift overlaps shift '{}' for the same employee on {}",
            other.id, shift.date
        ),
    )
    .with_fix(FixAction::AdjustTimes, "Move one of the shifts so they no longer overlap")
}

/// Checks one shift against existing shifts; one error per conflict.
///
/// An existing shift with the same id is the shift's own saved version and
/// is skipped.
pub fn check_overlap(shift: &ScheduleShift, existing: &[ScheduleShift]) -> Vec<ValidationFinding> {
    existing
        .iter()
        .filter(|other| other.id != shift.id && shifts_overlap(shift, other))
        .map(|other| overlap_finding(shift, other))
        .collect()
}

/// Checks every pair in a schedule; one error per overlapping pair,
/// attached to the later shift in input order.
pub fn check_schedule_overlaps(shifts: &[ScheduleShift]) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();
    for (i, later) in shifts.iter().enumerate() {
        for earlier in &shifts[..i] {
            if shifts_overlap(later, earlier) {
                findings.push(overlap_finding(later, earlier));
            }
        }
    }
    findings
}
