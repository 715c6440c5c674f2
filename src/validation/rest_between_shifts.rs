//! Minimum rest between consecutive shifts of one employee.
//!
//! The gap is measured from the absolute end of one shift to the absolute
//! start of the next, across dates. A gap below the configured minimum is
//! reported; it is blocking only under the hard 8-hour floor. Same-date
//! pairs that overlap belong to the overlap rule. A shift that runs into
//! the next date's shift gets zero hours of rest.

use rust_decimal::Decimal;

use super::overlap::shifts_overlap;
use crate::config::{HARD_MIN_REST_HOURS, LaborRules};
use crate::models::{FindingKind, FixAction, ScheduleShift, ValidationFinding};

/// Rule identifier for rest between shifts.
pub const REST_BETWEEN_SHIFTS_RULE: &str = "rest_between_shifts";

/// Hours between the end of `previous` and the start of `next`.
///
/// `None` when the two overlap on the same date. A collision across dates
/// counts as zero rest.
pub fn rest_hours_between(previous: &ScheduleShift, next: &ScheduleShift) -> Option<Decimal> {
    let minutes = (next.starts_at() - previous.ends_at()).num_minutes();
    if minutes >= 0 {
        Some(Decimal::new(minutes, 0) / Decimal::new(60, 0))
    } else if previous.date != next.date {
        Some(Decimal::ZERO)
    } else {
        None
    }
}

/// Reports insufficient rest between two chronologically ordered shifts.
pub fn check_rest_gap(
    previous: &ScheduleShift,
    next: &ScheduleShift,
    rules: &LaborRules,
) -> Option<ValidationFinding> {
    let rest_hours = rest_hours_between(previous, next)?;
    if rest_hours >= rules.min_rest_between_shifts_hours {
        return None;
    }

    let kind = FindingKind::ShiftGap {
        shift_id: next.id.clone(),
        previous_shift_id: previous.id.clone(),
        rest_hours: rest_hours.round_dp(2),
    };
    let message = format!(
        "Only {}h of rest after shift '{}'; minimum is {}h",
        rest_hours.round_dp(2).normalize(),
        previous.id,
        rules.min_rest_between_shifts_hours.normalize()
    );

    let finding = if rest_hours < HARD_MIN_REST_HOURS {
        ValidationFinding::error(REST_BETWEEN_SHIFTS_RULE, kind, message)
    } else {
        ValidationFinding::warning(REST_BETWEEN_SHIFTS_RULE, kind, message)
    };
    Some(finding.with_fix(FixAction::AdjustTimes, "Start the later shift later"))
}

/// Checks one shift against the employee's nearest shift before and after it.
pub fn check_rest_between_shifts(
    shift: &ScheduleShift,
    existing: &[ScheduleShift],
    rules: &LaborRules,
) -> Vec<ValidationFinding> {
    let same_employee = existing.iter().filter(|other| {
        other.id != shift.id && other.employee_id == shift.employee_id && !shifts_overlap(shift, other)
    });

    let mut previous: Option<&ScheduleShift> = None;
    let mut next: Option<&ScheduleShift> = None;
    for other in same_employee {
        if other.starts_at() <= shift.starts_at() {
            if previous.is_none_or(|p| other.ends_at() > p.ends_at()) {
                previous = Some(other);
            }
        } else if next.is_none_or(|n| other.starts_at() < n.starts_at()) {
            next = Some(other);
        }
    }

    let mut findings = Vec::new();
    if let Some(previous) = previous {
        findings.extend(check_rest_gap(previous, shift, rules));
    }
    if let Some(next) = next {
        findings.extend(check_rest_gap(shift, next, rules));
    }
    findings
}

/// Checks every consecutive pair of each employee's shifts.
pub fn check_schedule_rest(shifts: &[ScheduleShift], rules: &LaborRules) -> Vec<ValidationFinding> {
    let mut ordered: Vec<&ScheduleShift> = shifts.iter().collect();
    ordered.sort_by(|a, b| {
        a.employee_id
            .cmp(&b.employee_id)
            .then(a.starts_at().cmp(&b.starts_at()))
    });

    ordered
        .windows(2)
        .filter(|pair| pair[0].employee_id == pair[1].employee_id)
        .filter_map(|pair| check_rest_gap(pair[0], pair[1], rules))
        .collect()
}
