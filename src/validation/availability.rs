//! Employee availability check.
//!
//! Looks up the employee's declared availability for the shift's weekday.
//! An unavailable day is blocking; a shift that spills outside the declared
//! window only warns. A weekday with no entry carries no restriction.

use crate::models::{
    Employee, FindingKind, FixAction, MINUTES_PER_DAY, ScheduleShift, ValidationFinding,
    format_clock_time, minutes_of_day,
};

/// Rule identifier for availability.
pub const AVAILABILITY_RULE: &str = "employee_availability";

/// Checks a shift against its employee's weekly availability.
pub fn check_availability(shift: &ScheduleShift, employee: &Employee) -> Option<ValidationFinding> {
    let day = shift.day_index();
    let entry = employee.availability_for(day)?;

    let kind = FindingKind::Availability {
        employee_id: employee.id.clone(),
        shift_id: shift.id.clone(),
        day,
    };

    if !entry.available {
        return Some(
            ValidationFinding::error(
                AVAILABILITY_RULE,
                kind,
                format!(
                    "{} is not available on {}",
                    employee.name,
                    shift.date.format("%A")
                ),
            )
            .with_fix(FixAction::ReassignShift, "Assign the shift to an available employee"),
        );
    }

    if entry.start_time.is_none() && entry.end_time.is_none() {
        return None;
    }

    let window_start = entry.start_time.map(minutes_of_day).unwrap_or(0);
    let mut window_end = entry.end_time.map(minutes_of_day).unwrap_or(MINUTES_PER_DAY);
    if window_end <= window_start {
        window_end += MINUTES_PER_DAY;
    }

    let shift_start = minutes_of_day(shift.start_time);
    let shift_end = shift_start + shift.duration_minutes();

    if shift_start < window_start || shift_end > window_end {
        let window = format!(
            "{}-{}",
            entry
                .start_time
                .map(format_clock_time)
                .unwrap_or_else(|| "00:00".to_string()),
            entry
                .end_time
                .map(format_clock_time)
                .unwrap_or_else(|| "24:00".to_string()),
        );
        return Some(
            ValidationFinding::warning(
                AVAILABILITY_RULE,
                kind,
                format!(
                    "Shift {}-{} falls outside {}'s availability ({})",
                    format_clock_time(shift.start_time),
                    format_clock_time(shift.end_time),
                    employee.name,
                    window
                ),
            )
            .with_fix(FixAction::AdjustTimes, format!("Keep the shift within {}", window)),
        );
    }

    None
}
