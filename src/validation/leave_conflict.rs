//! Shifts scheduled during approved leave.

use crate::models::{
    FindingKind, FixAction, RequestStatus, ScheduleShift, TeamRequest, ValidationFinding,
};

/// Rule identifier for leave conflicts.
pub const LEAVE_CONFLICT_RULE: &str = "approved_leave_conflict";

/// Reports every shift dated inside an approved absence of its employee.
///
/// Only approved requests of an absence type count; pending leave and
/// shift-change style requests never conflict.
pub fn check_leave_conflicts(
    shifts: &[ScheduleShift],
    leaves: &[TeamRequest],
) -> Vec<ValidationFinding> {
    let approved: Vec<&TeamRequest> = leaves
        .iter()
        .filter(|r| r.status == RequestStatus::Approved && r.request_type.is_absence())
        .collect();

    shifts
        .iter()
        .flat_map(|shift| {
            approved
                .iter()
                .filter(move |leave| leave.employee_id == shift.employee_id && leave.covers(shift.date))
                .map(move |leave| {
                    ValidationFinding::error(
                        LEAVE_CONFLICT_RULE,
                        FindingKind::LeaveConflict {
                            employee_id: shift.employee_id.clone(),
                            shift_id: shift.id.clone(),
                            request_id: leave.id.clone(),
                        },
                        format!(
                            "Shift on {} conflicts with approved leave '{}'",
                            shift.date, leave.id
                        ),
                    )
                    .with_fix(FixAction::ReassignShift, "Assign the shift to someone else")
                })
        })
        .collect()
}
