//! Schedule validation rules.
//!
//! Each rule lives in its own module and turns shifts (plus roster, rest
//! days, or leave) into [`crate::models::ValidationFinding`]s tagged with a
//! stable rule id. Per-shift rules: time format, duration, past date,
//! availability, overlap, and rest between shifts. Aggregate rules: weekly
//! hours, rest days, leave conflicts, and consecutive days. Global rules:
//! budget and staffing. [`ValidationEngine`] composes them.

mod availability;
mod budget;
mod consecutive_days;
mod date_sanity;
mod duration;
mod engine;
mod leave_conflict;
mod overlap;
mod rest_between_shifts;
mod rest_day;
mod staffing;
mod time_format;
mod weekly_hours;

pub use availability::{AVAILABILITY_RULE, check_availability};
pub use budget::{BUDGET_RULE, budget_utilization, check_budget, exact_utilization};
pub use consecutive_days::{CONSECUTIVE_DAYS_RULE, check_consecutive_days, consecutive_runs};
pub use date_sanity::{PAST_DATE_RULE, check_shift_date};
pub use duration::{SHIFT_DURATION_RULE, check_shift_duration};
pub use engine::{ScheduleSnapshot, ShiftContext, ValidationEngine};
pub use leave_conflict::{LEAVE_CONFLICT_RULE, check_leave_conflicts};
pub use overlap::{OVERLAP_RULE, check_overlap, check_schedule_overlaps, shifts_overlap};
pub use rest_between_shifts::{
    REST_BETWEEN_SHIFTS_RULE, check_rest_between_shifts, check_rest_gap, check_schedule_rest,
    rest_hours_between,
};
pub use rest_day::{REST_DAY_RULE, check_rest_days};
pub use staffing::{STAFFING_RULE, check_staffing};
pub use time_format::{TIME_FORMAT_RULE, check_time_format};
pub use weekly_hours::{WEEKLY_HOURS_RULE, check_weekly_hours, hours_by_employee_week, week_start};
