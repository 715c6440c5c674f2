//! The validation engine: composes the individual rules.
//!
//! [`ValidationEngine::validate_shift`] runs the per-shift rules on a single
//! create/update draft. [`ValidationEngine::validate_schedule`] runs the
//! aggregate and global rules over a whole week before publishing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::models::{
    Employee, RestDay, ScheduleShift, ShiftDraft, TeamRequest, ValidationFinding, ValidationResult,
};

use super::availability::check_availability;
use super::budget::check_budget;
use super::consecutive_days::check_consecutive_days;
use super::date_sanity::check_shift_date;
use super::duration::check_shift_duration;
use super::leave_conflict::check_leave_conflicts;
use super::overlap::{check_overlap, check_schedule_overlaps};
use super::rest_between_shifts::{check_rest_between_shifts, check_schedule_rest};
use super::rest_day::check_rest_days;
use super::staffing::check_staffing;
use super::time_format::check_time_format;
use super::weekly_hours::check_weekly_hours;

/// What a single-shift validation compares against.
#[derive(Debug, Clone, Copy)]
pub struct ShiftContext<'a> {
    /// The roster.
    pub employees: &'a [Employee],
    /// Shifts already in the schedule.
    pub existing_shifts: &'a [ScheduleShift],
    /// The caller's current date, used for the past-date check.
    pub today: NaiveDate,
}

/// Everything a full-schedule validation needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    /// Proposed shifts.
    pub shifts: Vec<ScheduleShift>,
    /// The roster.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Declared rest days.
    #[serde(default)]
    pub rest_days: Vec<RestDay>,
    /// Requests to check for approved leave.
    #[serde(default)]
    pub leaves: Vec<TeamRequest>,
    /// Weekly budget; the configured budget applies when absent.
    #[serde(default)]
    pub weekly_budget: Option<Decimal>,
}

/// Runs validation rules with a fixed configuration.
///
/// # Example
///
/// ```
/// use schedule_engine::config::EngineConfig;
/// use schedule_engine::validation::{ScheduleSnapshot, ValidationEngine};
///
/// let engine = ValidationEngine::new(EngineConfig::default());
/// let result = engine.validate_schedule(&ScheduleSnapshot::default());
/// assert!(result.is_valid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: EngineConfig,
}

impl ValidationEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates one create/update draft.
    ///
    /// Malformed times stop validation after the format findings, since no
    /// other rule can run on an unparseable shift.
    pub fn validate_shift(&self, draft: &ShiftDraft, context: &ShiftContext<'_>) -> ValidationResult {
        let labor = &self.config.labor;
        let employee = context
            .employees
            .iter()
            .find(|e| e.id == draft.employee_id);

        let shift = match draft.to_shift(employee.and_then(|e| e.hourly_rate), &labor.surcharges) {
            Ok(shift) => shift,
            Err(_) => {
                let findings = check_time_format(draft);
                tracing::debug!(
                    shift_id = draft.effective_id(),
                    errors = findings.len(),
                    "Shift draft has malformed times"
                );
                return ValidationResult::from_findings(findings);
            }
        };

        let mut findings: Vec<ValidationFinding> = Vec::new();
        findings.extend(check_shift_duration(&shift, labor));
        findings.extend(check_shift_date(&shift, context.today));
        if let Some(employee) = employee {
            findings.extend(check_availability(&shift, employee));
        }
        findings.extend(check_overlap(&shift, context.existing_shifts));
        findings.extend(check_rest_between_shifts(&shift, context.existing_shifts, labor));

        let result = ValidationResult::from_findings(findings);
        tracing::debug!(
            shift_id = %shift.id,
            employee_id = %shift.employee_id,
            errors = result.summary.total_errors,
            warnings = result.summary.total_warnings,
            "Validated shift"
        );
        result
    }

    /// Validates a whole schedule.
    pub fn validate_schedule(&self, snapshot: &ScheduleSnapshot) -> ValidationResult {
        let labor = &self.config.labor;
        let business = &self.config.business;
        let shifts = &snapshot.shifts;

        let mut findings: Vec<ValidationFinding> = Vec::new();

        for shift in shifts {
            findings.extend(check_shift_duration(shift, labor));
            if let Some(employee) = snapshot.employees.iter().find(|e| e.id == shift.employee_id) {
                findings.extend(check_availability(shift, employee));
            }
        }
        findings.extend(check_schedule_overlaps(shifts));
        findings.extend(check_schedule_rest(shifts, labor));

        findings.extend(check_weekly_hours(shifts, &snapshot.employees, labor));
        findings.extend(check_rest_days(shifts, &snapshot.rest_days));
        findings.extend(check_leave_conflicts(shifts, &snapshot.leaves));
        findings.extend(check_consecutive_days(shifts, labor));

        let weekly_budget = snapshot.weekly_budget.unwrap_or(business.weekly_budget);
        findings.extend(check_budget(
            shifts,
            weekly_budget,
            business.budget_warning_threshold,
        ));
        findings.extend(check_staffing(shifts, business.min_staff_per_shift));

        let result = ValidationResult::from_findings(findings);
        tracing::debug!(
            shifts = shifts.len(),
            employees = snapshot.employees.len(),
            errors = result.summary.total_errors,
            warnings = result.summary.total_warnings,
            "Validated schedule"
        );
        result
    }
}
