//! Weekly hours ceiling per employee.
//!
//! Hours are summed per employee per ISO week (Monday start). Exceeding the
//! employee's ceiling warns; exceeding it by more than the overtime margin
//! blocks. Both are auto-fixable by trimming hours.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::config::{LaborRules, OVERTIME_ERROR_MARGIN_HOURS};
use crate::models::{Employee, FindingKind, FixAction, ScheduleShift, ValidationFinding};

/// Rule identifier for the weekly ceiling.
pub const WEEKLY_HOURS_RULE: &str = "weekly_hours_ceiling";

/// Monday of the ISO week containing `date`.
///
/// # Example
///
/// ```
/// use schedule_engine::validation::week_start;
/// use chrono::NaiveDate;
///
/// let sunday = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
/// assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
/// ```
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Total scheduled hours per (employee, week start).
pub fn hours_by_employee_week(shifts: &[ScheduleShift]) -> BTreeMap<(&str, NaiveDate), Decimal> {
    let mut totals = BTreeMap::new();
    for shift in shifts {
        *totals
            .entry((shift.employee_id.as_str(), week_start(shift.date)))
            .or_insert(Decimal::ZERO) += shift.duration_hours();
    }
    totals
}

/// Checks every employee-week against the employee's ceiling.
///
/// Employees missing from the roster fall back to the configured default.
pub fn check_weekly_hours(
    shifts: &[ScheduleShift],
    employees: &[Employee],
    rules: &LaborRules,
) -> Vec<ValidationFinding> {
    let roster: HashMap<&str, &Employee> = employees.iter().map(|e| (e.id.as_str(), e)).collect();

    hours_by_employee_week(shifts)
        .into_iter()
        .filter_map(|((employee_id, week), scheduled)| {
            let limit = roster
                .get(employee_id)
                .map(|e| e.weekly_hours_limit(rules.max_weekly_hours))
                .unwrap_or(rules.max_weekly_hours);

            if scheduled <= limit {
                return None;
            }

            let excess = scheduled - limit;
            let kind = FindingKind::Overtime {
                employee_id: employee_id.to_string(),
                week_start: week,
                scheduled_hours: scheduled.round_dp(2),
                max_hours: limit,
            };
            let message = format!(
                "{}h scheduled in the week of {}, {}h over the {}h limit",
                scheduled.round_dp(2).normalize(),
                week,
                excess.round_dp(2).normalize(),
                limit.normalize()
            );

            let finding = if excess > OVERTIME_ERROR_MARGIN_HOURS {
                ValidationFinding::error(WEEKLY_HOURS_RULE, kind, message)
            } else {
                ValidationFinding::warning(WEEKLY_HOURS_RULE, kind, message)
            };
            Some(
                finding
                    .with_fix(
                        FixAction::ReduceHours,
                        format!("Remove {}h from this week", excess.round_dp(2).normalize()),
                    )
                    .auto_fixable(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Severity, ShiftStatus, ShiftType, parse_clock_time};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(max: Option<&str>) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Ana Gómez".to_string(),
            position: "Cajera".to_string(),
            location_id: "loc_centro".to_string(),
            max_weekly_hours: max.map(dec),
            hourly_rate: None,
            availability: vec![],
        }
    }

    /// `days` shifts of `hours` each starting Monday 2024-01-15 at 06:00.
    fn week_of_shifts(days: u32, hours: u32) -> Vec<ScheduleShift> {
        (0..days)
            .map(|d| ScheduleShift {
                id: format!("s{}", d),
                employee_id: "emp_001".to_string(),
                location_id: "loc_centro".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 15 + d).unwrap(),
                start_time: parse_clock_time("06:00").unwrap(),
                end_time: parse_clock_time(&format!("{:02}:00", 6 + hours)).unwrap(),
                shift_type: ShiftType::Regular,
                cost: Decimal::ZERO,
                status: ShiftStatus::Draft,
                notes: None,
            })
            .collect()
    }

    #[test]
    fn test_week_start_is_monday() {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(week_start(monday), monday);
        assert_eq!(week_start(NaiveDate::from_ymd_opt(2024, 1, 17).unwrap()), monday);
    }

    #[test]
    fn test_within_limit_passes() {
        let findings = check_weekly_hours(
            &week_of_shifts(5, 8),
            &[employee(Some("40"))],
            &LaborRules::default(),
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_46_hours_against_40_is_autofixable_warning() {
        // 6 shifts: four of 8h and two of 7h = 46h
        let mut shifts = week_of_shifts(6, 8);
        for shift in shifts.iter_mut().skip(4) {
            shift.end_time = parse_clock_time("13:00").unwrap();
        }

        let findings = check_weekly_hours(&shifts, &[employee(Some("40"))], &LaborRules::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].can_auto_fix);
        match &findings[0].kind {
            FindingKind::Overtime {
                scheduled_hours,
                max_hours,
                ..
            } => {
                assert_eq!(*scheduled_hours, dec("46"));
                assert_eq!(*max_hours, dec("40"));
            }
            other => panic!("Expected Overtime, got {:?}", other),
        }
    }

    #[test]
    fn test_exactly_margin_over_is_warning() {
        // 6 x 8h = 48h = 40 + 8
        let findings = check_weekly_hours(
            &week_of_shifts(6, 8),
            &[employee(Some("40"))],
            &LaborRules::default(),
        );
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_more_than_margin_over_is_error() {
        // 7 x 8h = 56h > 48h
        let findings = check_weekly_hours(
            &week_of_shifts(7, 8),
            &[employee(Some("40"))],
            &LaborRules::default(),
        );
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].can_auto_fix);
    }

    #[test]
    fn test_missing_employee_uses_default_limit() {
        // 6 x 8h = 48h against the default 42h
        let findings = check_weekly_hours(&week_of_shifts(6, 8), &[], &LaborRules::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_weeks_are_counted_separately() {
        // Sunday 2024-01-21 and Monday 2024-01-22 land in different weeks
        let mut shifts = week_of_shifts(8, 8);
        shifts.retain(|s| s.id == "s6" || s.id == "s7");
        let totals = hours_by_employee_week(&shifts);
        assert_eq!(totals.len(), 2);
    }
}
