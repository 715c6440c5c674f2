//! Weekly rest-day requirement.
//!
//! Every employee needs at least one day per ISO week without a shift.
//! Working all seven days is blocking and auto-fixable. Separately, a shift
//! placed on one of the employee's declared rest days is blocking.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;

use crate::models::{FindingKind, FixAction, RestDay, ScheduleShift, ValidationFinding};

use super::weekly_hours::week_start;

/// Rule identifier for rest days.
pub const REST_DAY_RULE: &str = "weekly_rest_day";

const DAYS_PER_WEEK: usize = 7;

/// Checks the rest-day requirement and declared rest days.
pub fn check_rest_days(shifts: &[ScheduleShift], rest_days: &[RestDay]) -> Vec<ValidationFinding> {
    let mut worked: BTreeMap<(&str, NaiveDate), BTreeSet<NaiveDate>> = BTreeMap::new();
    for shift in shifts {
        worked
            .entry((shift.employee_id.as_str(), week_start(shift.date)))
            .or_default()
            .insert(shift.date);
    }

    let mut findings: Vec<ValidationFinding> = worked
        .into_iter()
        .filter(|(_, days)| days.len() >= DAYS_PER_WEEK)
        .map(|((employee_id, week), _)| {
            ValidationFinding::error(
                REST_DAY_RULE,
                FindingKind::RestDay {
                    employee_id: employee_id.to_string(),
                    week_start: week,
                    date: None,
                },
                format!("No rest day in the week of {}: all 7 days are scheduled", week),
            )
            .with_fix(FixAction::AssignRestDay, "Remove one shift this week")
            .auto_fixable()
        })
        .collect();

    let declared: HashSet<(&str, NaiveDate)> = rest_days
        .iter()
        .map(|r| (r.employee_id.as_str(), r.date))
        .collect();
    let mut reported = HashSet::new();
    for shift in shifts {
        let key = (shift.employee_id.as_str(), shift.date);
        if declared.contains(&key) && reported.insert(key) {
            findings.push(
                ValidationFinding::error(
                    REST_DAY_RULE,
                    FindingKind::RestDay {
                        employee_id: shift.employee_id.clone(),
                        week_start: week_start(shift.date),
                        date: Some(shift.date),
                    },
                    format!("Shift '{}' falls on a declared rest day ({})", shift.id, shift.date),
                )
                .with_fix(FixAction::RemoveShift, "Remove the shift or move the rest day"),
            );
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShiftStatus, ShiftType, parse_clock_time};
    use rust_decimal::Decimal;

    fn shift(id: &str, employee: &str, date: NaiveDate) -> ScheduleShift {
        ScheduleShift {
            id: id.to_string(),
            employee_id: employee.to_string(),
            location_id: "loc_centro".to_string(),
            date,
            start_time: parse_clock_time("06:00").unwrap(),
            end_time: parse_clock_time("12:00").unwrap(),
            shift_type: ShiftType::Regular,
            cost: Decimal::ZERO,
            status: ShiftStatus::Draft,
            notes: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_seven_days_worked_is_autofixable_error() {
        let shifts: Vec<_> = (15..=21).map(|d| shift(&format!("s{}", d), "emp_1", day(d))).collect();
        let findings = check_rest_days(&shifts, &[]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_error());
        assert!(findings[0].can_auto_fix);
        assert_eq!(findings[0].id, "weekly_rest_day:emp_1:2024-01-15");
    }

    #[test]
    fn test_six_days_worked_passes() {
        let shifts: Vec<_> = (15..=20).map(|d| shift(&format!("s{}", d), "emp_1", day(d))).collect();
        assert!(check_rest_days(&shifts, &[]).is_empty());
    }

    #[test]
    fn test_seven_days_spanning_two_weeks_passes() {
        // Wed 17th .. Tue 23rd
        let shifts: Vec<_> = (17..=23).map(|d| shift(&format!("s{}", d), "emp_1", day(d))).collect();
        assert!(check_rest_days(&shifts, &[]).is_empty());
    }

    #[test]
    fn test_two_shifts_one_day_counts_once() {
        let mut shifts: Vec<_> = (15..=20).map(|d| shift(&format!("s{}", d), "emp_1", day(d))).collect();
        shifts.push(shift("extra", "emp_1", day(20)));
        assert!(check_rest_days(&shifts, &[]).is_empty());
    }

    #[test]
    fn test_shift_on_declared_rest_day_is_error() {
        let shifts = vec![shift("s1", "emp_1", day(15)), shift("s2", "emp_1", day(15))];
        let rest = vec![RestDay {
            employee_id: "emp_1".to_string(),
            date: day(15),
        }];
        let findings = check_rest_days(&shifts, &rest);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_error());
        assert!(!findings[0].can_auto_fix);
    }

    #[test]
    fn test_rest_day_of_other_employee_ignored() {
        let shifts = vec![shift("s1", "emp_1", day(15))];
        let rest = vec![RestDay {
            employee_id: "emp_2".to_string(),
            date: day(15),
        }];
        assert!(check_rest_days(&shifts, &rest).is_empty());
    }
}
