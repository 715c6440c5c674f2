//! Weekly budget ceiling.

use rust_decimal::Decimal;

use crate::models::{FindingKind, FixAction, ScheduleShift, ValidationFinding};

/// Rule identifier for the budget ceiling.
pub const BUDGET_RULE: &str = "weekly_budget_ceiling";

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Cost as a percentage of budget, rounded to two places for reporting.
/// Zero when there is no budget to measure against.
///
/// # Example
///
/// ```
/// use schedule_engine::validation::budget_utilization;
/// use rust_decimal::Decimal;
///
/// let utilization = budget_utilization(Decimal::new(9_200_000, 0), Decimal::new(10_000_000, 0));
/// assert_eq!(utilization, Decimal::new(92, 0));
/// ```
pub fn budget_utilization(total_cost: Decimal, weekly_budget: Decimal) -> Decimal {
    exact_utilization(total_cost, weekly_budget).round_dp(2)
}

/// Unrounded utilization. Thresholds compare against this value so that a
/// cost just over budget never rounds back down to 100%.
pub fn exact_utilization(total_cost: Decimal, weekly_budget: Decimal) -> Decimal {
    if weekly_budget <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    total_cost / weekly_budget * HUNDRED
}

/// Checks total shift cost against the weekly budget.
///
/// Over 100% is blocking; above `warning_threshold` percent warns. A
/// non-positive budget disables the check.
pub fn check_budget(
    shifts: &[ScheduleShift],
    weekly_budget: Decimal,
    warning_threshold: Decimal,
) -> Option<ValidationFinding> {
    if weekly_budget <= Decimal::ZERO {
        return None;
    }

    let total_cost: Decimal = shifts.iter().map(|s| s.cost).sum();
    let exact = exact_utilization(total_cost, weekly_budget);
    let utilization = exact.round_dp(2);
    let kind = FindingKind::Budget {
        total_cost,
        weekly_budget,
        utilization,
    };

    if total_cost > weekly_budget {
        Some(
            ValidationFinding::error(
                BUDGET_RULE,
                kind,
                format!(
                    "Labor cost {} exceeds the weekly budget {} ({}%)",
                    total_cost.normalize(),
                    weekly_budget.normalize(),
                    utilization.normalize()
                ),
            )
            .with_fix(
                FixAction::ReduceCost,
                format!("Cut {} in labor cost", (total_cost - weekly_budget).normalize()),
            ),
        )
    } else if exact > warning_threshold {
        Some(
            ValidationFinding::warning(
                BUDGET_RULE,
                kind,
                format!(
                    "Labor cost is at {}% of the weekly budget",
                    utilization.normalize()
                ),
            )
            .with_fix(FixAction::ReduceCost, "Review overtime and holiday shifts"),
        )
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Severity, ShiftStatus, ShiftType, parse_clock_time};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn costing(cost: &str) -> ScheduleShift {
        ScheduleShift {
            id: format!("s_{}", cost),
            employee_id: "emp_1".to_string(),
            location_id: "loc_centro".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            start_time: parse_clock_time("06:00").unwrap(),
            end_time: parse_clock_time("14:00").unwrap(),
            shift_type: ShiftType::Regular,
            cost: dec(cost),
            status: ShiftStatus::Draft,
            notes: None,
        }
    }

    #[test]
    fn test_92_percent_warns() {
        let shifts = vec![costing("5000000"), costing("4200000")];
        let finding = check_budget(&shifts, dec("10000000"), dec("85")).unwrap();
        assert_eq!(finding.severity, Severity::Warning);
        match finding.kind {
            FindingKind::Budget { utilization, .. } => assert_eq!(utilization, dec("92")),
            other => panic!("Expected Budget, got {:?}", other),
        }
    }

    #[test]
    fn test_exactly_100_percent_warns() {
        let finding = check_budget(&[costing("10000000")], dec("10000000"), dec("85")).unwrap();
        assert_eq!(finding.severity, Severity::Warning);
    }

    #[test]
    fn test_one_unit_over_budget_is_error() {
        let finding = check_budget(&[costing("10000001")], dec("10000000"), dec("85")).unwrap();
        assert_eq!(finding.severity, Severity::Error);
        match finding.kind {
            FindingKind::Budget { utilization, .. } => assert_eq!(utilization, dec("100.00")),
            other => panic!("Expected Budget, got {:?}", other),
        }
    }

    #[test]
    fn test_just_over_threshold_warns() {
        // 85.000001% rounds to 85.00 but still crosses the threshold.
        let finding = check_budget(&[costing("8500000.1")], dec("10000000"), dec("85")).unwrap();
        assert_eq!(finding.severity, Severity::Warning);
    }

    #[test]
    fn test_at_threshold_passes() {
        assert!(check_budget(&[costing("8500000")], dec("10000000"), dec("85")).is_none());
    }

    #[test]
    fn test_zero_budget_disables_check() {
        assert!(check_budget(&[costing("100")], Decimal::ZERO, dec("85")).is_none());
        assert_eq!(budget_utilization(dec("100"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_utilization_rounds_to_two_places() {
        assert_eq!(budget_utilization(dec("1"), dec("3")), dec("33.33"));
    }
}
