//! Weekly schedule metrics.
//!
//! A pure function over a shift snapshot: no hidden state, so recomputing
//! on every shift mutation yields identical results for identical input.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BusinessRules;
use crate::models::{Employee, ScheduleShift};
use crate::validation::exact_utilization;

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Traffic-light status of budget utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// At or under the warning threshold.
    Success,
    /// Above the warning threshold, at or under 100%.
    Warning,
    /// Over 100%.
    Danger,
}

impl BudgetStatus {
    /// Classifies a cost against a budget. Over budget is `Danger` whatever
    /// the rounded percentage says.
    pub fn classify(cost: Decimal, budget: Decimal, warning_threshold: Decimal) -> Self {
        if cost > budget {
            BudgetStatus::Danger
        } else {
            Self::from_utilization(exact_utilization(cost, budget), warning_threshold)
        }
    }

    /// Classifies an unrounded utilization percentage.
    pub fn from_utilization(utilization: Decimal, warning_threshold: Decimal) -> Self {
        if utilization > HUNDRED {
            BudgetStatus::Danger
        } else if utilization > warning_threshold {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Success
        }
    }
}

/// Aggregates for one week of shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Sum of shift durations.
    pub weekly_hours: Decimal,
    /// Sum of shift costs.
    pub weekly_cost: Decimal,
    /// Distinct employees with at least one shift.
    pub employee_count: usize,
    /// Cost as a percentage of the budget, two decimal places.
    pub budget_utilization: Decimal,
    /// Traffic-light status.
    pub budget_status: BudgetStatus,
    /// Hours per scheduled employee, two decimal places.
    pub average_hours_per_employee: Decimal,
    /// Cost per scheduled hour, whole currency units.
    pub cost_per_hour: Decimal,
    /// Roster members with no shift, in roster order.
    pub unscheduled_employees: Vec<String>,
}

/// Computes weekly metrics.
///
/// With no budget (zero or negative), utilization is zero and the status is
/// `Danger` as soon as anything costs money.
///
/// # Example
///
/// ```
/// use schedule_engine::config::BusinessRules;
/// use schedule_engine::metrics::{BudgetStatus, compute_metrics};
/// use rust_decimal::Decimal;
///
/// let metrics = compute_metrics(&[], &[], Decimal::new(10_000_000, 0), &BusinessRules::default());
/// assert_eq!(metrics.weekly_hours, Decimal::ZERO);
/// assert_eq!(metrics.budget_status, BudgetStatus::Success);
/// ```
pub fn compute_metrics(
    shifts: &[ScheduleShift],
    employees: &[Employee],
    weekly_budget: Decimal,
    rules: &BusinessRules,
) -> ScheduleMetrics {
    let weekly_hours: Decimal = shifts.iter().map(ScheduleShift::duration_hours).sum();
    let weekly_cost: Decimal = shifts.iter().map(|s| s.cost).sum();
    let scheduled: BTreeSet<&str> = shifts.iter().map(|s| s.employee_id.as_str()).collect();
    let employee_count = scheduled.len();

    let (budget_utilization, budget_status) = if weekly_budget > Decimal::ZERO {
        (
            exact_utilization(weekly_cost, weekly_budget).round_dp(2),
            BudgetStatus::classify(weekly_cost, weekly_budget, rules.budget_warning_threshold),
        )
    } else if weekly_cost > Decimal::ZERO {
        (Decimal::ZERO, BudgetStatus::Danger)
    } else {
        (Decimal::ZERO, BudgetStatus::Success)
    };

    let average_hours_per_employee = if employee_count > 0 {
        (weekly_hours / Decimal::from(employee_count)).round_dp(2)
    } else {
        Decimal::ZERO
    };
    let cost_per_hour = if weekly_hours > Decimal::ZERO {
        (weekly_cost / weekly_hours).round_dp(0)
    } else {
        Decimal::ZERO
    };

    let unscheduled_employees = employees
        .iter()
        .filter(|e| !scheduled.contains(e.id.as_str()))
        .map(|e| e.id.clone())
        .collect();

    tracing::debug!(
        shifts = shifts.len(),
        employee_count,
        utilization = %budget_utilization,
        "Computed schedule metrics"
    );

    ScheduleMetrics {
        weekly_hours: weekly_hours.round_dp(2),
        weekly_cost,
        employee_count,
        budget_utilization,
        budget_status,
        average_hours_per_employee,
        cost_per_hour,
        unscheduled_employees,
    }
}
