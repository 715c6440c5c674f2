//! Validation findings and results.
//!
//! Findings are data, never errors. Each one is tagged with the rule that
//! produced it and a [`FindingKind`] carrying the rule-specific payload, so
//! the per-type summary is built from an exhaustive match.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How serious a finding is. Only errors make a result invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks saving or publishing.
    Error,
    /// Shown to the user; never blocks.
    Warning,
}

/// Rule category of a finding, used as the summary histogram key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingType {
    /// Weekly hours above the employee's ceiling.
    Overtime,
    /// Shift outside declared availability.
    Availability,
    /// Two shifts of one employee overlap.
    Overlap,
    /// Too few people at a location on a date.
    Understaffed,
    /// Labor cost against the weekly budget.
    Budget,
    /// Missing or violated rest day.
    RestDay,
    /// Shift during approved leave.
    LeaveConflict,
    /// Not enough rest between consecutive shifts.
    ShiftGap,
    /// Malformed `HH:mm` input.
    TimeFormat,
    /// Shift too short or too long.
    ShiftDuration,
    /// Shift dated in the past.
    PastDate,
    /// Too many consecutive work days.
    ConsecutiveDays,
}

/// Rule-specific payload of a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FindingKind {
    /// Weekly hours above the ceiling.
    Overtime {
        /// The employee.
        employee_id: String,
        /// Monday of the affected week.
        week_start: NaiveDate,
        /// Hours scheduled that week.
        scheduled_hours: Decimal,
        /// The applicable ceiling.
        max_hours: Decimal,
    },
    /// Shift on an unavailable day or outside the available window.
    Availability {
        /// The employee.
        employee_id: String,
        /// The offending shift.
        shift_id: String,
        /// Day-of-week index, 0 = Sunday.
        day: u32,
    },
    /// Overlapping shifts.
    Overlap {
        /// The shift being checked.
        shift_id: String,
        /// The shift it collides with.
        conflicting_shift_id: String,
    },
    /// Headcount below the minimum.
    Understaffed {
        /// The date.
        date: NaiveDate,
        /// The location.
        location_id: String,
        /// Distinct employees scheduled.
        scheduled: u32,
        /// Required minimum.
        required: u32,
    },
    /// Budget utilization too high.
    Budget {
        /// Sum of shift costs.
        total_cost: Decimal,
        /// The weekly ceiling.
        weekly_budget: Decimal,
        /// Cost as a percentage of budget.
        utilization: Decimal,
    },
    /// Rest-day rule broken.
    RestDay {
        /// The employee.
        employee_id: String,
        /// Monday of the affected week.
        week_start: NaiveDate,
        /// The declared rest date that was scheduled, if that is the problem.
        date: Option<NaiveDate>,
    },
    /// Shift during approved leave.
    LeaveConflict {
        /// The employee.
        employee_id: String,
        /// The offending shift.
        shift_id: String,
        /// The approved leave request.
        request_id: String,
    },
    /// Insufficient rest between shifts.
    ShiftGap {
        /// The later shift.
        shift_id: String,
        /// The earlier shift.
        previous_shift_id: String,
        /// Hours between the end of one and the start of the other.
        rest_hours: Decimal,
    },
    /// Malformed time.
    TimeFormat {
        /// The shift.
        shift_id: String,
        /// `start_time` or `end_time`.
        field: String,
        /// What the user typed.
        value: String,
    },
    /// Shift length out of bounds.
    ShiftDuration {
        /// The shift.
        shift_id: String,
        /// Its length in hours.
        hours: Decimal,
    },
    /// Shift dated before today.
    PastDate {
        /// The shift.
        shift_id: String,
        /// Its date.
        date: NaiveDate,
    },
    /// Long run of consecutive work days.
    ConsecutiveDays {
        /// The employee.
        employee_id: String,
        /// First day of the run.
        first_day: NaiveDate,
        /// Length of the run.
        days: u32,
        /// Configured maximum.
        max_days: u32,
    },
}

impl FindingKind {
    /// The histogram category of this finding.
    pub fn finding_type(&self) -> FindingType {
        match self {
            FindingKind::Overtime { .. } => FindingType::Overtime,
            FindingKind::Availability { .. } => FindingType::Availability,
            FindingKind::Overlap { .. } => FindingType::Overlap,
            FindingKind::Understaffed { .. } => FindingType::Understaffed,
            FindingKind::Budget { .. } => FindingType::Budget,
            FindingKind::RestDay { .. } => FindingType::RestDay,
            FindingKind::LeaveConflict { .. } => FindingType::LeaveConflict,
            FindingKind::ShiftGap { .. } => FindingType::ShiftGap,
            FindingKind::TimeFormat { .. } => FindingType::TimeFormat,
            FindingKind::ShiftDuration { .. } => FindingType::ShiftDuration,
            FindingKind::PastDate { .. } => FindingType::PastDate,
            FindingKind::ConsecutiveDays { .. } => FindingType::ConsecutiveDays,
        }
    }

    /// The entity the finding is about, for UI highlighting.
    pub fn entity(&self) -> EntityRef {
        match self {
            FindingKind::Overtime { employee_id, .. }
            | FindingKind::RestDay { employee_id, .. }
            | FindingKind::ConsecutiveDays { employee_id, .. } => {
                EntityRef::new(EntityKind::Employee, employee_id)
            }
            FindingKind::Availability { shift_id, .. }
            | FindingKind::Overlap { shift_id, .. }
            | FindingKind::LeaveConflict { shift_id, .. }
            | FindingKind::ShiftGap { shift_id, .. }
            | FindingKind::TimeFormat { shift_id, .. }
            | FindingKind::ShiftDuration { shift_id, .. }
            | FindingKind::PastDate { shift_id, .. } => EntityRef::new(EntityKind::Shift, shift_id),
            FindingKind::Understaffed { location_id, .. } => {
                EntityRef::new(EntityKind::Location, location_id)
            }
            FindingKind::Budget { .. } => EntityRef::new(EntityKind::Schedule, "week"),
        }
    }

    /// Deterministic key distinguishing findings of the same rule.
    fn subject_key(&self) -> String {
        match self {
            FindingKind::Overtime {
                employee_id,
                week_start,
                ..
            } => format!("{}:{}", employee_id, week_start),
            FindingKind::Availability { shift_id, .. }
            | FindingKind::ShiftDuration { shift_id, .. }
            | FindingKind::PastDate { shift_id, .. } => shift_id.clone(),
            FindingKind::Overlap {
                shift_id,
                conflicting_shift_id,
            } => format!("{}:{}", shift_id, conflicting_shift_id),
            FindingKind::Understaffed {
                date, location_id, ..
            } => format!("{}:{}", location_id, date),
            FindingKind::Budget { .. } => "week".to_string(),
            FindingKind::RestDay {
                employee_id,
                week_start,
                date,
            } => match date {
                Some(date) => format!("{}:{}", employee_id, date),
                None => format!("{}:{}", employee_id, week_start),
            },
            FindingKind::LeaveConflict {
                shift_id,
                request_id,
                ..
            } => format!("{}:{}", shift_id, request_id),
            FindingKind::ShiftGap {
                shift_id,
                previous_shift_id,
                ..
            } => format!("{}:{}", previous_shift_id, shift_id),
            FindingKind::TimeFormat {
                shift_id, field, ..
            } => format!("{}:{}", shift_id, field),
            FindingKind::ConsecutiveDays {
                employee_id,
                first_day,
                ..
            } => format!("{}:{}", employee_id, first_day),
        }
    }
}

/// What kind of entity a finding points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// An employee.
    Employee,
    /// A shift.
    Shift,
    /// A location.
    Location,
    /// The schedule as a whole.
    Schedule,
}

/// Reference to the entity a finding is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// The entity kind.
    pub kind: EntityKind,
    /// The entity id.
    pub id: String,
}

impl EntityRef {
    fn new(kind: EntityKind, id: &str) -> Self {
        Self {
            kind,
            id: id.to_string(),
        }
    }
}

/// A corrective action the UI can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixAction {
    /// Shorten or drop shifts to cut hours.
    ReduceHours,
    /// Give the employee a day off.
    AssignRestDay,
    /// Move the shift to another employee.
    ReassignShift,
    /// Change start/end times.
    AdjustTimes,
    /// Delete the shift.
    RemoveShift,
    /// Schedule more people.
    AddStaff,
    /// Bring labor cost down.
    ReduceCost,
}

/// A suggested fix for a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSuggestion {
    /// The action.
    pub action: FixAction,
    /// Human-readable explanation.
    pub description: String,
}

/// One finding produced by a validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    /// Deterministic id: rule id plus the subject.
    pub id: String,
    /// The rule that produced the finding (e.g. `weekly_hours_ceiling`).
    pub rule_id: String,
    /// Error or warning.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Category and rule payload.
    #[serde(flatten)]
    pub kind: FindingKind,
    /// The entity the finding points at.
    pub entity: EntityRef,
    /// Whether an automatic fix exists.
    #[serde(default)]
    pub can_auto_fix: bool,
    /// Suggested fixes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<FixSuggestion>,
}

impl ValidationFinding {
    /// Creates an error finding.
    pub fn error(rule_id: &str, kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(rule_id, Severity::Error, kind, message.into())
    }

    /// Creates a warning finding.
    pub fn warning(rule_id: &str, kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(rule_id, Severity::Warning, kind, message.into())
    }

    fn new(rule_id: &str, severity: Severity, kind: FindingKind, message: String) -> Self {
        Self {
            id: format!("{}:{}", rule_id, kind.subject_key()),
            rule_id: rule_id.to_string(),
            severity,
            message,
            entity: kind.entity(),
            kind,
            can_auto_fix: false,
            suggestions: Vec::new(),
        }
    }

    /// Adds a suggested fix.
    pub fn with_fix(mut self, action: FixAction, description: impl Into<String>) -> Self {
        self.suggestions.push(FixSuggestion {
            action,
            description: description.into(),
        });
        self
    }

    /// Marks the finding as automatically fixable.
    pub fn auto_fixable(mut self) -> Self {
        self.can_auto_fix = true;
        self
    }

    /// The histogram category of this finding.
    pub fn finding_type(&self) -> FindingType {
        self.kind.finding_type()
    }

    /// Returns true for error-severity findings.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Counts of findings by severity and type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Number of error findings.
    pub total_errors: usize,
    /// Number of warning findings.
    pub total_warnings: usize,
    /// Findings per type, errors and warnings together.
    pub by_type: BTreeMap<FindingType, usize>,
}

/// Outcome of a validation pass. Recomputed on every pass, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff there are no error findings.
    pub is_valid: bool,
    /// Error findings, in rule order.
    pub errors: Vec<ValidationFinding>,
    /// Warning findings, in rule order.
    pub warnings: Vec<ValidationFinding>,
    /// Counts.
    pub summary: ValidationSummary,
}

impl ValidationResult {
    /// Partitions findings by severity and builds the summary.
    ///
    /// # Example
    ///
    /// ```
    /// use schedule_engine::models::{FindingKind, FindingType, ValidationFinding, ValidationResult};
    ///
    /// let finding = ValidationFinding::warning(
    ///     "overlap_check",
    ///     FindingKind::Overlap {
    ///         shift_id: "s1".to_string(),
    ///         conflicting_shift_id: "s2".to_string(),
    ///     },
    ///     "overlap",
    /// );
    /// let result = ValidationResult::from_findings(vec![finding]);
    /// assert!(result.is_valid);
    /// assert_eq!(result.summary.by_type[&FindingType::Overlap], 1);
    /// ```
    pub fn from_findings(findings: Vec<ValidationFinding>) -> Self {
        let mut summary = ValidationSummary::default();
        for finding in &findings {
            *summary.by_type.entry(finding.finding_type()).or_insert(0) += 1;
        }

        let (errors, warnings): (Vec<_>, Vec<_>) =
            findings.into_iter().partition(ValidationFinding::is_error);
        summary.total_errors = errors.len();
        summary.total_warnings = warnings.len();

        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            summary,
        }
    }

    /// All findings of one type, errors first.
    pub fn findings_of(&self, finding_type: FindingType) -> Vec<&ValidationFinding> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .filter(|f| f.finding_type() == finding_type)
            .collect()
    }
}
