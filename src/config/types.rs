//! Configuration types for scheduling rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every struct also has a
//! `Default` carrying the Colombian defaults, so the engine can run without
//! touching disk.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ShiftType;

/// Hours over the weekly ceiling past which overtime becomes blocking.
pub const OVERTIME_ERROR_MARGIN_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Rest between shifts below this many hours is always an error.
pub const HARD_MIN_REST_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Pay multipliers applied on top of the ordinary hourly rate.
///
/// Per Código Sustantivo del Trabajo arts. 168 and 179: daytime overtime
/// +25%, night work +35%, Sunday/holiday work +75%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surcharges {
    /// Multiplier for overtime shifts.
    pub overtime: Decimal,
    /// Multiplier for night shifts.
    pub night: Decimal,
    /// Multiplier for Sunday/holiday shifts.
    pub holiday: Decimal,
}

impl Surcharges {
    /// Returns the multiplier for a shift type. Regular shifts pay 1x.
    pub fn multiplier(&self, shift_type: ShiftType) -> Decimal {
        match shift_type {
            ShiftType::Regular => Decimal::ONE,
            ShiftType::Overtime => self.overtime,
            ShiftType::Night => self.night,
            ShiftType::Holiday => self.holiday,
        }
    }
}

impl Default for Surcharges {
    fn default() -> Self {
        Self {
            overtime: Decimal::new(125, 2),
            night: Decimal::new(135, 2),
            holiday: Decimal::new(175, 2),
        }
    }
}

/// Labor-law limits, loaded from `labor.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborRules {
    /// Default weekly ceiling when an employee has none of their own.
    ///
    /// Ley 2101 de 2021 lowers the legal week to 42 hours from July 2026.
    pub max_weekly_hours: Decimal,
    /// Longest single shift before a warning is raised.
    pub max_consecutive_hours: Decimal,
    /// Shortest acceptable shift.
    pub min_shift_hours: Decimal,
    /// Minimum rest between the end of one shift and the start of the next.
    pub min_rest_between_shifts_hours: Decimal,
    /// Longest run of consecutive calendar days worked before a warning.
    pub max_consecutive_work_days: u32,
    /// Surcharges used when estimating shift cost.
    #[serde(default)]
    pub surcharges: Surcharges,
}

impl Default for LaborRules {
    fn default() -> Self {
        Self {
            max_weekly_hours: Decimal::new(42, 0),
            max_consecutive_hours: Decimal::new(12, 0),
            min_shift_hours: Decimal::ONE,
            min_rest_between_shifts_hours: Decimal::new(10, 0),
            max_consecutive_work_days: 6,
            surcharges: Surcharges::default(),
        }
    }
}

/// Business constants, loaded from `business.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRules {
    /// ISO currency code for costs (informational).
    pub currency: String,
    /// Weekly labor budget ceiling, in currency units.
    pub weekly_budget: Decimal,
    /// Utilization percentage above which the budget is flagged.
    pub budget_warning_threshold: Decimal,
    /// Minimum distinct employees per (date, location).
    pub min_staff_per_shift: u32,
    /// Time-to-live for cached query results.
    pub query_cache_ttl_seconds: u64,
    /// Maximum number of cached query results.
    pub query_cache_capacity: u64,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            currency: "COP".to_string(),
            weekly_budget: Decimal::new(10_000_000, 0),
            budget_warning_threshold: Decimal::new(85, 0),
            min_staff_per_shift: 2,
            query_cache_ttl_seconds: 300,
            query_cache_capacity: 1_000,
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Labor-law limits.
    pub labor: LaborRules,
    /// Business constants.
    pub business: BusinessRules,
}
