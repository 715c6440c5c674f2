//! Core data models for the scheduling engine.
//!
//! This module contains all the domain models used throughout the engine.

mod actor;
mod clock;
mod employee;
mod finding;
mod request;
mod shift;

pub use actor::{Actor, Role};
pub use clock::{
    MINUTES_PER_DAY, format_clock_time, hhmm, hhmm_option, minutes_of_day, parse_clock_time,
    shift_duration_minutes,
};
pub use employee::{DayAvailability, Employee};
pub use finding::{
    EntityKind, EntityRef, FindingKind, FindingType, FixAction, FixSuggestion, Severity,
    ValidationFinding, ValidationResult, ValidationSummary,
};
pub use request::{
    ApprovalFlow, ApprovalReview, ApprovalStage, FlowConfig, RequestPriority, RequestStatus,
    RequestType, ReviewDecision, ReviewLog, TeamRequest,
};
pub use shift::{
    RestDay, ScheduleShift, ShiftDraft, ShiftStatus, ShiftType, UNSAVED_SHIFT_ID,
    estimate_shift_cost,
};
