//! Role-based permission model.
//!
//! Static capability tables per role, plus [`ActorPermissions`], a per-actor
//! copy narrowed to the actor's locations that answers every "can this actor
//! do X to Y" question for shifts and requests.

mod scoped;
mod tables;

pub use scoped::{ActorPermissions, BulkAction, LocationScope, RequestAction, ShiftOperation};
pub use tables::{
    Capability, EMPLOYEE_MAX_REQUESTS_PER_MONTH, LocationAccess, RequestPermissions,
    RequestTypeAccess, RolePermissions, SchedulePermissions,
};
