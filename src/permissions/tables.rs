//! Static, role-indexed capability tables.
//!
//! One immutable [`RolePermissions`] per [`Role`]. Per-user location
//! narrowing happens in [`super::ActorPermissions`]; the tables themselves
//! never change at runtime.

use serde::Serialize;

use crate::models::{RequestType, Role};

/// Everything a role may be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// See one's own shifts.
    ViewOwnShifts,
    /// See shifts at one's locations.
    ViewTeamShifts,
    /// See every shift.
    ViewAllShifts,
    /// Create shifts.
    CreateShifts,
    /// Edit shifts.
    EditShifts,
    /// Delete shifts.
    DeleteShifts,
    /// Publish a week's schedule.
    PublishSchedule,
    /// See labor cost and budget figures.
    ViewBudget,
    /// Add, edit, and deactivate employees.
    ManageEmployees,
    /// See one's own requests.
    ViewOwnRequests,
    /// See requests at one's locations.
    ViewTeamRequests,
    /// See every request.
    ViewAllRequests,
    /// Raise new requests.
    CreateRequests,
    /// Approve requests at a matching stage.
    ApproveRequests,
    /// Reject requests at a matching stage.
    RejectRequests,
    /// Escalate requests to business-admin review.
    EscalateRequests,
    /// Approve or reject many requests at once.
    BulkActions,
}

/// Which locations a role reaches before per-user narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationAccess {
    /// Every location.
    All,
    /// Only the locations the user is assigned to.
    Assigned,
}

/// Which request types a role may raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestTypeAccess {
    /// Every type.
    All,
    /// Only the listed types.
    Only(&'static [RequestType]),
}

impl RequestTypeAccess {
    /// Returns true when `request_type` is allowed.
    pub fn allows(&self, request_type: RequestType) -> bool {
        match self {
            RequestTypeAccess::All => true,
            RequestTypeAccess::Only(types) => types.contains(&request_type),
        }
    }
}

/// Scheduling-domain capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchedulePermissions {
    /// See one's own shifts.
    pub view_own_shifts: bool,
    /// See shifts at one's locations.
    pub view_team_shifts: bool,
    /// See every shift.
    pub view_all_shifts: bool,
    /// Create shifts.
    pub create_shifts: bool,
    /// Edit shifts.
    pub edit_shifts: bool,
    /// Delete shifts.
    pub delete_shifts: bool,
    /// Publish a week's schedule.
    pub publish_schedule: bool,
    /// See labor cost and budget figures.
    pub view_budget: bool,
    /// Manage the employee roster.
    pub manage_employees: bool,
}

/// Request-domain capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestPermissions {
    /// See one's own requests.
    pub view_own: bool,
    /// See requests at one's locations.
    pub view_team: bool,
    /// See every request.
    pub view_all: bool,
    /// Raise requests.
    pub create: bool,
    /// Approve at a matching stage.
    pub approve: bool,
    /// Reject at a matching stage.
    pub reject: bool,
    /// Escalate from the supervisor stage.
    pub escalate: bool,
    /// Act on batches.
    pub bulk_actions: bool,
    /// Types the role may raise.
    pub request_type_access: RequestTypeAccess,
    /// Monthly quota of raised requests; `None` is unlimited.
    pub max_requests_per_month: Option<u32>,
}

/// The full capability table for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RolePermissions {
    /// The role this table describes.
    pub role: Role,
    /// Location reach before narrowing.
    pub location_access: LocationAccess,
    /// Scheduling capabilities.
    pub schedule: SchedulePermissions,
    /// Request capabilities.
    pub requests: RequestPermissions,
}

const EMPLOYEE_REQUEST_TYPES: &[RequestType] = &[
    RequestType::ShiftChange,
    RequestType::Vacation,
    RequestType::SickLeave,
    RequestType::PersonalLeave,
    RequestType::TimeOff,
    RequestType::EarlyLeave,
    RequestType::LateArrival,
];

/// Monthly request quota for employees.
pub const EMPLOYEE_MAX_REQUESTS_PER_MONTH: u32 = 10;

static EMPLOYEE: RolePermissions = RolePermissions {
    role: Role::Employee,
    location_access: LocationAccess::Assigned,
    schedule: SchedulePermissions {
        view_own_shifts: true,
        view_team_shifts: false,
        view_all_shifts: false,
        create_shifts: false,
        edit_shifts: false,
        delete_shifts: false,
        publish_schedule: false,
        view_budget: false,
        manage_employees: false,
    },
    requests: RequestPermissions {
        view_own: true,
        view_team: false,
        view_all: false,
        create: true,
        approve: false,
        reject: false,
        escalate: false,
        bulk_actions: false,
        request_type_access: RequestTypeAccess::Only(EMPLOYEE_REQUEST_TYPES),
        max_requests_per_month: Some(EMPLOYEE_MAX_REQUESTS_PER_MONTH),
    },
};

static SUPERVISOR: RolePermissions = RolePermissions {
    role: Role::Supervisor,
    location_access: LocationAccess::Assigned,
    schedule: SchedulePermissions {
        view_own_shifts: true,
        view_team_shifts: true,
        view_all_shifts: false,
        create_shifts: true,
        edit_shifts: true,
        delete_shifts: true,
        publish_schedule: true,
        view_budget: true,
        manage_employees: false,
    },
    requests: RequestPermissions {
        view_own: true,
        view_team: true,
        view_all: false,
        create: true,
        approve: true,
        reject: true,
        escalate: true,
        bulk_actions: true,
        request_type_access: RequestTypeAccess::All,
        max_requests_per_month: None,
    },
};

static BUSINESS_ADMIN: RolePermissions = RolePermissions {
    role: Role::BusinessAdmin,
    location_access: LocationAccess::All,
    schedule: SchedulePermissions {
        view_own_shifts: true,
        view_team_shifts: true,
        view_all_shifts: true,
        create_shifts: true,
        edit_shifts: true,
        delete_shifts: true,
        publish_schedule: true,
        view_budget: true,
        manage_employees: true,
    },
    requests: RequestPermissions {
        view_own: true,
        view_team: true,
        view_all: true,
        create: true,
        approve: true,
        reject: true,
        escalate: false,
        bulk_actions: true,
        request_type_access: RequestTypeAccess::All,
        max_requests_per_month: None,
    },
};

impl RolePermissions {
    /// The static table for a role.
    pub fn for_role(role: Role) -> &'static RolePermissions {
        match role {
            Role::Employee => &EMPLOYEE,
            Role::Supervisor => &SUPERVISOR,
            Role::BusinessAdmin => &BUSINESS_ADMIN,
        }
    }

    /// Pure table lookup.
    pub fn allows(&self, capability: Capability) -> bool {
        let s = &self.schedule;
        let r = &self.requests;
        match capability {
            Capability::ViewOwnShifts => s.view_own_shifts,
            Capability::ViewTeamShifts => s.view_team_shifts,
            Capability::ViewAllShifts => s.view_all_shifts,
            Capability::CreateShifts => s.create_shifts,
            Capability::EditShifts => s.edit_shifts,
            Capability::DeleteShifts => s.delete_shifts,
            Capability::PublishSchedule => s.publish_schedule,
            Capability::ViewBudget => s.view_budget,
            Capability::ManageEmployees => s.manage_employees,
            Capability::ViewOwnRequests => r.view_own,
            Capability::ViewTeamRequests => r.view_team,
            Capability::ViewAllRequests => r.view_all,
            Capability::CreateRequests => r.create,
            Capability::ApproveRequests => r.approve,
            Capability::RejectRequests => r.reject,
            Capability::EscalateRequests => r.escalate,
            Capability::BulkActions => r.bulk_actions,
        }
    }
}
