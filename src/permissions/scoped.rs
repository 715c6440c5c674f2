//! Per-actor permission view.

use serde::{Deserialize, Serialize};

use crate::models::{Actor, ApprovalStage, RequestStatus, RequestType, Role, ScheduleShift, TeamRequest};

use super::tables::{Capability, LocationAccess, RolePermissions};

/// Locations an actor reaches after narrowing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationScope {
    /// Every location.
    All,
    /// Only these location ids.
    Only(Vec<String>),
}

impl LocationScope {
    /// Returns true when `location_id` is inside the scope.
    pub fn contains(&self, location_id: &str) -> bool {
        match self {
            LocationScope::All => true,
            LocationScope::Only(ids) => ids.iter().any(|id| id == location_id),
        }
    }
}

/// Operations on a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftOperation {
    /// Create the shift.
    Create,
    /// Change the shift.
    Edit,
    /// Remove the shift.
    Delete,
}

/// Actions on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestAction {
    /// Read it.
    View,
    /// Change it.
    Edit,
    /// Remove it.
    Delete,
    /// Approve it at its current stage.
    Approve,
    /// Reject it at its current stage.
    Reject,
}

impl RequestAction {
    /// Lower-case verb for messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestAction::View => "view",
            RequestAction::Edit => "edit",
            RequestAction::Delete => "delete",
            RequestAction::Approve => "approve",
            RequestAction::Reject => "reject",
        }
    }
}

/// Batch actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    /// Approve every request in the batch.
    Approve,
    /// Reject every request in the batch.
    Reject,
}

impl BulkAction {
    /// The per-request action each batch member must pass.
    pub fn request_action(&self) -> RequestAction {
        match self {
            BulkAction::Approve => RequestAction::Approve,
            BulkAction::Reject => RequestAction::Reject,
        }
    }

    /// Lower-case verb for messages.
    pub fn as_str(&self) -> &'static str {
        self.request_action().as_str()
    }
}

/// A role table narrowed to one actor.
///
/// Built once per call from an explicit [`Actor`]; every query is a pure
/// function of the actor, the static table, and the entity passed in.
///
/// # Example
///
/// ```
/// use schedule_engine::models::{Actor, Role};
/// use schedule_engine::permissions::{ActorPermissions, Capability};
///
/// let supervisor = ActorPermissions::new(Actor::new("sup_1", Role::Supervisor, "loc_centro"));
/// assert!(supervisor.can(Capability::ApproveRequests));
/// assert!(supervisor.can_access_location("loc_centro"));
/// assert!(!supervisor.can_access_location("loc_norte"));
/// ```
#[derive(Debug, Clone)]
pub struct ActorPermissions {
    actor: Actor,
    table: &'static RolePermissions,
    scope: LocationScope,
}

impl ActorPermissions {
    /// Narrows the actor's role table to the actor's assigned locations.
    pub fn new(actor: Actor) -> Self {
        let table = RolePermissions::for_role(actor.role);
        let scope = match table.location_access {
            LocationAccess::All => LocationScope::All,
            LocationAccess::Assigned => LocationScope::Only(actor.location_ids.clone()),
        };
        Self {
            actor,
            table,
            scope,
        }
    }

    /// The acting user.
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// The acting user's role.
    pub fn role(&self) -> Role {
        self.actor.role
    }

    /// The narrowed location scope.
    pub fn scope(&self) -> &LocationScope {
        &self.scope
    }

    /// The underlying role table.
    pub fn table(&self) -> &'static RolePermissions {
        self.table
    }

    /// Pure role-table lookup.
    pub fn can(&self, capability: Capability) -> bool {
        self.table.allows(capability)
    }

    /// Returns true when the actor reaches `location_id`.
    pub fn can_access_location(&self, location_id: &str) -> bool {
        self.scope.contains(location_id)
    }

    /// Shift capability for the operation at the shift's location.
    pub fn can_manage_shift(&self, shift: &ScheduleShift, operation: ShiftOperation) -> bool {
        let capability = match operation {
            ShiftOperation::Create => Capability::CreateShifts,
            ShiftOperation::Edit => Capability::EditShifts,
            ShiftOperation::Delete => Capability::DeleteShifts,
        };
        self.can(capability) && self.can_access_location(&shift.location_id)
    }

    /// Own shift, team shift at an accessible location, or view-all.
    pub fn can_view_shift(&self, shift: &ScheduleShift) -> bool {
        (shift.employee_id == self.actor.id && self.can(Capability::ViewOwnShifts))
            || (self.can(Capability::ViewTeamShifts) && self.can_access_location(&shift.location_id))
            || self.can(Capability::ViewAllShifts)
    }

    /// Whether the actor may perform `action` on `request`.
    ///
    /// Approval and rejection additionally require the actor's role to match
    /// the request's current stage. Nobody ever reviews their own request.
    pub fn can_manage_request(&self, request: &TeamRequest, action: RequestAction) -> bool {
        let is_owner = request.is_owned_by(&self.actor.id);
        let in_scope = self.can_access_location(&request.location_id);
        let is_admin = self.role() == Role::BusinessAdmin;

        match action {
            RequestAction::View => {
                (is_owner && self.can(Capability::ViewOwnRequests))
                    || (self.can(Capability::ViewTeamRequests) && in_scope)
                    || self.can(Capability::ViewAllRequests)
            }
            RequestAction::Edit => {
                (is_owner
                    && matches!(request.status, RequestStatus::Draft | RequestStatus::Pending))
                    || (is_admin && in_scope)
            }
            RequestAction::Delete => {
                (is_owner && request.status == RequestStatus::Draft) || (is_admin && in_scope)
            }
            RequestAction::Approve | RequestAction::Reject => {
                let capability = if action == RequestAction::Approve {
                    Capability::ApproveRequests
                } else {
                    Capability::RejectRequests
                };
                !is_owner
                    && self.can(capability)
                    && request.stage().reviewer_roles().contains(&self.role())
                    && in_scope
            }
        }
    }

    /// Supervisor-only, from the supervisor stage, never on one's own request.
    pub fn can_escalate_request(&self, request: &TeamRequest) -> bool {
        self.role() == Role::Supervisor
            && self.can(Capability::EscalateRequests)
            && request.stage() == ApprovalStage::Supervisor
            && !request.is_owned_by(&self.actor.id)
            && self.can_access_location(&request.location_id)
    }

    /// All-or-nothing batch authorization.
    ///
    /// Requires the role-level bulk flag and per-request authorization for
    /// every member; stops at the first request that fails. An empty batch
    /// authorizes nothing.
    pub fn can_perform_bulk_action(&self, action: BulkAction, requests: &[TeamRequest]) -> bool {
        if !self.can(Capability::BulkActions) || requests.is_empty() {
            return false;
        }
        let per_request = action.request_action();
        requests
            .iter()
            .all(|request| self.can_manage_request(request, per_request))
    }

    /// Whether the actor may raise a request of this type, given how many
    /// they have already raised this month.
    pub fn can_submit_request(&self, request_type: RequestType, submitted_this_month: u32) -> bool {
        let requests = &self.table.requests;
        requests.create
            && requests.request_type_access.allows(request_type)
            && requests
                .max_requests_per_month
                .is_none_or(|max| submitted_this_month < max)
    }

    /// The subset of `requests` the actor may view, order preserved.
    pub fn visible_requests<'a>(&self, requests: &'a [TeamRequest]) -> Vec<&'a TeamRequest> {
        requests
            .iter()
            .filter(|r| self.can_manage_request(r, RequestAction::View))
            .collect()
    }

    /// The subset of `shifts` the actor may view, order preserved.
    pub fn visible_shifts<'a>(&self, shifts: &'a [ScheduleShift]) -> Vec<&'a ScheduleShift> {
        shifts.iter().filter(|s| self.can_view_shift(s)).collect()
    }
}
