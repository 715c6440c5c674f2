//! Actors and roles.
//!
//! Every permission check and workflow transition receives the acting user
//! explicitly; nothing in the engine reads a "current user" from ambient
//! state.

use serde::{Deserialize, Serialize};

/// A user's role within the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Works shifts and submits requests.
    Employee,
    /// Runs one or more locations; first-stage reviewer.
    Supervisor,
    /// Owns the business; final-stage reviewer.
    BusinessAdmin,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Supervisor => "SUPERVISOR",
            Role::BusinessAdmin => "BUSINESS_ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user performing an operation.
///
/// Identity resolution happens outside the engine; callers pass a fully
/// hydrated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// User id; matches `employee_id` on the actor's own requests.
    pub id: String,
    /// The actor's role.
    pub role: Role,
    /// Locations the actor is assigned to.
    #[serde(default)]
    pub location_ids: Vec<String>,
}

impl Actor {
    /// Creates an actor assigned to a single location.
    pub fn new(id: impl Into<String>, role: Role, location_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            location_ids: vec![location_id.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&Role::BusinessAdmin).unwrap(),
            "\"BUSINESS_ADMIN\""
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"SUPERVISOR\"").unwrap(),
            Role::Supervisor
        );
    }

    #[test]
    fn test_role_display_matches_wire_name() {
        assert_eq!(Role::Employee.to_string(), "EMPLOYEE");
    }

    #[test]
    fn test_actor_new_assigns_single_location() {
        let actor = Actor::new("sup_1", Role::Supervisor, "loc_centro");
        assert_eq!(actor.location_ids, vec!["loc_centro".to_string()]);
    }

    #[test]
    fn test_actor_locations_default_to_empty() {
        let actor: Actor = serde_json::from_str(r#"{"id": "adm_1", "role": "BUSINESS_ADMIN"}"#)
            .unwrap();
        assert!(actor.location_ids.is_empty());
    }
}
