use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::{ROLE_COORDINATOR, ROLE_INSPECTOR};

/// The caller identity resolved from a validated bearer token.
///
/// Handlers receive this as an explicit argument; it is never read from
/// ambient state. `id` matches the `users` table primary key and becomes
/// `registered_by` on merchants created by this caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Coordinators see system-wide dashboard figures
    pub fn is_coordinator(&self) -> bool {
        self.has_role(ROLE_COORDINATOR)
    }

    /// Field inspectors register and monitor merchants in their zone
    #[allow(dead_code)]
    pub fn is_inspector(&self) -> bool {
        self.has_role(ROLE_INSPECTOR)
    }
}
