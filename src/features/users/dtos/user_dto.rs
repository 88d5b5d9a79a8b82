use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::users::models::{User, UserRole};

/// Query parameters for the user directory
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct UserListQuery {
    /// Exact match on the user's assigned zone
    #[param(example = "Norte")]
    pub zone: Option<String>,
}

/// Response DTO for user directory entries
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub assigned_zone: Option<String>,
    pub total_registrations: i32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            assigned_zone: u.assigned_zone,
            total_registrations: u.total_registrations,
            created_at: u.created_at,
        }
    }
}
