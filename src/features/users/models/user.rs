use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// User role enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Inspector,
    Coordinator,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Inspector => write!(f, "inspector"),
            UserRole::Coordinator => write!(f, "coordinator"),
        }
    }
}

/// Database model for user (inspector / coordinator)
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub assigned_zone: Option<String>,
    pub total_registrations: i32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Inspector).unwrap(),
            "\"inspector\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Coordinator).unwrap(),
            "\"coordinator\""
        );
    }

    #[test]
    fn test_role_rejects_unknown_values() {
        assert!(serde_json::from_str::<UserRole>("\"admin\"").is_err());
    }
}
