use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Organization status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "organization_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrganizationStatus {
    Activa,
    Inactiva,
}

impl std::fmt::Display for OrganizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrganizationStatus::Activa => write!(f, "activa"),
            OrganizationStatus::Inactiva => write!(f, "inactiva"),
        }
    }
}

/// Database model for organization
#[derive(Debug, Clone, FromRow)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub status: OrganizationStatus,
    pub leader_name: Option<String>,
    pub address: Option<String>,
    pub member_count: i32,
    pub organization_type: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrganizationStatus::Activa).unwrap(),
            "\"activa\""
        );
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert!(serde_json::from_str::<OrganizationStatus>("\"suspendida\"").is_err());
    }
}
