use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::organizations::models::{Organization, OrganizationStatus};

/// Compact entry for the organization catalog used by registration forms
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrganizationSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub status: OrganizationStatus,
}

/// Full organization record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationResponseDto {
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

impl From<Organization> for OrganizationResponseDto {
    fn from(o: Organization) -> Self {
        Self {
            id: o.id,
            name: o.name,
            status: o.status,
            leader_name: o.leader_name,
            address: o.address,
            member_count: o.member_count,
            organization_type: o.organization_type,
            contact_phone: o.contact_phone,
            contact_email: o.contact_email,
            created_at: o.created_at,
        }
    }
}
