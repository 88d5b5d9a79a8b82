use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Merchant count for one delegation
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DelegationCount {
    pub delegation: String,
    pub merchant_count: i64,
}

/// Registration activity for one inspector
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InspectorActivityDto {
    pub id: Uuid,
    pub name: String,
    pub merchant_count: i64,
}

/// Aggregates backing the dashboard views.
///
/// Coordinators get system-wide figures; inspectors get figures scoped to
/// their own registrations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub total_merchants: i64,
    pub sin_foco_count: i64,
    pub en_observacion_count: i64,
    pub prioritario_count: i64,
    pub registered_this_week: i64,
    pub registered_this_month: i64,
    pub by_delegation: Vec<DelegationCount>,
    pub top_inspectors: Vec<InspectorActivityDto>,
}
