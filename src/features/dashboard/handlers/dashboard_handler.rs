use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::dashboard::services::DashboardService;

/// Dashboard summary for the authenticated caller
///
/// Coordinators receive system-wide figures; inspectors receive figures
/// scoped to their own registrations.
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummaryDto),
        (status = 401, description = "Unauthorized")
    ),
    tag = "dashboard",
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    user: AuthenticatedUser,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<DashboardSummaryDto>> {
    let summary = service.get_summary(&user).await?;
    Ok(Json(summary))
}
