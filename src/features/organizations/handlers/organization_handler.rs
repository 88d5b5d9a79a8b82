use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::organizations::dtos::{OrganizationResponseDto, OrganizationSummaryDto};
use crate::features::organizations::services::OrganizationService;

/// List active organizations for the registration catalog
#[utoipa::path(
    get,
    path = "/api/organizations",
    responses(
        (status = 200, description = "List of active organizations", body = Vec<OrganizationSummaryDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "organizations",
    security(("bearer_auth" = []))
)]
pub async fn list_organizations(
    _user: AuthenticatedUser,
    State(service): State<Arc<OrganizationService>>,
) -> Result<Json<Vec<OrganizationSummaryDto>>> {
    let organizations = service.list_active().await?;
    Ok(Json(organizations))
}

/// Get an organization by id
#[utoipa::path(
    get,
    path = "/api/organizations/{id}",
    params(("id" = String, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Organization details", body = OrganizationResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Organization not found")
    ),
    tag = "organizations",
    security(("bearer_auth" = []))
)]
pub async fn get_organization(
    _user: AuthenticatedUser,
    State(service): State<Arc<OrganizationService>>,
    Path(id): Path<String>,
) -> Result<Json<OrganizationResponseDto>> {
    let organization = service.get_by_id(&id).await?;
    Ok(Json(organization))
}
