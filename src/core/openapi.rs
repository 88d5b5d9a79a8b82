use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::core::error::ErrorResponse;
use crate::features::auth;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::merchants::{
    dtos as merchants_dtos, handlers as merchants_handlers, models as merchants_models,
};
use crate::features::organizations::{
    dtos as organizations_dtos, handlers as organizations_handlers,
    models as organizations_models,
};
use crate::features::users::{
    dtos as users_dtos, handlers as users_handlers, models as users_models,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Merchants
        merchants_handlers::create_merchant,
        merchants_handlers::list_merchants,
        merchants_handlers::list_statuses,
        merchants_handlers::get_merchant,
        merchants_handlers::update_merchant,
        merchants_handlers::delete_merchant,
        // Organizations
        organizations_handlers::list_organizations,
        organizations_handlers::get_organization,
        // Users
        users_handlers::list_users,
        users_handlers::get_user,
        // Dashboard
        dashboard_handlers::get_summary,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            auth::model::AuthenticatedUser,
            // Merchants
            merchants_models::MerchantStatus,
            merchants_models::StandType,
            merchants_dtos::CreateMerchantDto,
            merchants_dtos::UpdateMerchantDto,
            merchants_dtos::MerchantOrganizationDto,
            merchants_dtos::MerchantResponseDto,
            merchants_dtos::RegisterMerchantResponse,
            merchants_dtos::DeleteMerchantResponse,
            merchants_dtos::StatusBadgeDto,
            // Organizations
            organizations_models::OrganizationStatus,
            organizations_dtos::OrganizationSummaryDto,
            organizations_dtos::OrganizationResponseDto,
            // Users
            users_models::UserRole,
            users_dtos::UserResponseDto,
            // Dashboard
            dashboard_dtos::DelegationCount,
            dashboard_dtos::InspectorActivityDto,
            dashboard_dtos::DashboardSummaryDto,
        )
    ),
    tags(
        (name = "merchants", description = "Merchant registration and lifecycle"),
        (name = "organizations", description = "Organization directory (read-only)"),
        (name = "users", description = "Inspector/coordinator directory (read-only)"),
        (name = "dashboard", description = "Role-scoped dashboard aggregates"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "SIRECOVIP API",
        version = "0.1.0",
        description = "API del Sistema de Registro de Comerciantes en Vía Pública",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
