use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::organizations::dtos::{OrganizationResponseDto, OrganizationSummaryDto};
use crate::features::organizations::models::{Organization, OrganizationStatus};

const NOT_FOUND_MESSAGE: &str = "Organización no encontrada";

/// Read-only service over the organization directory
pub struct OrganizationService {
    pool: PgPool,
}

impl OrganizationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List active organizations, ordered alphabetically.
    /// Inactive organizations never appear in the public catalog.
    pub async fn list_active(&self) -> Result<Vec<OrganizationSummaryDto>> {
        let organizations = sqlx::query_as::<_, OrganizationSummaryDto>(
            r#"
            SELECT id, name, status
            FROM organizations
            WHERE status = $1
            ORDER BY name ASC
            "#,
        )
        .bind(OrganizationStatus::Activa)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch organizations: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(organizations)
    }

    /// Get an organization by id
    pub async fn get_by_id(&self, id: &str) -> Result<OrganizationResponseDto> {
        let id = Uuid::parse_str(id)
            .map_err(|_| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        let organization =
            sqlx::query_as::<_, Organization>("SELECT * FROM organizations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch organization {}: {:?}", id, e);
                    AppError::Database(e)
                })?
                .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        Ok(organization.into())
    }
}
