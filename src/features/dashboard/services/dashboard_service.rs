use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::dashboard::dtos::{
    DashboardSummaryDto, DelegationCount, InspectorActivityDto,
};

#[derive(Debug, FromRow)]
struct SummaryCounts {
    total_merchants: i64,
    sin_foco_count: i64,
    en_observacion_count: i64,
    prioritario_count: i64,
    registered_this_week: i64,
    registered_this_month: i64,
}

/// Service for dashboard aggregate queries
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the dashboard summary for the caller.
    ///
    /// Coordinators see all merchants; inspectors only those they
    /// registered.
    pub async fn get_summary(&self, user: &AuthenticatedUser) -> Result<DashboardSummaryDto> {
        let scope: Option<Uuid> = if user.is_coordinator() {
            None
        } else {
            Some(user.id)
        };

        let counts = sqlx::query_as::<_, SummaryCounts>(
            r#"
            SELECT
                COUNT(*) AS total_merchants,
                COUNT(*) FILTER (WHERE status = 'sin-foco') AS sin_foco_count,
                COUNT(*) FILTER (WHERE status = 'en-observacion') AS en_observacion_count,
                COUNT(*) FILTER (WHERE status = 'prioritario') AS prioritario_count,
                COUNT(*) FILTER (WHERE created_at >= date_trunc('week', CURRENT_DATE)) AS registered_this_week,
                COUNT(*) FILTER (WHERE created_at >= date_trunc('month', CURRENT_DATE)) AS registered_this_month
            FROM merchants
            WHERE ($1::uuid IS NULL OR registered_by = $1)
            "#,
        )
        .bind(scope)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get summary counts: {:?}", e);
            AppError::Database(e)
        })?;

        let by_delegation = sqlx::query_as::<_, DelegationCount>(
            r#"
            SELECT delegation, COUNT(*) AS merchant_count
            FROM merchants
            WHERE ($1::uuid IS NULL OR registered_by = $1)
            GROUP BY delegation
            ORDER BY COUNT(*) DESC, delegation ASC
            "#,
        )
        .bind(scope)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get delegation counts: {:?}", e);
            AppError::Database(e)
        })?;

        let top_inspectors = sqlx::query_as::<_, InspectorActivityDto>(
            r#"
            SELECT u.id, u.name, COUNT(m.id) AS merchant_count
            FROM users u
            JOIN merchants m ON m.registered_by = u.id
            WHERE ($1::uuid IS NULL OR u.id = $1)
            GROUP BY u.id, u.name
            ORDER BY COUNT(m.id) DESC, u.name ASC
            LIMIT 5
            "#,
        )
        .bind(scope)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get inspector activity: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(DashboardSummaryDto {
            total_merchants: counts.total_merchants,
            sin_foco_count: counts.sin_foco_count,
            en_observacion_count: counts.en_observacion_count,
            prioritario_count: counts.prioritario_count,
            registered_this_week: counts.registered_this_week,
            registered_this_month: counts.registered_this_month,
            by_delegation,
            top_inspectors,
        })
    }
}
