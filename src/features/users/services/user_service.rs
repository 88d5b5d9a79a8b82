use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::models::User;

const NOT_FOUND_MESSAGE: &str = "Usuario no encontrado";

/// Read-only service over the inspector/coordinator directory
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List users, newest first, optionally filtered by exact zone match
    pub async fn list(&self, zone: Option<&str>) -> Result<Vec<UserResponseDto>> {
        let users = match zone {
            Some(zone) if !zone.is_empty() => {
                sqlx::query_as::<_, User>(
                    r#"
                    SELECT id, name, email, role, assigned_zone, total_registrations, created_at
                    FROM users
                    WHERE assigned_zone = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(zone)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query_as::<_, User>(
                    r#"
                    SELECT id, name, email, role, assigned_zone, total_registrations, created_at
                    FROM users
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to fetch users: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Get a user by id
    pub async fn get_by_id(&self, id: &str) -> Result<UserResponseDto> {
        let id = Uuid::parse_str(id)
            .map_err(|_| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, assigned_zone, total_registrations, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        Ok(user.into())
    }
}
