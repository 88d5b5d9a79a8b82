use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::merchants::dtos::{
    get_extension_from_content_type, CreateMerchantDto, MerchantResponseDto, UpdateMerchantDto,
    UploadedImage,
};
use crate::features::merchants::models::{
    Merchant, MerchantStatus, MerchantWithOrganization, StandType,
};
use crate::modules::storage::MinIOClient;
use crate::shared::constants::{EVIDENCE_KEY_PREFIX, MERCHANT_LIST_LIMIT};

const NOT_FOUND_MESSAGE: &str = "Comerciante no encontrado";

const MERCHANT_WITH_ORG_SELECT: &str = r#"
    SELECT m.*, o.name AS organization_name
    FROM merchants m
    LEFT JOIN organizations o ON o.id = m.organization_id
"#;

/// Service for the merchant record lifecycle
pub struct MerchantService {
    pool: PgPool,
    minio_client: Arc<MinIOClient>,
}

impl MerchantService {
    pub fn new(pool: PgPool, minio_client: Arc<MinIOClient>) -> Self {
        Self { pool, minio_client }
    }

    /// Register a new merchant.
    ///
    /// The photo upload (when present) completes and yields its public URL
    /// before the row insert. `status` and `stand_type` are always the
    /// server-assigned initial values; `registered_by` is the caller.
    /// If the insert fails after a successful upload, the uploaded photo is
    /// deleted again so no orphaned blob remains.
    pub async fn register(
        &self,
        dto: CreateMerchantDto,
        image: Option<UploadedImage>,
        registered_by: Uuid,
    ) -> Result<MerchantResponseDto> {
        let uploaded = match &image {
            Some(image) => Some(self.upload_stall_photo(image).await?),
            None => None,
        };
        let (photo_key, photo_url) = match uploaded {
            Some((key, url)) => (Some(key), Some(url)),
            None => (None, None),
        };

        let insert_result = sqlx::query_as::<_, Merchant>(
            r#"
            INSERT INTO merchants (
                name, business, address, delegation, latitude, longitude,
                organization_id, schedule_start, schedule_end,
                status, stand_type, registered_by, stall_photo_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.business)
        .bind(&dto.address)
        .bind(&dto.delegation)
        .bind(dto.latitude)
        .bind(dto.longitude)
        .bind(dto.organization_id)
        .bind(&dto.schedule_start)
        .bind(&dto.schedule_end)
        .bind(MerchantStatus::EnObservacion)
        .bind(StandType::Semifijo)
        .bind(registered_by)
        .bind(&photo_url)
        .fetch_one(&self.pool)
        .await;

        let merchant = match insert_result {
            Ok(merchant) => merchant,
            Err(e) => {
                // Compensating delete so a failed insert leaves no orphaned photo
                if let Some(key) = &photo_key {
                    if let Err(del_err) = self.minio_client.delete(key).await {
                        warn!("Failed to delete orphaned photo '{}': {}", key, del_err);
                    }
                }
                tracing::error!("Failed to insert merchant: {:?}", e);
                return Err(AppError::Database(e));
            }
        };

        // Bump the registering user's counter; the registration itself is
        // already durable, so a failure here only logs.
        if let Err(e) = sqlx::query(
            "UPDATE users SET total_registrations = total_registrations + 1 WHERE id = $1",
        )
        .bind(registered_by)
        .execute(&self.pool)
        .await
        {
            warn!(
                "Failed to bump total_registrations for user {}: {:?}",
                registered_by, e
            );
        }

        info!(
            "Merchant registered: id={}, registered_by={}, photo={}",
            merchant.id,
            registered_by,
            photo_key.is_some()
        );

        let organization_name = self.organization_name(merchant.organization_id).await?;
        Ok(MerchantWithOrganization {
            merchant,
            organization_name,
        }
        .into())
    }

    /// List the most recent merchants (newest first, capped at 20),
    /// each enriched with its organization's display name
    pub async fn list(&self) -> Result<Vec<MerchantResponseDto>> {
        let query = format!("{} ORDER BY m.created_at DESC LIMIT $1", MERCHANT_WITH_ORG_SELECT);
        let rows = sqlx::query_as::<_, MerchantWithOrganization>(&query)
            .bind(MERCHANT_LIST_LIMIT)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch merchants: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a merchant by id
    pub async fn get_by_id(&self, id: &str) -> Result<MerchantResponseDto> {
        let id = parse_merchant_id(id)?;
        let query = format!("{} WHERE m.id = $1", MERCHANT_WITH_ORG_SELECT);
        let row = sqlx::query_as::<_, MerchantWithOrganization>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch merchant {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        Ok(row.into())
    }

    /// Update a merchant. Omitted fields keep their stored value; a new
    /// photo replaces the stored one (the old blob is deleted best-effort).
    pub async fn update(
        &self,
        id: &str,
        dto: UpdateMerchantDto,
        image: Option<UploadedImage>,
    ) -> Result<MerchantResponseDto> {
        let id = parse_merchant_id(id)?;
        let existing = sqlx::query_as::<_, Merchant>("SELECT * FROM merchants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        let uploaded = match &image {
            Some(image) => Some(self.upload_stall_photo(image).await?),
            None => None,
        };
        let (photo_key, photo_url) = match uploaded {
            Some((key, url)) => (Some(key), Some(url)),
            None => (None, None),
        };

        let update_result = sqlx::query_as::<_, Merchant>(
            r#"
            UPDATE merchants SET
                name = COALESCE($2, name),
                business = COALESCE($3, business),
                address = COALESCE($4, address),
                delegation = COALESCE($5, delegation),
                latitude = COALESCE($6, latitude),
                longitude = COALESCE($7, longitude),
                organization_id = COALESCE($8, organization_id),
                schedule_start = COALESCE($9, schedule_start),
                schedule_end = COALESCE($10, schedule_end),
                status = COALESCE($11, status),
                stall_photo_url = COALESCE($12, stall_photo_url)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.business)
        .bind(&dto.address)
        .bind(&dto.delegation)
        .bind(dto.latitude)
        .bind(dto.longitude)
        .bind(dto.organization_id)
        .bind(&dto.schedule_start)
        .bind(&dto.schedule_end)
        .bind(dto.status)
        .bind(&photo_url)
        .fetch_one(&self.pool)
        .await;

        let merchant = match update_result {
            Ok(merchant) => merchant,
            Err(e) => {
                if let Some(key) = &photo_key {
                    if let Err(del_err) = self.minio_client.delete(key).await {
                        warn!("Failed to delete orphaned photo '{}': {}", key, del_err);
                    }
                }
                tracing::error!("Failed to update merchant {}: {:?}", id, e);
                return Err(AppError::Database(e));
            }
        };

        // The replaced photo is no longer referenced anywhere
        if photo_key.is_some() {
            if let Some(old_url) = &existing.stall_photo_url {
                self.delete_photo_by_url(old_url).await;
            }
        }

        info!("Merchant updated: id={}", merchant.id);

        let organization_name = self.organization_name(merchant.organization_id).await?;
        Ok(MerchantWithOrganization {
            merchant,
            organization_name,
        }
        .into())
    }

    /// Delete a merchant and its evidence photo
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_merchant_id(id)?;
        let existing = sqlx::query_as::<_, Merchant>("SELECT * FROM merchants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        sqlx::query("DELETE FROM merchants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete merchant {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if let Some(url) = &existing.stall_photo_url {
            self.delete_photo_by_url(url).await;
        }

        info!("Merchant deleted: id={}", id);
        Ok(())
    }

    /// Upload a stall photo and return its (object key, public URL)
    async fn upload_stall_photo(&self, image: &UploadedImage) -> Result<(String, String)> {
        let suffix = Uuid::new_v4().simple().to_string();
        let path = evidence_object_path(
            &image.content_type,
            &image.original_filename,
            Utc::now().timestamp_millis(),
            &suffix[..8],
        );
        let key = self.minio_client.generate_key(&path);

        self.minio_client
            .upload(&key, image.data.clone(), &image.content_type)
            .await?;

        debug!("Stall photo uploaded: {}", key);

        let url = self.minio_client.get_public_url(&key);
        Ok((key, url))
    }

    /// Best-effort blob removal for a photo that is no longer referenced
    async fn delete_photo_by_url(&self, url: &str) {
        let Some(key) = self.minio_client.extract_key_from_url(url) else {
            warn!("Could not derive object key from photo URL '{}'", url);
            return;
        };
        if let Err(e) = self.minio_client.delete(&key).await {
            warn!("Failed to delete photo '{}': {}", key, e);
        }
    }

    async fn organization_name(&self, organization_id: Option<Uuid>) -> Result<Option<String>> {
        let Some(organization_id) = organization_id else {
            return Ok(None);
        };

        let name =
            sqlx::query_scalar::<_, String>("SELECT name FROM organizations WHERE id = $1")
                .bind(organization_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Failed to fetch organization {}: {:?}",
                        organization_id,
                        e
                    );
                    AppError::Database(e)
                })?;

        Ok(name)
    }
}

/// Malformed ids behave like missing records, never like server errors
fn parse_merchant_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
}

/// Object path for a stall photo: `puestos/<epoch-millis>_<suffix>.<ext>`,
/// preserving the original extension
fn evidence_object_path(
    content_type: &str,
    original_filename: &str,
    now_millis: i64,
    suffix: &str,
) -> String {
    let extension = get_extension_from_content_type(content_type)
        .unwrap_or_else(|| original_filename.rsplit('.').next().unwrap_or("bin"));
    format!("{}/{}_{}.{}", EVIDENCE_KEY_PREFIX, now_millis, suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_path_prefix_and_extension() {
        let path = evidence_object_path("image/jpeg", "stall.jpeg", 1712000000000, "ab12cd34");
        assert_eq!(path, "puestos/1712000000000_ab12cd34.jpg");
    }

    #[test]
    fn test_evidence_path_falls_back_to_filename_extension() {
        let path = evidence_object_path("image/tiff", "stall.tiff", 1712000000000, "ab12cd34");
        assert_eq!(path, "puestos/1712000000000_ab12cd34.tiff");
    }

    #[test]
    fn test_evidence_path_differs_by_suffix() {
        let a = evidence_object_path("image/png", "a.png", 1712000000000, "aaaaaaaa");
        let b = evidence_object_path("image/png", "a.png", 1712000000000, "bbbbbbbb");
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        assert!(matches!(
            parse_merchant_id("does-not-exist"),
            Err(AppError::NotFound(_))
        ));
        assert!(parse_merchant_id("5a3c1bd0-95a3-4e2b-a7a1-6a3a66c04e0f").is_ok());
    }
}
