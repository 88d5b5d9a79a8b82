use axum::{
    body::Body,
    extract::{
        multipart::{Field, Multipart},
        FromRequest, Request,
    },
    http::header,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::merchants::models::{
    MerchantStatus, MerchantWithOrganization, StandType,
};
use crate::shared::validation::SCHEDULE_REGEX;

/// Allowed MIME types for stall photo uploads
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
];

/// Maximum upload size in bytes (5MB)
pub const MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

/// Check if a MIME type is allowed
pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

/// Get file extension from content type
pub fn get_extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "application/pdf" => Some("pdf"),
        _ => None,
    }
}

/// An uploaded stall photo, already gated on MIME type and size
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub original_filename: String,
    pub content_type: String,
}

/// Request DTO for registering a merchant.
///
/// `status` and `stand_type` are server-owned: the created row always gets
/// `en-observacion` / `semifijo` and any client-supplied value for either
/// field is ignored. Address and schedule are optional; the schedule must
/// be 24-hour HH:MM when present.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMerchantDto {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "business is required"))]
    pub business: String,

    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 255, message = "delegation is required"))]
    pub delegation: String,

    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "longitude must be between -180 and 180"
    ))]
    pub longitude: f64,

    pub organization_id: Option<Uuid>,

    #[validate(regex(path = *SCHEDULE_REGEX, message = "schedule_start must be HH:MM"))]
    pub schedule_start: Option<String>,

    #[validate(regex(path = *SCHEDULE_REGEX, message = "schedule_end must be HH:MM"))]
    pub schedule_end: Option<String>,
}

/// Request DTO for updating a merchant. Every field is optional; omitted
/// fields keep their stored value. `status` is the inspection-workflow
/// mutation path and must be one of the closed enumeration values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMerchantDto {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "business must not be empty"))]
    pub business: Option<String>,

    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 255, message = "delegation must not be empty"))]
    pub delegation: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "longitude must be between -180 and 180"
    ))]
    pub longitude: Option<f64>,

    pub organization_id: Option<Uuid>,

    #[validate(regex(path = *SCHEDULE_REGEX, message = "schedule_start must be HH:MM"))]
    pub schedule_start: Option<String>,

    #[validate(regex(path = *SCHEDULE_REGEX, message = "schedule_end must be HH:MM"))]
    pub schedule_end: Option<String>,

    pub status: Option<MerchantStatus>,
}

/// Registration payload: JSON body or multipart form with an optional
/// `image` part. The MIME/size gate runs here, before any business logic.
#[derive(Debug)]
pub struct CreateMerchantPayload {
    pub dto: CreateMerchantDto,
    pub image: Option<UploadedImage>,
}

/// Update payload, same multipart-or-JSON shape as create
#[derive(Debug)]
pub struct UpdateMerchantPayload {
    pub dto: UpdateMerchantDto,
    pub image: Option<UploadedImage>,
}

fn is_multipart(req: &Request<Body>) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

impl<S> FromRequest<S> for CreateMerchantPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read multipart data: {}", e))
            })?;
            Self::from_multipart(multipart).await
        } else {
            let dto = AppJson::<CreateMerchantDto>::from_request(req, state)
                .await
                .map_err(|r| AppError::BadRequest(r.message()))?
                .0;
            Ok(Self { dto, image: None })
        }
    }
}

impl CreateMerchantPayload {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut name: Option<String> = None;
        let mut business: Option<String> = None;
        let mut address: Option<String> = None;
        let mut delegation: Option<String> = None;
        let mut latitude: Option<f64> = None;
        let mut longitude: Option<f64> = None;
        let mut organization_id: Option<Uuid> = None;
        let mut schedule_start: Option<String> = None;
        let mut schedule_end: Option<String> = None;
        let mut image: Option<UploadedImage> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            debug!("Failed to read multipart field: {}", e);
            AppError::BadRequest(format!("Failed to read multipart data: {}", e))
        })? {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "image" => image = Some(read_image_field(field).await?),
                "name" => name = Some(read_text_field(field, "name").await?),
                "business" => business = Some(read_text_field(field, "business").await?),
                "address" => address = Some(read_text_field(field, "address").await?),
                "delegation" => delegation = Some(read_text_field(field, "delegation").await?),
                "latitude" => {
                    latitude = Some(parse_f64(
                        &read_text_field(field, "latitude").await?,
                        "latitude",
                    )?)
                }
                "longitude" => {
                    longitude = Some(parse_f64(
                        &read_text_field(field, "longitude").await?,
                        "longitude",
                    )?)
                }
                "organization_id" => {
                    let text = read_text_field(field, "organization_id").await?;
                    if !text.is_empty() {
                        organization_id = Some(parse_uuid(&text, "organization_id")?);
                    }
                }
                "schedule_start" => {
                    schedule_start = Some(read_text_field(field, "schedule_start").await?)
                }
                "schedule_end" => {
                    schedule_end = Some(read_text_field(field, "schedule_end").await?)
                }
                // status and stand_type are server-owned: any client-supplied
                // value is ignored here, like every other unknown field.
                _ => {
                    debug!("Ignoring unknown field: {}", field_name);
                }
            }
        }

        let dto = CreateMerchantDto {
            name: name.ok_or_else(|| AppError::BadRequest("name is required".to_string()))?,
            business: business
                .ok_or_else(|| AppError::BadRequest("business is required".to_string()))?,
            address,
            delegation: delegation
                .ok_or_else(|| AppError::BadRequest("delegation is required".to_string()))?,
            latitude: latitude
                .ok_or_else(|| AppError::BadRequest("latitude is required".to_string()))?,
            longitude: longitude
                .ok_or_else(|| AppError::BadRequest("longitude is required".to_string()))?,
            organization_id,
            schedule_start,
            schedule_end,
        };

        Ok(Self { dto, image })
    }
}

impl<S> FromRequest<S> for UpdateMerchantPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read multipart data: {}", e))
            })?;
            Self::from_multipart(multipart).await
        } else {
            let dto = AppJson::<UpdateMerchantDto>::from_request(req, state)
                .await
                .map_err(|r| AppError::BadRequest(r.message()))?
                .0;
            Ok(Self { dto, image: None })
        }
    }
}

impl UpdateMerchantPayload {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut dto = UpdateMerchantDto::default();
        let mut image: Option<UploadedImage> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            debug!("Failed to read multipart field: {}", e);
            AppError::BadRequest(format!("Failed to read multipart data: {}", e))
        })? {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "image" => image = Some(read_image_field(field).await?),
                "name" => dto.name = Some(read_text_field(field, "name").await?),
                "business" => dto.business = Some(read_text_field(field, "business").await?),
                "address" => dto.address = Some(read_text_field(field, "address").await?),
                "delegation" => {
                    dto.delegation = Some(read_text_field(field, "delegation").await?)
                }
                "latitude" => {
                    dto.latitude = Some(parse_f64(
                        &read_text_field(field, "latitude").await?,
                        "latitude",
                    )?)
                }
                "longitude" => {
                    dto.longitude = Some(parse_f64(
                        &read_text_field(field, "longitude").await?,
                        "longitude",
                    )?)
                }
                "organization_id" => {
                    let text = read_text_field(field, "organization_id").await?;
                    if !text.is_empty() {
                        dto.organization_id = Some(parse_uuid(&text, "organization_id")?);
                    }
                }
                "schedule_start" => {
                    dto.schedule_start = Some(read_text_field(field, "schedule_start").await?)
                }
                "schedule_end" => {
                    dto.schedule_end = Some(read_text_field(field, "schedule_end").await?)
                }
                "status" => {
                    let text = read_text_field(field, "status").await?;
                    let status = text.parse::<MerchantStatus>().map_err(|_| {
                        AppError::BadRequest(format!("Unknown status '{}'", text))
                    })?;
                    dto.status = Some(status);
                }
                // stand_type stays server-owned; unknown fields are ignored
                _ => {
                    debug!("Ignoring unknown field: {}", field_name);
                }
            }
        }

        Ok(Self { dto, image })
    }
}

async fn read_text_field(field: Field<'_>, name: &str) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read field '{}': {}", name, e)))
}

async fn read_image_field(field: Field<'_>) -> Result<UploadedImage, AppError> {
    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    if !is_mime_type_allowed(&content_type) {
        return Err(AppError::BadRequest(format!(
            "File type '{}' is not allowed. Allowed types: {}",
            content_type,
            ALLOWED_MIME_TYPES.join(", ")
        )));
    }

    let original_filename = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unnamed".to_string());

    let data = field.bytes().await.map_err(|e| {
        debug!("Failed to read file bytes: {}", e);
        AppError::BadRequest(format!("Failed to read file data: {}", e))
    })?;

    if data.len() > MAX_UPLOAD_SIZE {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {} bytes ({} MB)",
            MAX_UPLOAD_SIZE,
            MAX_UPLOAD_SIZE / 1024 / 1024
        )));
    }

    Ok(UploadedImage {
        data: data.to_vec(),
        original_filename,
        content_type,
    })
}

fn parse_f64(text: &str, name: &str) -> Result<f64, AppError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| AppError::BadRequest(format!("{} must be a valid number", name)))
}

fn parse_uuid(text: &str, name: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(text.trim())
        .map_err(|_| AppError::BadRequest(format!("{} must be a valid UUID", name)))
}

/// Inline organization reference on merchant responses.
/// The nested `organizations: {name}` shape mirrors the published contract.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MerchantOrganizationDto {
    pub name: String,
}

/// Response DTO for merchant records
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MerchantResponseDto {
    pub id: Uuid,
    pub name: String,
    pub business: String,
    pub address: Option<String>,
    pub delegation: String,
    pub latitude: f64,
    pub longitude: f64,
    pub organization_id: Option<Uuid>,
    pub schedule_start: Option<String>,
    pub schedule_end: Option<String>,
    pub status: MerchantStatus,
    pub stand_type: StandType,
    pub registered_by: Uuid,
    pub stall_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub organizations: Option<MerchantOrganizationDto>,
}

impl From<MerchantWithOrganization> for MerchantResponseDto {
    fn from(row: MerchantWithOrganization) -> Self {
        let m = row.merchant;
        Self {
            id: m.id,
            name: m.name,
            business: m.business,
            address: m.address,
            delegation: m.delegation,
            latitude: m.latitude,
            longitude: m.longitude,
            organization_id: m.organization_id,
            schedule_start: m.schedule_start,
            schedule_end: m.schedule_end,
            status: m.status,
            stand_type: m.stand_type,
            registered_by: m.registered_by,
            stall_photo_url: m.stall_photo_url,
            created_at: m.created_at,
            organizations: row
                .organization_name
                .map(|name| MerchantOrganizationDto { name }),
        }
    }
}

/// Response body for successful registration
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterMerchantResponse {
    pub message: String,
    pub merchant: MerchantResponseDto,
}

/// Response body for merchant deletion
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteMerchantResponse {
    pub message: String,
}

/// One entry of the shared status catalog (value + display label + badge color)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusBadgeDto {
    pub value: MerchantStatus,
    pub label: String,
    pub color: String,
}

impl StatusBadgeDto {
    /// The full catalog, one entry per enumeration variant
    pub fn catalog() -> Vec<StatusBadgeDto> {
        MerchantStatus::ALL
            .iter()
            .map(|status| StatusBadgeDto {
                value: *status,
                label: status.label().to_string(),
                color: status.color().to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::company::en::CompanyName;
    use fake::Fake;

    fn valid_dto() -> CreateMerchantDto {
        CreateMerchantDto {
            name: CompanyName().fake(),
            business: "Abarrotes".to_string(),
            address: Some("Av. Constituyentes 12".to_string()),
            delegation: "Centro".to_string(),
            latitude: 20.59,
            longitude: -100.39,
            organization_id: None,
            schedule_start: Some("08:00".to_string()),
            schedule_end: Some("18:00".to_string()),
        }
    }

    #[test]
    fn test_valid_dto_passes_validation() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn test_address_and_schedule_are_optional() {
        let mut dto = valid_dto();
        dto.address = None;
        dto.schedule_start = None;
        dto.schedule_end = None;
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let mut dto = valid_dto();
        dto.latitude = 91.0;
        assert!(dto.validate().is_err());

        let mut dto = valid_dto();
        dto.longitude = -181.0;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut dto = valid_dto();
        dto.name = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_bad_schedule_rejected() {
        let mut dto = valid_dto();
        dto.schedule_start = Some("8am".to_string());
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_mime_type_gate() {
        assert!(is_mime_type_allowed("image/jpeg"));
        assert!(is_mime_type_allowed("image/webp"));
        assert!(is_mime_type_allowed("application/pdf"));
        assert!(!is_mime_type_allowed("image/svg+xml"));
        assert!(!is_mime_type_allowed("video/mp4"));
        assert!(!is_mime_type_allowed("application/octet-stream"));
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(get_extension_from_content_type("image/jpeg"), Some("jpg"));
        assert_eq!(get_extension_from_content_type("image/png"), Some("png"));
        assert_eq!(get_extension_from_content_type("application/pdf"), Some("pdf"));
        assert_eq!(get_extension_from_content_type("text/plain"), None);
    }

    #[test]
    fn test_update_dto_ignores_unknown_keys() {
        // stand_type is server-owned; a client sending it must not break parsing
        let dto: UpdateMerchantDto = serde_json::from_str(
            r#"{"name": "Tacos Doña Mary", "stand_type": "fijo", "status": "prioritario"}"#,
        )
        .unwrap();
        assert_eq!(dto.name.as_deref(), Some("Tacos Doña Mary"));
        assert_eq!(dto.status, Some(MerchantStatus::Prioritario));
    }

    #[test]
    fn test_update_dto_rejects_unknown_status() {
        let result = serde_json::from_str::<UpdateMerchantDto>(r#"{"status": "pendiente"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_status_catalog_shape() {
        let catalog = StatusBadgeDto::catalog();
        assert_eq!(catalog.len(), MerchantStatus::ALL.len());
        assert!(catalog
            .iter()
            .any(|b| b.value == MerchantStatus::SinFoco && b.label == "Sin Foco"));
    }

    #[tokio::test]
    async fn test_json_payload_ignores_server_owned_fields() {
        let body = r#"{
            "name": "Bodega El Sol",
            "business": "Abarrotes",
            "address": "Calle 5 de Mayo 1",
            "delegation": "Centro",
            "latitude": 20.59,
            "longitude": -100.39,
            "schedule_start": "08:00",
            "schedule_end": "18:00",
            "status": "aprobado",
            "stand_type": "fijo"
        }"#;

        let req = Request::builder()
            .method("POST")
            .uri("/api/merchants")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let payload = CreateMerchantPayload::from_request(req, &())
            .await
            .expect("payload should parse");
        assert_eq!(payload.dto.name, "Bodega El Sol");
        assert!(payload.image.is_none());
    }

    #[tokio::test]
    async fn test_multipart_payload_parses_fields() {
        let boundary = "X-SIRECOVIP-BOUNDARY";
        let mut body = String::new();
        for (name, value) in [
            ("name", "Bodega El Sol"),
            ("business", "Abarrotes"),
            ("address", "Calle 5 de Mayo 1"),
            ("delegation", "Centro"),
            ("latitude", "20.59"),
            ("longitude", "-100.39"),
            ("schedule_start", "08:00"),
            ("schedule_end", "18:00"),
            // server-owned field, must be ignored
            ("status", "aprobado"),
        ] {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        let req = Request::builder()
            .method("POST")
            .uri("/api/merchants")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let payload = CreateMerchantPayload::from_request(req, &())
            .await
            .expect("payload should parse");
        assert_eq!(payload.dto.latitude, 20.59);
        assert_eq!(payload.dto.longitude, -100.39);
        assert!(payload.image.is_none());
        assert!(payload.dto.validate().is_ok());
    }

    #[tokio::test]
    async fn test_multipart_rejects_disallowed_image_type() {
        let boundary = "X-SIRECOVIP-BOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"stall.svg\"\r\nContent-Type: image/svg+xml\r\n\r\n<svg/>\r\n--{boundary}--\r\n"
        );

        let req = Request::builder()
            .method("PUT")
            .uri("/api/merchants/123")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let result = UpdateMerchantPayload::from_request(req, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
