use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::merchants::dtos::{
    CreateMerchantDto, CreateMerchantPayload, DeleteMerchantResponse, MerchantResponseDto,
    RegisterMerchantResponse, StatusBadgeDto, UpdateMerchantDto, UpdateMerchantPayload,
};
use crate::features::merchants::services::MerchantService;

/// Register a new merchant
///
/// Accepts JSON or multipart/form-data with an optional `image` part
/// (JPEG/PNG/GIF/WEBP/PDF, max 5 MB). `status` and `stand_type` are
/// server-owned and any client-supplied value is ignored.
#[utoipa::path(
    post,
    path = "/api/merchants",
    request_body = CreateMerchantDto,
    responses(
        (status = 201, description = "Merchant registered successfully", body = RegisterMerchantResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "merchants",
    security(("bearer_auth" = []))
)]
pub async fn create_merchant(
    user: AuthenticatedUser,
    State(service): State<Arc<MerchantService>>,
    payload: CreateMerchantPayload,
) -> Result<(StatusCode, Json<RegisterMerchantResponse>)> {
    payload
        .dto
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let merchant = service
        .register(payload.dto, payload.image, user.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterMerchantResponse {
            message: "Comerciante registrado correctamente".to_string(),
            merchant,
        }),
    ))
}

/// List the 20 most recent merchants (newest first)
#[utoipa::path(
    get,
    path = "/api/merchants",
    responses(
        (status = 200, description = "List of merchants", body = Vec<MerchantResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "merchants",
    security(("bearer_auth" = []))
)]
pub async fn list_merchants(
    _user: AuthenticatedUser,
    State(service): State<Arc<MerchantService>>,
) -> Result<Json<Vec<MerchantResponseDto>>> {
    let merchants = service.list().await?;
    Ok(Json(merchants))
}

/// The shared status catalog: value, display label, and badge color for
/// every merchant status
#[utoipa::path(
    get,
    path = "/api/merchants/statuses",
    responses(
        (status = 200, description = "Status catalog", body = Vec<StatusBadgeDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "merchants",
    security(("bearer_auth" = []))
)]
pub async fn list_statuses(_user: AuthenticatedUser) -> Json<Vec<StatusBadgeDto>> {
    Json(StatusBadgeDto::catalog())
}

/// Get a merchant by id
#[utoipa::path(
    get,
    path = "/api/merchants/{id}",
    params(("id" = String, Path, description = "Merchant id")),
    responses(
        (status = 200, description = "Merchant details", body = MerchantResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Merchant not found")
    ),
    tag = "merchants",
    security(("bearer_auth" = []))
)]
pub async fn get_merchant(
    _user: AuthenticatedUser,
    State(service): State<Arc<MerchantService>>,
    Path(id): Path<String>,
) -> Result<Json<MerchantResponseDto>> {
    let merchant = service.get_by_id(&id).await?;
    Ok(Json(merchant))
}

/// Update a merchant
///
/// Same shape as create with all fields optional, plus `status` for the
/// inspection workflow. A new `image` replaces the stored photo.
#[utoipa::path(
    put,
    path = "/api/merchants/{id}",
    params(("id" = String, Path, description = "Merchant id")),
    request_body = UpdateMerchantDto,
    responses(
        (status = 200, description = "Updated merchant", body = MerchantResponseDto),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Merchant not found")
    ),
    tag = "merchants",
    security(("bearer_auth" = []))
)]
pub async fn update_merchant(
    _user: AuthenticatedUser,
    State(service): State<Arc<MerchantService>>,
    Path(id): Path<String>,
    payload: UpdateMerchantPayload,
) -> Result<Json<MerchantResponseDto>> {
    payload
        .dto
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let merchant = service.update(&id, payload.dto, payload.image).await?;
    Ok(Json(merchant))
}

/// Delete a merchant
#[utoipa::path(
    delete,
    path = "/api/merchants/{id}",
    params(("id" = String, Path, description = "Merchant id")),
    responses(
        (status = 200, description = "Merchant deleted", body = DeleteMerchantResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Merchant not found")
    ),
    tag = "merchants",
    security(("bearer_auth" = []))
)]
pub async fn delete_merchant(
    _user: AuthenticatedUser,
    State(service): State<Arc<MerchantService>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteMerchantResponse>> {
    service.delete(&id).await?;
    Ok(Json(DeleteMerchantResponse {
        message: "Comerciante eliminado correctamente".to_string(),
    }))
}
