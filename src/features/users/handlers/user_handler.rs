use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{UserListQuery, UserResponseDto};
use crate::features::users::services::UserService;

/// List users, optionally filtered by assigned zone
#[utoipa::path(
    get,
    path = "/api/users",
    params(UserListQuery),
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    _user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserResponseDto>>> {
    let users = service.list(query.zone.as_deref()).await?;
    Ok(Json(users))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User details", body = UserResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    _user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponseDto>> {
    let user = service.get_by_id(&id).await?;
    Ok(Json(user))
}
