// src/handlers/rbac.rs
//
// Role management. Admin-only; the permission catalog itself is seeded by
// migration and read-only here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, rbac::{AdminAndAbove, RequireRole}},
    models::rbac::{CreateRolePayload, Permission, Role, UpdateRolePayload},
};

#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "Access control",
    responses((status = 200, description = "All roles with their permission ids", body = [Role])),
    security(("api_jwt" = []))
)]
pub async fn list_roles(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminAndAbove>,
) -> Result<impl IntoResponse, AppError> {
    let roles = app_state.rbac_service.list_roles().await?;
    Ok((StatusCode::OK, Json(roles)))
}

#[utoipa::path(
    get,
    path = "/api/permissions",
    tag = "Access control",
    responses((status = 200, description = "The permission catalog", body = [Permission])),
    security(("api_jwt" = []))
)]
pub async fn list_permissions(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminAndAbove>,
) -> Result<impl IntoResponse, AppError> {
    let permissions = app_state.rbac_service.list_permissions().await?;
    Ok((StatusCode::OK, Json(permissions)))
}

#[utoipa::path(
    post,
    path = "/api/roles",
    tag = "Access control",
    request_body = CreateRolePayload,
    responses(
        (status = 201, description = "Created role", body = Role),
        (status = 409, description = "Role code already in use")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_role(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminAndAbove>,
    actor: AuthenticatedUser,
    Json(payload): Json<CreateRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let role = app_state
        .rbac_service
        .create_role(
            &payload.name,
            &payload.code,
            payload.description.as_deref(),
            &payload.permissions,
            &actor.0,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(role)))
}

#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    tag = "Access control",
    params(("id" = Uuid, Path, description = "Role id")),
    request_body = UpdateRolePayload,
    responses(
        (status = 200, description = "Updated role", body = Role),
        (status = 409, description = "System roles cannot be modified"),
        (status = 404, description = "Unknown role")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_role(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminAndAbove>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let role = app_state
        .rbac_service
        .update_role(
            id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.permissions.as_deref(),
            &actor.0,
        )
        .await?;

    Ok((StatusCode::OK, Json(role)))
}

#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    tag = "Access control",
    params(("id" = Uuid, Path, description = "Role id")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 409, description = "System roles cannot be deleted"),
        (status = 404, description = "Unknown role")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_role(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminAndAbove>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.rbac_service.delete_role(id, &actor.0).await?;
    Ok(StatusCode::NO_CONTENT)
}
