// src/handlers/users.rs
//
// Account administration. All routes here sit behind the admin role floor.

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
    models::{
        audit::AuditEntityType,
        auth::{SetUserActivePayload, UpdateUserRolePayload, User},
    },
    services::access_control,
};

// `role` carries the hierarchy code; custom roles go in `role_id`. Anything
// outside the four known codes would silently rank below staff, so reject
// it here.
fn ensure_hierarchy_code(code: &str) -> Result<(), AppError> {
    if access_control::role_level(code) == 0 {
        return Err(AppError::InvalidInput(format!(
            "Unknown hierarchy role code '{code}'."
        )));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses((status = 200, description = "All user accounts", body = [User])),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminAndAbove>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_repo.list_users().await?;
    Ok((StatusCode::OK, Json(users)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/role",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRolePayload,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Unknown hierarchy role code"),
        (status = 404, description = "Unknown user or role")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user_role(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminAndAbove>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    ensure_hierarchy_code(&payload.role)?;

    let user = app_state
        .user_repo
        .update_role(&app_state.db_pool, id, &payload.role, payload.role_id)
        .await?;

    app_state
        .audit_repo
        .record(
            &app_state.db_pool,
            "user.role",
            AuditEntityType::User,
            user.id,
            &format!("Changed role of '{}' to '{}'", user.name, user.role),
            &actor.0,
        )
        .await?;

    Ok((StatusCode::OK, Json(user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/active",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = SetUserActivePayload,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 404, description = "Unknown user")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_user_active(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminAndAbove>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetUserActivePayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .user_repo
        .set_active(&app_state.db_pool, id, payload.is_active)
        .await?;

    let verb = if user.is_active { "Activated" } else { "Deactivated" };
    app_state
        .audit_repo
        .record(
            &app_state.db_pool,
            "user.active",
            AuditEntityType::User,
            user.id,
            &format!("{} account '{}'", verb, user.email),
            &actor.0,
        )
        .await?;

    Ok((StatusCode::OK, Json(user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("super_admin")]
    #[case("admin")]
    #[case("manager")]
    #[case("staff")]
    fn known_hierarchy_codes_pass(#[case] code: &str) {
        assert!(ensure_hierarchy_code(code).is_ok());
    }

    #[rstest]
    #[case("warehouse_clerk")]
    #[case("Administrator")]
    #[case("")]
    fn unknown_hierarchy_codes_are_rejected(#[case] code: &str) {
        assert!(matches!(
            ensure_hierarchy_code(code),
            Err(AppError::InvalidInput(_))
        ));
    }
}
