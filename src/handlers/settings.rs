// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermSettingsRead, PermSettingsUpdate, RequirePermission},
    },
    models::{
        audit::AuditEntityType,
        settings::{CompanySettings, UpdateSettingsPayload},
    },
};

#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses((status = 200, description = "Company settings", body = CompanySettings)),
    security(("api_jwt" = []))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSettingsRead>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.settings_repo.get().await?;
    Ok((StatusCode::OK, Json(settings)))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = UpdateSettingsPayload,
    responses((status = 200, description = "Updated settings", body = CompanySettings)),
    security(("api_jwt" = []))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSettingsUpdate>,
    actor: AuthenticatedUser,
    Json(payload): Json<UpdateSettingsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let settings = app_state
        .settings_repo
        .update(
            &payload.name,
            payload.address.as_deref(),
            payload.phone.as_deref(),
            payload.email.as_deref(),
            payload.tax_id.as_deref(),
            payload.receipt_footer.as_deref(),
        )
        .await?;

    app_state
        .audit_repo
        .record(
            &app_state.db_pool,
            "settings.update",
            AuditEntityType::Settings,
            uuid::Uuid::nil(),
            &format!("Updated company settings ('{}')", settings.name),
            &actor.0,
        )
        .await?;

    Ok((StatusCode::OK, Json(settings)))
}
