// src/handlers/audit.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{ManagerAndAbove, RequireRole},
    models::audit::{AuditEntityType, AuditLog},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AuditFilter {
    pub entity_type: Option<AuditEntityType>,
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/audit",
    tag = "Audit",
    params(AuditFilter),
    responses((status = 200, description = "Audit trail, newest first", body = [AuditLog])),
    security(("api_jwt" = []))
)]
pub async fn list_audit_logs(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerAndAbove>,
    Query(filter): Query<AuditFilter>,
) -> Result<impl IntoResponse, AppError> {
    let limit = filter.limit.unwrap_or(100).clamp(1, 500);
    let logs = app_state.audit_repo.list(filter.entity_type, limit).await?;
    Ok((StatusCode::OK, Json(logs)))
}
