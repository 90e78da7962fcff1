// src/handlers/stock.rs
//
// The ledger surface. Movements are the only way stock changes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermReportsRead, PermStockCreate, PermStockRead, RequirePermission},
    },
    models::inventory::{
        CreateMovementPayload, MovementType, ProductWithStatus, StockMovement,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MovementFilter {
    pub product_id: Option<Uuid>,

    #[serde(rename = "type")]
    pub movement_type: Option<MovementType>,
}

#[utoipa::path(
    post,
    path = "/api/stock/movements",
    tag = "Stock",
    request_body = CreateMovementPayload,
    responses(
        (status = 201, description = "Recorded movement", body = StockMovement),
        (status = 409, description = "Insufficient stock"),
        (status = 404, description = "Unknown product")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_movement(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermStockCreate>,
    actor: AuthenticatedUser,
    Json(payload): Json<CreateMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let movement = app_state
        .inventory_service
        .apply_movement(
            &app_state.db_pool,
            payload.product_id,
            payload.movement_type,
            payload.quantity,
            &payload.reason,
            payload.reference.as_deref(),
            &actor.0,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(movement)))
}

#[utoipa::path(
    get,
    path = "/api/stock/movements",
    tag = "Stock",
    params(MovementFilter),
    responses((status = 200, description = "Movement history, oldest first", body = [StockMovement])),
    security(("api_jwt" = []))
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermStockRead>,
    Query(filter): Query<MovementFilter>,
) -> Result<impl IntoResponse, AppError> {
    let movements = app_state
        .inventory_service
        .list_movements(filter.product_id, filter.movement_type)
        .await?;
    Ok((StatusCode::OK, Json(movements)))
}

#[utoipa::path(
    get,
    path = "/api/stock/low",
    tag = "Stock",
    responses((status = 200, description = "Products at or below their minimum", body = [ProductWithStatus])),
    security(("api_jwt" = []))
)]
pub async fn low_stock_report(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermReportsRead>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.inventory_service.low_stock_report().await?;
    Ok((StatusCode::OK, Json(products)))
}
