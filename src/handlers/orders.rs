// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
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
        rbac::{PermOrdersCreate, PermOrdersRead, PermOrdersUpdate, RequirePermission},
    },
    models::orders::{
        CreateOrderPayload, Order, OrderDetail, OrderStatus, UpdateOrderStatusPayload,
    },
    services::order_service::{NewOrder, NewOrderItem},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
}

fn to_new_order(payload: CreateOrderPayload) -> NewOrder {
    NewOrder {
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        customer_phone: payload.customer_phone,
        customer_address: payload.customer_address,
        items: payload
            .items
            .into_iter()
            .map(|item| NewOrderItem { product_id: item.product_id, quantity: item.quantity })
            .collect(),
        tax: payload.tax,
        discount: payload.discount,
        payment_method: payload.payment_method,
    }
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Created order in `pending`", body = OrderDetail),
        (status = 404, description = "Unknown product in the cart")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermOrdersCreate>,
    actor: AuthenticatedUser,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detail = app_state
        .order_service
        .create_order(to_new_order(payload), &actor.0)
        .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

// POS checkout: the order is created and confirmed in one transaction, so a
// sale either consumes stock for every line or does not happen.
#[utoipa::path(
    post,
    path = "/api/orders/checkout",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Created and confirmed order", body = OrderDetail),
        (status = 409, description = "Insufficient stock for a line item")
    ),
    security(("api_jwt" = []))
)]
pub async fn checkout(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermOrdersCreate>,
    actor: AuthenticatedUser,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detail = app_state
        .order_service
        .checkout(to_new_order(payload), &actor.0)
        .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    params(OrderFilter),
    responses((status = 200, description = "Orders, newest first", body = [Order])),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermOrdersRead>,
    Query(filter): Query<OrderFilter>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.list_orders(filter.status).await?;
    Ok((StatusCode::OK, Json(orders)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with line items", body = OrderDetail),
        (status = 404, description = "Unknown order")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermOrdersRead>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.order_service.get_order(id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderStatusPayload,
    responses(
        (status = 200, description = "Order after the transition", body = Order),
        (status = 409, description = "Transition not allowed, or insufficient stock on confirmation")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermOrdersUpdate>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .transition_status(id, payload.status, &actor.0)
        .await?;

    Ok((StatusCode::OK, Json(order)))
}
