// src/handlers/crm.rs

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
    middleware::{auth::AuthenticatedUser, rbac::{ManagerAndAbove, RequireRole}},
    models::crm::{CreateCustomerPayload, Customer, CustomerWithStats, UpdateCustomerPayload},
};

#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Customers",
    responses((status = 200, description = "Customers with derived order totals", body = [CustomerWithStats])),
    security(("api_jwt" = []))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerAndAbove>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.crm_service.list_customers().await?;
    Ok((StatusCode::OK, Json(customers)))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer with derived order totals", body = CustomerWithStats),
        (status = 404, description = "Unknown customer")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerAndAbove>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.crm_service.get_customer(id).await?;
    Ok((StatusCode::OK, Json(customer)))
}

#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Customers",
    request_body = CreateCustomerPayload,
    responses((status = 201, description = "Created customer", body = Customer)),
    security(("api_jwt" = []))
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerAndAbove>,
    actor: AuthenticatedUser,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .crm_service
        .create_customer(
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
            payload.company.as_deref(),
            payload.notes.as_deref(),
            &actor.0,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = Uuid, Path, description = "Customer id")),
    request_body = UpdateCustomerPayload,
    responses(
        (status = 200, description = "Updated customer", body = Customer),
        (status = 404, description = "Unknown customer")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerAndAbove>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .crm_service
        .update_customer(
            id,
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
            payload.company.as_deref(),
            payload.notes.as_deref(),
            payload.is_active,
            &actor.0,
        )
        .await?;

    Ok((StatusCode::OK, Json(customer)))
}
