// src/handlers/inventory.rs

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
    middleware::{
        auth::AuthenticatedUser,
        rbac::{
            PermInventoryCreate, PermInventoryDelete, PermInventoryRead, PermInventoryUpdate,
            RequirePermission,
        },
    },
    models::inventory::{
        Category, CategoryWithStats, CreateCategoryPayload, CreateProductPayload, Product,
        ProductWithStatus, UpdateCategoryPayload, UpdateProductPayload,
    },
};

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Inventory",
    responses((status = 200, description = "Catalog with derived stock health", body = [ProductWithStatus])),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryRead>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.inventory_service.list_products().await?;
    Ok((StatusCode::OK, Json(products)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with derived stock health", body = ProductWithStatus),
        (status = 404, description = "Unknown product")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryRead>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.inventory_service.get_product(id).await?;
    Ok((StatusCode::OK, Json(product)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Inventory",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Created product", body = Product),
        (status = 409, description = "SKU already in use")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryCreate>,
    actor: AuthenticatedUser,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .inventory_service
        .create_product(
            &payload.sku,
            &payload.name,
            &payload.category,
            payload.description.as_deref(),
            payload.initial_stock,
            payload.min_stock,
            payload.max_stock,
            payload.unit_price,
            &payload.unit,
            payload.location.as_deref(),
            &actor.0,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 404, description = "Unknown product")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryUpdate>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .inventory_service
        .update_product(
            id,
            &payload.name,
            &payload.category,
            payload.description.as_deref(),
            payload.min_stock,
            payload.max_stock,
            payload.unit_price,
            &payload.unit,
            payload.location.as_deref(),
            &actor.0,
        )
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

// ---
// Categories
// ---

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Inventory",
    responses((status = 200, description = "Categories with product counts", body = [CategoryWithStats])),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryRead>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.inventory_service.list_categories().await?;
    Ok((StatusCode::OK, Json(categories)))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Inventory",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Created category", body = Category),
        (status = 409, description = "Category name already in use")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryCreate>,
    actor: AuthenticatedUser,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .inventory_service
        .create_category(&payload.name, payload.description.as_deref(), &actor.0)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = UpdateCategoryPayload,
    responses(
        (status = 200, description = "Updated category", body = Category),
        (status = 409, description = "Category name already in use"),
        (status = 404, description = "Unknown category")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryUpdate>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .inventory_service
        .update_category(id, &payload.name, payload.description.as_deref(), &actor.0)
        .await?;

    Ok((StatusCode::OK, Json(category)))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Unknown category")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryDelete>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_category(id, &actor.0).await?;
    Ok(StatusCode::NO_CONTENT)
}
