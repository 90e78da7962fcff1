// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// A catalog product. `current_stock` is mutated exclusively through the
// ledger (`InventoryService::apply_movement`); the database backs that up
// with a CHECK (current_stock >= 0) constraint.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,

    #[schema(example = "SKU-0042")]
    pub sku: String,

    pub name: String,
    pub category: String,
    pub description: Option<String>,

    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,

    #[schema(example = "19.90")]
    pub unit_price: Decimal,

    #[schema(example = "pcs")]
    pub unit: String,

    pub location: Option<String>,
    pub last_updated: DateTime<Utc>,
}

// A named grouping for catalog products. Products reference categories by
// name, the key the catalog screens filter on.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

// `product_count` is a COUNT over products at read time, never stored.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithStats {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub category: Category,
    pub product_count: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryPayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub description: Option<String>,
}

// The sign of a movement is implied by its type, never supplied by the
// caller: inward adds, outward subtracts, adjustment carries a signed
// quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Inward,
    Outward,
    Adjustment,
}

// An immutable ledger fact. `previous_stock`/`new_stock` materialize the
// fold result at insertion time; history is append-only.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,

    #[serde(rename = "type")]
    pub movement_type: MovementType,

    pub quantity: i32,
    pub previous_stock: i32,
    pub new_stock: i32,

    #[schema(example = "Purchase order PO-1")]
    pub reason: String,
    pub reference: Option<String>,

    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "SKU is required."))]
    #[schema(example = "SKU-0042")]
    pub sku: String,

    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,

    #[validate(length(min = 1, message = "Category is required."))]
    pub category: String,

    pub description: Option<String>,

    #[validate(range(min = 0, message = "Initial stock cannot be negative."))]
    #[serde(default)]
    pub initial_stock: i32,

    #[validate(range(min = 0, message = "Minimum stock cannot be negative."))]
    pub min_stock: i32,

    #[validate(range(min = 0, message = "Maximum stock cannot be negative."))]
    pub max_stock: i32,

    #[schema(example = "19.90")]
    pub unit_price: Decimal,

    #[validate(length(min = 1, message = "Unit is required."))]
    #[schema(example = "pcs")]
    pub unit: String,

    pub location: Option<String>,
}

// Stock fields are absent on purpose: the catalog endpoints never touch
// `current_stock`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,

    #[validate(length(min = 1, message = "Category is required."))]
    pub category: String,

    pub description: Option<String>,

    #[validate(range(min = 0, message = "Minimum stock cannot be negative."))]
    pub min_stock: i32,

    #[validate(range(min = 0, message = "Maximum stock cannot be negative."))]
    pub max_stock: i32,

    pub unit_price: Decimal,

    #[validate(length(min = 1, message = "Unit is required."))]
    pub unit: String,

    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovementPayload {
    pub product_id: Uuid,

    #[serde(rename = "type")]
    pub movement_type: MovementType,

    // Positive for inward/outward, signed for adjustment
    pub quantity: i32,

    #[validate(length(min = 1, message = "A reason is required."))]
    #[schema(example = "Purchase order PO-1")]
    pub reason: String,

    pub reference: Option<String>,
}

// Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Low,
    Normal,
    High,
}

// Alerting bucket relative to min_stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CriticalityTier {
    Critical,
    Warning,
    None,
}

// Product plus its derived stock health, for listing screens.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithStatus {
    #[serde(flatten)]
    pub product: Product,
    pub stock_status: StockStatus,
    pub criticality: CriticalityTier,
}
