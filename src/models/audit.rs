// src/models/audit.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "audit_entity_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuditEntityType {
    Product,
    Category,
    Order,
    Stock,
    User,
    Role,
    Permission,
    Customer,
    Event,
    Settings,
}

// Append-only trail of who did what. Written inside the same transaction as
// the mutation it describes whenever one exists.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: Uuid,

    #[schema(example = "stock.outward")]
    pub action: String,

    pub entity_type: AuditEntityType,
    pub entity_id: Uuid,
    pub details: String,

    pub user_id: Uuid,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}
