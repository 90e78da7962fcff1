// src/models/rbac.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// The modules the permission catalog is partitioned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "permission_module", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PermissionModule {
    Inventory,
    Orders,
    Stock,
    Users,
    Reports,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "permission_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    Create,
    Read,
    Update,
    Delete,
}

// One atomic capability. The catalog is seeded by migration and read-only at
// runtime.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: Uuid,

    #[schema(example = "View inventory")]
    pub name: String,

    #[schema(example = "inventory:read")]
    pub code: String,

    pub module: PermissionModule,
    pub action: Option<PermissionAction>,
    pub description: String,
}

// A named bundle of permissions. System roles are seeded and immutable;
// `permissions` holds permission ids (aggregated from the join table).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Uuid,

    #[schema(example = "Warehouse clerk")]
    pub name: String,

    #[schema(example = "warehouse_clerk")]
    pub code: String,

    pub description: Option<String>,
    pub permissions: Vec<Uuid>,
    pub is_system: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRolePayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,

    #[validate(length(min = 1, message = "Code is required."))]
    #[schema(example = "warehouse_clerk")]
    pub code: String,

    pub description: Option<String>,

    // Permission codes, resolved to ids server-side
    #[schema(example = json!(["inventory:read", "stock:create"]))]
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolePayload {
    #[validate(length(min = 1, message = "Name cannot be empty."))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
}
