// src/middleware/rbac.rs
//
// Route guards. These re-run the access-control evaluator server-side on
// every request; whatever the UI chose to show is never the security
// boundary.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::User,
    services::access_control,
};

/// A permission requirement expressed as a type.
pub trait PermissionDef: Send + Sync + 'static {
    fn codes() -> &'static [&'static str];
}

/// A role-floor requirement expressed as a type.
pub trait RoleDef: Send + Sync + 'static {
    fn roles() -> &'static [&'static str];
}

pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let user = parts
            .extensions
            .get::<User>()
            .ok_or(AppError::InvalidToken)?;

        let snapshot = app_state.rbac_repo.access_snapshot().await?;
        if !access_control::has_permission(Some(user), &snapshot, T::codes()) {
            return Err(AppError::PermissionDenied(format!(
                "requires permission {}",
                T::codes().join(" or ")
            )));
        }

        Ok(RequirePermission(PhantomData))
    }
}

pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<User>()
            .ok_or(AppError::InvalidToken)?;

        if !access_control::has_role(Some(user), T::roles()) {
            return Err(AppError::PermissionDenied(format!(
                "requires role {} or above",
                T::roles().join(" or ")
            )));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// Requirement types used by the routes
// ---

macro_rules! permission {
    ($name:ident, $($code:literal),+) => {
        pub struct $name;
        impl PermissionDef for $name {
            fn codes() -> &'static [&'static str] {
                &[$($code),+]
            }
        }
    };
}

permission!(PermInventoryRead, "inventory:read");
permission!(PermInventoryCreate, "inventory:create");
permission!(PermInventoryUpdate, "inventory:update");
permission!(PermInventoryDelete, "inventory:delete");
permission!(PermStockRead, "stock:read");
permission!(PermStockCreate, "stock:create");
permission!(PermOrdersRead, "orders:read");
permission!(PermOrdersCreate, "orders:create");
permission!(PermOrdersUpdate, "orders:update");
permission!(PermReportsRead, "reports:read");
permission!(PermSettingsRead, "settings:read");
permission!(PermSettingsUpdate, "settings:update");

pub struct ManagerAndAbove;
impl RoleDef for ManagerAndAbove {
    fn roles() -> &'static [&'static str] {
        &[access_control::ROLE_MANAGER]
    }
}

pub struct AdminAndAbove;
impl RoleDef for AdminAndAbove {
    fn roles() -> &'static [&'static str] {
        &[access_control::ROLE_ADMIN]
    }
}
