// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::orders::OrderStatus;

// Application-wide error type. Every failure a handler can surface maps to
// exactly one variant here, and `IntoResponse` decides the status code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    // Movement-level validation (zero quantity, empty reason, ...)
    #[error("{0}")]
    InvalidInput(String),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i32, available: i32 },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid order status transition: {from} -> {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    #[error("Event is at capacity")]
    EventFull,

    #[error("E-mail already registered")]
    EmailAlreadyExists,

    #[error("SKU '{0}' already exists")]
    SkuAlreadyExists(String),

    #[error("Category '{0}' already exists")]
    CategoryAlreadyExists(String),

    #[error("Role code '{0}' already exists")]
    RoleCodeAlreadyExists(String),

    #[error("System roles cannot be modified or deleted")]
    SystemRoleImmutable,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Return every field-level detail the validator collected.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidInput(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InsufficientStock { .. } => (StatusCode::CONFLICT, self.to_string()),
            AppError::PermissionDenied(_) => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::InvalidStatusTransition { .. } => (StatusCode::CONFLICT, self.to_string()),
            AppError::EventFull => (StatusCode::CONFLICT, self.to_string()),
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, self.to_string()),
            AppError::SkuAlreadyExists(_) => (StatusCode::CONFLICT, self.to_string()),
            AppError::CategoryAlreadyExists(_) => (StatusCode::CONFLICT, self.to_string()),
            AppError::RoleCodeAlreadyExists(_) => (StatusCode::CONFLICT, self.to_string()),
            AppError::SystemRoleImmutable => (StatusCode::CONFLICT, self.to_string()),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid e-mail or password.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid authentication token.".to_string(),
            ),

            // Everything else (DatabaseError, InternalServerError, ...) is a 500.
            // `tracing` gets the detailed message; the client gets a generic one.
            ref e => {
                tracing::error!("Internal server error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[rstest]
    #[case(AppError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::InsufficientStock { requested: 8, available: 5 }, StatusCode::CONFLICT)]
    #[case(AppError::PermissionDenied("nope".into()), StatusCode::FORBIDDEN)]
    #[case(AppError::NotFound("Product"), StatusCode::NOT_FOUND)]
    #[case(
        AppError::InvalidStatusTransition { from: OrderStatus::Delivered, to: OrderStatus::Pending },
        StatusCode::CONFLICT
    )]
    #[case(AppError::EventFull, StatusCode::CONFLICT)]
    #[case(AppError::EmailAlreadyExists, StatusCode::CONFLICT)]
    #[case(AppError::SkuAlreadyExists("SKU-1".into()), StatusCode::CONFLICT)]
    #[case(AppError::CategoryAlreadyExists("Beverages".into()), StatusCode::CONFLICT)]
    #[case(AppError::RoleCodeAlreadyExists("clerk".into()), StatusCode::CONFLICT)]
    #[case(AppError::SystemRoleImmutable, StatusCode::CONFLICT)]
    #[case(AppError::InvalidCredentials, StatusCode::UNAUTHORIZED)]
    #[case(AppError::InvalidToken, StatusCode::UNAUTHORIZED)]
    #[case(AppError::DatabaseError(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_codes(#[case] err: AppError, #[case] expected: StatusCode) {
        assert_eq!(status_of(err), expected);
    }
}
