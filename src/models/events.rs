// src/models/events.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub capacity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventPayload {
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,

    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,

    pub starts_at: DateTime<Utc>,

    #[validate(range(min = 1, message = "Capacity must be positive."))]
    pub capacity: i32,

    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAttendeePayload {
    #[validate(length(min = 1, message = "Attendee name is required."))]
    pub attendee_name: String,

    #[validate(email(message = "The e-mail address is invalid."))]
    pub attendee_email: String,

    pub attendee_phone: Option<String>,

    #[validate(range(min = 1, message = "Ticket count must be positive."))]
    #[serde(default = "default_ticket_count")]
    pub ticket_count: i32,
}

fn default_ticket_count() -> i32 {
    1
}

// `registered_count` is a COUNT over event_registrations, derived at read
// time. Capacity is consumed by registrations the same way product stock is
// consumed by outward movements.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventWithStats {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub registered_count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub attendee_name: String,
    pub attendee_email: String,
    pub attendee_phone: Option<String>,
    pub ticket_count: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}
