// src/handlers/events.rs

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
    models::events::{
        CreateEventPayload, Event, EventRegistration, EventWithStats, RegisterAttendeePayload,
    },
};

#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    responses((status = 200, description = "Events with registration counts", body = [EventWithStats])),
    security(("api_jwt" = []))
)]
pub async fn list_events(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let events = app_state.event_service.list_events().await?;
    Ok((StatusCode::OK, Json(events)))
}

#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    request_body = CreateEventPayload,
    responses((status = 201, description = "Created event", body = Event)),
    security(("api_jwt" = []))
)]
pub async fn create_event(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerAndAbove>,
    actor: AuthenticatedUser,
    Json(payload): Json<CreateEventPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let event = app_state
        .event_service
        .create_event(
            &payload.title,
            payload.description.as_deref(),
            payload.location.as_deref(),
            payload.category.as_deref(),
            payload.starts_at,
            payload.capacity,
            payload.price,
            &actor.0,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

// Front-desk registration: any signed-in account can register attendees.
#[utoipa::path(
    post,
    path = "/api/events/{id}/registrations",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event id")),
    request_body = RegisterAttendeePayload,
    responses(
        (status = 201, description = "Registration", body = EventRegistration),
        (status = 409, description = "Event is at capacity"),
        (status = 404, description = "Unknown event")
    ),
    security(("api_jwt" = []))
)]
pub async fn register_attendee(
    State(app_state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RegisterAttendeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let registration = app_state
        .event_service
        .register_attendee(
            id,
            &payload.attendee_name,
            &payload.attendee_email,
            payload.attendee_phone.as_deref(),
            payload.ticket_count,
            &actor.0,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/registrations",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event id")),
    responses((status = 200, description = "Registrations for the event", body = [EventRegistration])),
    security(("api_jwt" = []))
)]
pub async fn list_registrations(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let registrations = app_state.event_service.list_registrations(id).await?;
    Ok((StatusCode::OK, Json(registrations)))
}
