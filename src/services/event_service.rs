// src/services/event_service.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditRepository, EventRepository},
    models::{
        audit::AuditEntityType,
        auth::User,
        events::{Event, EventRegistration, EventWithStats},
    },
};

#[derive(Clone)]
pub struct EventService {
    repo: EventRepository,
    audit_repo: AuditRepository,
    pool: PgPool,
}

impl EventService {
    pub fn new(repo: EventRepository, audit_repo: AuditRepository, pool: PgPool) -> Self {
        Self { repo, audit_repo, pool }
    }

    pub async fn list_events(&self) -> Result<Vec<EventWithStats>, AppError> {
        self.repo.list_events().await
    }

    pub async fn list_registrations(&self, event_id: Uuid) -> Result<Vec<EventRegistration>, AppError> {
        self.repo.list_registrations(event_id).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_event(
        &self,
        title: &str,
        description: Option<&str>,
        location: Option<&str>,
        category: Option<&str>,
        starts_at: DateTime<Utc>,
        capacity: i32,
        price: Decimal,
        actor: &User,
    ) -> Result<Event, AppError> {
        if capacity <= 0 {
            return Err(AppError::InvalidInput("Capacity must be positive.".into()));
        }

        let mut tx = self.pool.begin().await?;

        let event = self
            .repo
            .create_event(&mut *tx, title, description, location, category, starts_at, capacity, price)
            .await?;

        self.audit_repo
            .record(
                &mut *tx,
                "event.create",
                AuditEntityType::Event,
                event.id,
                &format!("Created event '{}' (capacity {})", event.title, event.capacity),
                actor,
            )
            .await?;

        tx.commit().await?;
        Ok(event)
    }

    // Capacity is the same ledger shape as stock: the registration count is
    // derived from the registrations themselves, and the check only holds
    // because it runs under the event row lock.
    pub async fn register_attendee(
        &self,
        event_id: Uuid,
        attendee_name: &str,
        attendee_email: &str,
        attendee_phone: Option<&str>,
        ticket_count: i32,
        actor: &User,
    ) -> Result<EventRegistration, AppError> {
        if attendee_name.trim().is_empty() || attendee_email.trim().is_empty() {
            return Err(AppError::InvalidInput("Attendee name and e-mail are required.".into()));
        }
        if ticket_count <= 0 {
            return Err(AppError::InvalidInput("Ticket count must be positive.".into()));
        }

        let mut tx = self.pool.begin().await?;

        let event = self
            .repo
            .find_event_for_update(&mut *tx, event_id)
            .await?
            .ok_or(AppError::NotFound("Event"))?;

        let registered = self.repo.registered_count(&mut *tx, event_id).await?;
        if registered + i64::from(ticket_count) > i64::from(event.capacity) {
            return Err(AppError::EventFull);
        }

        let registration = self
            .repo
            .insert_registration(
                &mut *tx,
                event_id,
                attendee_name,
                attendee_email,
                attendee_phone,
                ticket_count,
                actor.id,
            )
            .await?;

        self.audit_repo
            .record(
                &mut *tx,
                "event.register",
                AuditEntityType::Event,
                event_id,
                &format!(
                    "Registered '{}' for '{}' ({} tickets)",
                    attendee_name, event.title, ticket_count
                ),
                actor,
            )
            .await?;

        tx.commit().await?;
        Ok(registration)
    }
}
