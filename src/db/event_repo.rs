// src/db/event_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::events::{Event, EventRegistration, EventWithStats},
};

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_events(&self) -> Result<Vec<EventWithStats>, AppError> {
        let events = sqlx::query_as::<_, EventWithStats>(
            r#"
            SELECT e.*, COALESCE(SUM(r.ticket_count), 0)::bigint AS registered_count
            FROM events e
            LEFT JOIN event_registrations r ON r.event_id = e.id
            GROUP BY e.id
            ORDER BY e.starts_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_event<'e, E>(
        &self,
        executor: E,
        title: &str,
        description: Option<&str>,
        location: Option<&str>,
        category: Option<&str>,
        starts_at: DateTime<Utc>,
        capacity: i32,
        price: Decimal,
    ) -> Result<Event, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, location, category, starts_at, capacity, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(location)
        .bind(category)
        .bind(starts_at)
        .bind(capacity)
        .bind(price)
        .fetch_one(executor)
        .await?;
        Ok(event)
    }

    // Same lock discipline as products: capacity checks only mean something
    // under the event row lock.
    pub async fn find_event_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Event>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(event)
    }

    pub async fn registered_count<'e, E>(&self, executor: E, event_id: Uuid) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(ticket_count), 0)::bigint FROM event_registrations WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    pub async fn insert_registration<'e, E>(
        &self,
        executor: E,
        event_id: Uuid,
        attendee_name: &str,
        attendee_email: &str,
        attendee_phone: Option<&str>,
        ticket_count: i32,
        created_by: Uuid,
    ) -> Result<EventRegistration, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            INSERT INTO event_registrations
                (event_id, attendee_name, attendee_email, attendee_phone, ticket_count, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(attendee_name)
        .bind(attendee_email)
        .bind(attendee_phone)
        .bind(ticket_count)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(registration)
    }

    pub async fn list_registrations(&self, event_id: Uuid) -> Result<Vec<EventRegistration>, AppError> {
        let registrations = sqlx::query_as::<_, EventRegistration>(
            "SELECT * FROM event_registrations WHERE event_id = $1 ORDER BY created_at ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(registrations)
    }
}
