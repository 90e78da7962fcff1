// src/db/audit_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        audit::{AuditEntityType, AuditLog},
        auth::User,
    },
};

#[derive(Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Called inside the same transaction as the mutation it describes.
    pub async fn record<'e, E>(
        &self,
        executor: E,
        action: &str,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        details: &str,
        actor: &User,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (action, entity_type, entity_id, details, user_id, user_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(details)
        .bind(actor.id)
        .bind(&actor.name)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn list(
        &self,
        entity_type: Option<AuditEntityType>,
        limit: i64,
    ) -> Result<Vec<AuditLog>, AppError> {
        let logs = sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT * FROM audit_logs
            WHERE ($1::audit_entity_type IS NULL OR entity_type = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(entity_type)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }
}
