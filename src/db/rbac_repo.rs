// src/db/rbac_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::rbac::{Permission, Role},
    services::access_control::AccessSnapshot,
};

const ROLE_WITH_PERMISSIONS: &str = r#"
    SELECT r.id, r.name, r.code, r.description, r.is_system, r.created_at,
           COALESCE(
               array_agg(rp.permission_id) FILTER (WHERE rp.permission_id IS NOT NULL),
               '{}'
           ) AS permissions
    FROM roles r
    LEFT JOIN role_permissions rp ON rp.role_id = r.id
"#;

#[derive(Clone)]
pub struct RbacRepository {
    pool: PgPool,
}

impl RbacRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>(&format!(
            "{ROLE_WITH_PERMISSIONS} GROUP BY r.id ORDER BY r.created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    pub async fn find_role<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Role>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let role = sqlx::query_as::<_, Role>(&format!(
            "{ROLE_WITH_PERMISSIONS} WHERE r.id = $1 GROUP BY r.id"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(role)
    }

    pub async fn create_role<'e, E>(
        &self,
        executor: E,
        name: &str,
        code: &str,
        description: Option<&str>,
    ) -> Result<Role, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (name, code, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, code, description, is_system, created_at,
                      '{}'::uuid[] AS permissions
            "#,
        )
        .bind(name)
        .bind(code)
        .bind(description)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::RoleCodeAlreadyExists(code.to_string());
                }
            }
            e.into()
        })
    }

    pub async fn update_role<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE roles SET name = $2, description = $3 WHERE id = $1")
            .bind(id)
            .bind(name)
            .bind(description)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete_role<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn list_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions ORDER BY module, code",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(permissions)
    }

    // Resolves permission codes to catalog rows; unknown codes are simply
    // absent from the result.
    pub async fn find_permissions_by_codes<'e, E>(
        &self,
        executor: E,
        codes: &[String],
    ) -> Result<Vec<Permission>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let permissions =
            sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE code = ANY($1)")
                .bind(codes)
                .fetch_all(executor)
                .await?;
        Ok(permissions)
    }

    pub async fn assign_permissions<'e, E>(
        &self,
        executor: E,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // bulk insert via UNNEST
        sqlx::query(
            r#"
            INSERT INTO role_permissions (role_id, permission_id)
            SELECT $1, unnest($2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(role_id)
        .bind(permission_ids)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn clear_permissions<'e, E>(&self, executor: E, role_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
            .bind(role_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // One snapshot of both catalogs for the pure evaluator.
    pub async fn access_snapshot(&self) -> Result<AccessSnapshot, AppError> {
        let roles = self.list_roles().await?;
        let permissions = self.list_permissions().await?;
        Ok(AccessSnapshot { roles, permissions })
    }
}
