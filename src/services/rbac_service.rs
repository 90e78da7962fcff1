// src/services/rbac_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditRepository, RbacRepository},
    models::{
        audit::AuditEntityType,
        auth::User,
        rbac::{Permission, Role},
    },
};

#[derive(Clone)]
pub struct RbacService {
    repo: RbacRepository,
    audit_repo: AuditRepository,
    pool: PgPool,
}

impl RbacService {
    pub fn new(repo: RbacRepository, audit_repo: AuditRepository, pool: PgPool) -> Self {
        Self { repo, audit_repo, pool }
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        self.repo.list_roles().await
    }

    pub async fn list_permissions(&self) -> Result<Vec<Permission>, AppError> {
        self.repo.list_permissions().await
    }

    pub async fn create_role(
        &self,
        name: &str,
        code: &str,
        description: Option<&str>,
        permission_codes: &[String],
        actor: &User,
    ) -> Result<Role, AppError> {
        let mut tx = self.pool.begin().await?;

        let role = self.repo.create_role(&mut *tx, name, code, description).await?;

        // Resolve codes ("inventory:read") to catalog ids; unknown codes
        // are dropped silently, matching the deny-by-default evaluator.
        let permissions = self
            .repo
            .find_permissions_by_codes(&mut *tx, permission_codes)
            .await?;
        let permission_ids: Vec<Uuid> = permissions.iter().map(|p| p.id).collect();
        if !permission_ids.is_empty() {
            self.repo.assign_permissions(&mut *tx, role.id, &permission_ids).await?;
        }

        self.audit_repo
            .record(
                &mut *tx,
                "role.create",
                AuditEntityType::Role,
                role.id,
                &format!("Created role '{}' with {} permissions", role.name, permission_ids.len()),
                actor,
            )
            .await?;

        tx.commit().await?;
        Ok(Role { permissions: permission_ids, ..role })
    }

    pub async fn update_role(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        permission_codes: Option<&[String]>,
        actor: &User,
    ) -> Result<Role, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing = self
            .repo
            .find_role(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Role"))?;
        if existing.is_system {
            return Err(AppError::SystemRoleImmutable);
        }

        let new_name = name.unwrap_or(&existing.name);
        let new_description = description.or(existing.description.as_deref());
        self.repo.update_role(&mut *tx, id, new_name, new_description).await?;

        if let Some(codes) = permission_codes {
            let permissions = self.repo.find_permissions_by_codes(&mut *tx, codes).await?;
            let permission_ids: Vec<Uuid> = permissions.iter().map(|p| p.id).collect();
            self.repo.clear_permissions(&mut *tx, id).await?;
            if !permission_ids.is_empty() {
                self.repo.assign_permissions(&mut *tx, id, &permission_ids).await?;
            }
        }

        self.audit_repo
            .record(
                &mut *tx,
                "role.update",
                AuditEntityType::Role,
                id,
                &format!("Updated role '{new_name}'"),
                actor,
            )
            .await?;

        tx.commit().await?;

        let role = self
            .repo
            .find_role(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Role"))?;
        Ok(role)
    }

    pub async fn delete_role(&self, id: Uuid, actor: &User) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let existing = self
            .repo
            .find_role(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Role"))?;
        if existing.is_system {
            return Err(AppError::SystemRoleImmutable);
        }

        self.repo.clear_permissions(&mut *tx, id).await?;
        self.repo.delete_role(&mut *tx, id).await?;

        self.audit_repo
            .record(
                &mut *tx,
                "role.delete",
                AuditEntityType::Role,
                id,
                &format!("Deleted role '{}'", existing.name),
                actor,
            )
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
