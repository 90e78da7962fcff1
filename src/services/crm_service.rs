// src/services/crm_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditRepository, CrmRepository},
    models::{
        audit::AuditEntityType,
        auth::User,
        crm::{Customer, CustomerWithStats},
    },
};

#[derive(Clone)]
pub struct CrmService {
    repo: CrmRepository,
    audit_repo: AuditRepository,
    pool: PgPool,
}

impl CrmService {
    pub fn new(repo: CrmRepository, audit_repo: AuditRepository, pool: PgPool) -> Self {
        Self { repo, audit_repo, pool }
    }

    pub async fn list_customers(&self) -> Result<Vec<CustomerWithStats>, AppError> {
        self.repo.list_customers().await
    }

    pub async fn get_customer(&self, id: Uuid) -> Result<CustomerWithStats, AppError> {
        self.repo
            .find_customer(id)
            .await?
            .ok_or(AppError::NotFound("Customer"))
    }

    pub async fn create_customer(
        &self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        company: Option<&str>,
        notes: Option<&str>,
        actor: &User,
    ) -> Result<Customer, AppError> {
        let mut tx = self.pool.begin().await?;

        let customer = self
            .repo
            .create_customer(&mut *tx, name, email, phone, address, company, notes)
            .await?;

        self.audit_repo
            .record(
                &mut *tx,
                "customer.create",
                AuditEntityType::Customer,
                customer.id,
                &format!("Created customer '{}'", customer.name),
                actor,
            )
            .await?;

        tx.commit().await?;
        Ok(customer)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_customer(
        &self,
        id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        company: Option<&str>,
        notes: Option<&str>,
        is_active: bool,
        actor: &User,
    ) -> Result<Customer, AppError> {
        let mut tx = self.pool.begin().await?;

        let customer = self
            .repo
            .update_customer(&mut *tx, id, name, email, phone, address, company, notes, is_active)
            .await?;

        self.audit_repo
            .record(
                &mut *tx,
                "customer.update",
                AuditEntityType::Customer,
                customer.id,
                &format!("Updated customer '{}'", customer.name),
                actor,
            )
            .await?;

        tx.commit().await?;
        Ok(customer)
    }
}
