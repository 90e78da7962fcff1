// src/db/settings_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::settings::CompanySettings};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<CompanySettings, AppError> {
        let settings = sqlx::query_as::<_, CompanySettings>(
            "SELECT name, address, phone, email, tax_id, receipt_footer, updated_at
             FROM company_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        settings.ok_or(AppError::NotFound("Company settings"))
    }

    pub async fn update(
        &self,
        name: &str,
        address: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        tax_id: Option<&str>,
        receipt_footer: Option<&str>,
    ) -> Result<CompanySettings, AppError> {
        let settings = sqlx::query_as::<_, CompanySettings>(
            r#"
            UPDATE company_settings
            SET name = $1, address = $2, phone = $3, email = $4,
                tax_id = $5, receipt_footer = $6, updated_at = now()
            WHERE id = 1
            RETURNING name, address, phone, email, tax_id, receipt_footer, updated_at
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(email)
        .bind(tax_id)
        .bind(receipt_footer)
        .fetch_optional(&self.pool)
        .await?;
        settings.ok_or(AppError::NotFound("Company settings"))
    }
}
