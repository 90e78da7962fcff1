// src/db/crm_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::crm::{Customer, CustomerWithStats},
};

// Aggregates are derived from orders at read time (matched by customer
// name/e-mail, the keys the POS captures) rather than stored on the
// customer row.
const CUSTOMER_WITH_STATS: &str = r#"
    SELECT c.*,
           COUNT(o.id) AS total_orders,
           COALESCE(SUM(o.total_amount), 0) AS total_spent,
           MAX(o.created_at) AS last_order_at
    FROM customers c
    LEFT JOIN orders o
        ON o.status <> 'cancelled'
       AND (o.customer_email = c.email OR o.customer_name = c.name)
"#;

#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_customers(&self) -> Result<Vec<CustomerWithStats>, AppError> {
        let customers = sqlx::query_as::<_, CustomerWithStats>(&format!(
            "{CUSTOMER_WITH_STATS} GROUP BY c.id ORDER BY c.name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    pub async fn find_customer(&self, id: Uuid) -> Result<Option<CustomerWithStats>, AppError> {
        let customer = sqlx::query_as::<_, CustomerWithStats>(&format!(
            "{CUSTOMER_WITH_STATS} WHERE c.id = $1 GROUP BY c.id"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    pub async fn create_customer<'e, E>(
        &self,
        executor: E,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        company: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, email, phone, address, company, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(company)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(customer)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_customer<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        company: Option<&str>,
        notes: Option<&str>,
        is_active: bool,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name = $2, email = $3, phone = $4, address = $5,
                company = $6, notes = $7, is_active = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(company)
        .bind(notes)
        .bind(is_active)
        .fetch_optional(executor)
        .await?;
        customer.ok_or(AppError::NotFound("Customer"))
    }
}
