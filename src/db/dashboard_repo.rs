// src/db/dashboard_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::dashboard::DashboardStats};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // All figures derive from the source-of-truth tables in one query;
    // nothing here is a stored counter.
    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let stats = sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM products) AS total_products,
                (SELECT COUNT(*) FROM products WHERE current_stock <= min_stock) AS low_stock_products,
                (SELECT COUNT(*) FROM orders) AS total_orders,
                (SELECT COUNT(*) FROM orders WHERE status = 'pending') AS pending_orders,
                (SELECT COALESCE(SUM(total_amount), 0) FROM orders
                 WHERE status IN ('processing', 'shipped', 'delivered')) AS total_revenue,
                (SELECT COALESCE(SUM(current_stock * unit_price), 0) FROM products) AS stock_value
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }
}
