// src/db/order_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::orders::{Order, OrderItem, OrderStatus},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Sequential, human-readable order numbers from a dedicated sequence.
    pub async fn next_order_number<'e, E>(&self, executor: E) -> Result<String, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (seq,): (i64,) = sqlx::query_as("SELECT nextval('order_number_seq')")
            .fetch_one(executor)
            .await?;
        Ok(format!("ORD-{seq:06}"))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_order<'e, E>(
        &self,
        executor: E,
        order_number: &str,
        customer_name: &str,
        customer_email: Option<&str>,
        customer_phone: Option<&str>,
        customer_address: Option<&str>,
        total_amount: Decimal,
        tax: Option<Decimal>,
        discount: Option<Decimal>,
        payment_method: Option<&str>,
        created_by: Uuid,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders
                (order_number, customer_name, customer_email, customer_phone,
                 customer_address, status, total_amount, tax, discount,
                 payment_method, created_by)
            VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(order_number)
        .bind(customer_name)
        .bind(customer_email)
        .bind(customer_phone)
        .bind(customer_address)
        .bind(total_amount)
        .bind(tax)
        .bind(discount)
        .bind(payment_method)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    pub async fn insert_order_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        product_id: Uuid,
        product_name: &str,
        sku: &str,
        quantity: i32,
        unit_price: Decimal,
        total: Decimal,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items
                (order_id, product_id, product_name, sku, quantity, unit_price, total)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(product_name)
        .bind(sku)
        .bind(quantity)
        .bind(unit_price)
        .bind(total)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    pub async fn find_order(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    // Status transitions also pass through a row lock: the order's status
    // read and the stock movements it triggers must see one consistent
    // order.
    pub async fn find_order_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(order)
    }

    pub async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE ($1::order_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn list_items<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<Vec<OrderItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1 ORDER BY id ASC",
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?;
        order.ok_or(AppError::NotFound("Order"))
    }
}
