// src/db/inventory_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Category, CategoryWithStats, MovementType, Product, StockMovement},
    services::ledger::MovementPlan,
};

// Products reference categories by name, so the count joins on it.
const CATEGORY_WITH_STATS: &str = r#"
    SELECT c.*, COUNT(p.id) AS product_count
    FROM categories c
    LEFT JOIN products p ON p.category = c.name
"#;

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Reads
    // ---

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    pub async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    // Locks the product row for the duration of the transaction. Every
    // stock mutation goes through this lock, which is what serializes
    // concurrent operators on the same product.
    pub async fn find_product_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(product)
    }

    pub async fn low_stock_products(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE current_stock <= min_stock ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // ---
    // Writes
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        sku: &str,
        name: &str,
        category: &str,
        description: Option<&str>,
        min_stock: i32,
        max_stock: i32,
        unit_price: Decimal,
        unit: &str,
        location: Option<&str>,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (sku, name, category, description, min_stock, max_stock,
                                  unit_price, unit, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(sku)
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(min_stock)
        .bind(max_stock)
        .bind(unit_price)
        .bind(unit)
        .bind(location)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::SkuAlreadyExists(sku.to_string());
                }
            }
            e.into()
        })
    }

    // The product-edit path: catalog fields only. Stock is off limits here;
    // it moves exclusively through the ledger.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_product<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        category: &str,
        description: Option<&str>,
        min_stock: i32,
        max_stock: i32,
        unit_price: Decimal,
        unit: &str,
        location: Option<&str>,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, category = $3, description = $4, min_stock = $5,
                max_stock = $6, unit_price = $7, unit = $8, location = $9,
                last_updated = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(min_stock)
        .bind(max_stock)
        .bind(unit_price)
        .bind(unit)
        .bind(location)
        .fetch_optional(executor)
        .await?;
        product.ok_or(AppError::NotFound("Product"))
    }

    pub async fn set_current_stock<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        new_stock: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE products SET current_stock = $2, last_updated = now() WHERE id = $1")
            .bind(id)
            .bind(new_stock)
            .execute(executor)
            .await?;
        Ok(())
    }

    // Appends to the ledger. `previous_stock`/`new_stock` come from the
    // plan computed under the row lock, so they always agree with the
    // product's stock immediately before/after this movement.
    pub async fn record_movement<'e, E>(
        &self,
        executor: E,
        product: &Product,
        movement_type: MovementType,
        plan: MovementPlan,
        reason: &str,
        reference: Option<&str>,
        created_by: Uuid,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements
                (product_id, product_name, movement_type, quantity,
                 previous_stock, new_stock, reason, reference, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(movement_type)
        .bind(plan.quantity)
        .bind(plan.previous_stock)
        .bind(plan.new_stock)
        .bind(reason)
        .bind(reference)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }

    // ---
    // Categories
    // ---

    pub async fn list_categories(&self) -> Result<Vec<CategoryWithStats>, AppError> {
        let categories = sqlx::query_as::<_, CategoryWithStats>(&format!(
            "{CATEGORY_WITH_STATS} GROUP BY c.id ORDER BY c.name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn find_category<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(category)
    }

    pub async fn create_category<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::CategoryAlreadyExists(name.to_string());
                }
            }
            e.into()
        })
    }

    pub async fn update_category<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, description = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::CategoryAlreadyExists(name.to_string());
                }
            }
            e.into()
        })?;
        category.ok_or(AppError::NotFound("Category"))
    }

    pub async fn delete_category<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category"));
        }
        Ok(())
    }

    // A category rename follows through to the products carrying its name.
    pub async fn rename_products_category<'e, E>(
        &self,
        executor: E,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE products SET category = $2 WHERE category = $1")
            .bind(old_name)
            .bind(new_name)
            .execute(executor)
            .await?;
        Ok(())
    }

    // Insertion order is the canonical history order.
    pub async fn list_movements(
        &self,
        product_id: Option<Uuid>,
        movement_type: Option<MovementType>,
    ) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT * FROM stock_movements
            WHERE ($1::uuid IS NULL OR product_id = $1)
              AND ($2::movement_type IS NULL OR movement_type = $2)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(product_id)
        .bind(movement_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }
}
