// src/services/inventory_service.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditRepository, InventoryRepository},
    models::{
        audit::AuditEntityType,
        auth::User,
        inventory::{
            Category, CategoryWithStats, MovementType, Product, ProductWithStatus, StockMovement,
        },
    },
    services::ledger,
};

#[derive(Clone)]
pub struct InventoryService {
    repo: InventoryRepository,
    audit_repo: AuditRepository,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(repo: InventoryRepository, audit_repo: AuditRepository, pool: PgPool) -> Self {
        Self { repo, audit_repo, pool }
    }

    // ---
    // Catalog
    // ---

    pub async fn list_products(&self) -> Result<Vec<ProductWithStatus>, AppError> {
        let products = self.repo.list_products().await?;
        Ok(products.into_iter().map(with_status).collect())
    }

    pub async fn get_product(&self, id: Uuid) -> Result<ProductWithStatus, AppError> {
        let product = self
            .repo
            .find_product(id)
            .await?
            .ok_or(AppError::NotFound("Product"))?;
        Ok(with_status(product))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        sku: &str,
        name: &str,
        category: &str,
        description: Option<&str>,
        initial_stock: i32,
        min_stock: i32,
        max_stock: i32,
        unit_price: Decimal,
        unit: &str,
        location: Option<&str>,
        actor: &User,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .repo
            .create_product(
                &mut *tx, sku, name, category, description, min_stock, max_stock, unit_price,
                unit, location,
            )
            .await?;

        // Opening stock goes through the ledger like everything else, so
        // even the first unit is covered by a movement record.
        let product = if initial_stock > 0 {
            let plan = ledger::plan_movement(0, MovementType::Inward, initial_stock, "Initial stock")?;
            self.repo.set_current_stock(&mut *tx, product.id, plan.new_stock).await?;
            self.repo
                .record_movement(
                    &mut *tx,
                    &product,
                    MovementType::Inward,
                    plan,
                    "Initial stock",
                    None,
                    actor.id,
                )
                .await?;
            Product { current_stock: plan.new_stock, ..product }
        } else {
            product
        };

        self.audit_repo
            .record(
                &mut *tx,
                "product.create",
                AuditEntityType::Product,
                product.id,
                &format!("Created product '{}' ({})", product.name, product.sku),
                actor,
            )
            .await?;

        tx.commit().await?;
        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_product(
        &self,
        id: Uuid,
        name: &str,
        category: &str,
        description: Option<&str>,
        min_stock: i32,
        max_stock: i32,
        unit_price: Decimal,
        unit: &str,
        location: Option<&str>,
        actor: &User,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .repo
            .update_product(
                &mut *tx, id, name, category, description, min_stock, max_stock, unit_price,
                unit, location,
            )
            .await?;

        self.audit_repo
            .record(
                &mut *tx,
                "product.update",
                AuditEntityType::Product,
                product.id,
                &format!("Updated product '{}'", product.name),
                actor,
            )
            .await?;

        tx.commit().await?;
        Ok(product)
    }

    // ---
    // Categories
    // ---

    pub async fn list_categories(&self) -> Result<Vec<CategoryWithStats>, AppError> {
        self.repo.list_categories().await
    }

    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
        actor: &User,
    ) -> Result<Category, AppError> {
        let mut tx = self.pool.begin().await?;

        let category = self.repo.create_category(&mut *tx, name, description).await?;

        self.audit_repo
            .record(
                &mut *tx,
                "category.create",
                AuditEntityType::Category,
                category.id,
                &format!("Created category '{}'", category.name),
                actor,
            )
            .await?;

        tx.commit().await?;
        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        actor: &User,
    ) -> Result<Category, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing = self
            .repo
            .find_category(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Category"))?;
        let category = self.repo.update_category(&mut *tx, id, name, description).await?;

        // Products carry the category name, so a rename follows through in
        // the same transaction.
        if existing.name != category.name {
            self.repo
                .rename_products_category(&mut *tx, &existing.name, &category.name)
                .await?;
        }

        self.audit_repo
            .record(
                &mut *tx,
                "category.update",
                AuditEntityType::Category,
                category.id,
                &format!("Updated category '{}'", category.name),
                actor,
            )
            .await?;

        tx.commit().await?;
        Ok(category)
    }

    // Deleting a category leaves its products in place; their label simply
    // no longer matches a catalog row.
    pub async fn delete_category(&self, id: Uuid, actor: &User) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let existing = self
            .repo
            .find_category(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Category"))?;
        self.repo.delete_category(&mut *tx, id).await?;

        self.audit_repo
            .record(
                &mut *tx,
                "category.delete",
                AuditEntityType::Category,
                id,
                &format!("Deleted category '{}'", existing.name),
                actor,
            )
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // ---
    // Ledger
    // ---

    /// Applies a stock movement atomically. This is the single serialization
    /// point for stock: the product row is locked, the movement validated
    /// against the stock read under that lock, and the stock update plus the
    /// ledger append commit together or not at all.
    #[allow(clippy::too_many_arguments)]
    pub async fn apply_movement<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        movement_type: MovementType,
        quantity: i32,
        reason: &str,
        reference: Option<&str>,
        actor: &User,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let product = self
            .repo
            .find_product_for_update(&mut *tx, product_id)
            .await?
            .ok_or(AppError::NotFound("Product"))?;

        let plan = ledger::plan_movement(product.current_stock, movement_type, quantity, reason)?;

        self.repo.set_current_stock(&mut *tx, product.id, plan.new_stock).await?;
        let movement = self
            .repo
            .record_movement(&mut *tx, &product, movement_type, plan, reason, reference, actor.id)
            .await?;

        let action = match movement_type {
            MovementType::Inward => "stock.inward",
            MovementType::Outward => "stock.outward",
            MovementType::Adjustment => "stock.adjustment",
        };
        self.audit_repo
            .record(
                &mut *tx,
                action,
                AuditEntityType::Stock,
                product.id,
                &format!(
                    "{} '{}': {} -> {} ({})",
                    action, product.name, plan.previous_stock, plan.new_stock, reason
                ),
                actor,
            )
            .await?;

        tx.commit().await?;
        Ok(movement)
    }

    pub async fn list_movements(
        &self,
        product_id: Option<Uuid>,
        movement_type: Option<MovementType>,
    ) -> Result<Vec<StockMovement>, AppError> {
        self.repo.list_movements(product_id, movement_type).await
    }

    // Low-stock report, split into alerting tiers.
    pub async fn low_stock_report(&self) -> Result<Vec<ProductWithStatus>, AppError> {
        let products = self.repo.low_stock_products().await?;
        Ok(products.into_iter().map(with_status).collect())
    }
}

fn with_status(product: Product) -> ProductWithStatus {
    let stock_status =
        ledger::stock_status(product.current_stock, product.min_stock, product.max_stock);
    let criticality = ledger::criticality_tier(product.current_stock, product.min_stock);
    ProductWithStatus { product, stock_status, criticality }
}
