// src/services/order_service.rs

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditRepository, OrderRepository},
    models::{
        audit::AuditEntityType,
        auth::User,
        inventory::MovementType,
        orders::{Order, OrderDetail, OrderStatus},
    },
    services::inventory_service::InventoryService,
};

// One POS cart line. Prices come from the catalog, not from the client.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub items: Vec<NewOrderItem>,
    pub tax: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub payment_method: Option<String>,
}

// Missing tax/discount mean zero, not an error.
fn order_total(subtotal: Decimal, tax: Option<Decimal>, discount: Option<Decimal>) -> Decimal {
    subtotal + tax.unwrap_or(Decimal::ZERO) - discount.unwrap_or(Decimal::ZERO)
}

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    inventory_service: InventoryService,
    audit_repo: AuditRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(
        repo: OrderRepository,
        inventory_service: InventoryService,
        audit_repo: AuditRepository,
        pool: PgPool,
    ) -> Self {
        Self { repo, inventory_service, audit_repo, pool }
    }

    // Creates an order in `pending`. No stock moves yet; the ledger is only
    // touched when the order transitions to `processing`.
    pub async fn create_order(&self, new_order: NewOrder, actor: &User) -> Result<OrderDetail, AppError> {
        let mut tx = self.pool.begin().await?;
        let detail = self.create_order_on(&mut *tx, new_order, actor).await?;
        tx.commit().await?;
        Ok(detail)
    }

    // Order status state machine. `pending -> processing` is the
    // confirmation step: it emits one outward movement per line item inside
    // the same transaction, so either the whole order is fulfilled from
    // stock or nothing changes.
    pub async fn transition_status(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
        actor: &User,
    ) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;
        let order = self.transition_on(&mut *tx, order_id, new_status, actor).await?;
        tx.commit().await?;
        Ok(order)
    }

    // POS checkout: create + confirm in one transaction.
    pub async fn checkout(&self, new_order: NewOrder, actor: &User) -> Result<OrderDetail, AppError> {
        let mut tx = self.pool.begin().await?;
        let detail = self.create_order_on(&mut *tx, new_order, actor).await?;
        let order = self
            .transition_on(&mut *tx, detail.order.id, OrderStatus::Processing, actor)
            .await?;
        tx.commit().await?;
        Ok(OrderDetail { order, items: detail.items })
    }

    pub async fn get_order(&self, id: Uuid) -> Result<OrderDetail, AppError> {
        let order = self
            .repo
            .find_order(id)
            .await?
            .ok_or(AppError::NotFound("Order"))?;
        let items = self.repo.list_items(&self.pool, id).await?;
        Ok(OrderDetail { order, items })
    }

    pub async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, AppError> {
        self.repo.list_orders(status).await
    }

    async fn create_order_on(
        &self,
        conn: &mut PgConnection,
        new_order: NewOrder,
        actor: &User,
    ) -> Result<OrderDetail, AppError> {
        if new_order.customer_name.trim().is_empty() {
            return Err(AppError::InvalidInput("Customer name is required.".into()));
        }
        if new_order.items.is_empty() {
            return Err(AppError::InvalidInput("An order needs at least one item.".into()));
        }
        for item in &new_order.items {
            if item.quantity <= 0 {
                return Err(AppError::InvalidInput("Item quantities must be positive.".into()));
            }
        }

        // Price the cart from the catalog.
        let mut lines = Vec::with_capacity(new_order.items.len());
        let mut subtotal = Decimal::ZERO;
        for item in &new_order.items {
            let product = self
                .inventory_service
                .get_product(item.product_id)
                .await?
                .product;
            let line_total = product.unit_price * Decimal::from(item.quantity);
            subtotal += line_total;
            lines.push((product, item.quantity, line_total));
        }

        let total_amount = order_total(subtotal, new_order.tax, new_order.discount);

        let order_number = self.repo.next_order_number(&mut *conn).await?;
        let order = self
            .repo
            .create_order(
                &mut *conn,
                &order_number,
                &new_order.customer_name,
                new_order.customer_email.as_deref(),
                new_order.customer_phone.as_deref(),
                new_order.customer_address.as_deref(),
                total_amount,
                new_order.tax,
                new_order.discount,
                new_order.payment_method.as_deref(),
                actor.id,
            )
            .await?;

        let mut items = Vec::with_capacity(lines.len());
        for (product, quantity, line_total) in lines {
            let item = self
                .repo
                .insert_order_item(
                    &mut *conn,
                    order.id,
                    product.id,
                    &product.name,
                    &product.sku,
                    quantity,
                    product.unit_price,
                    line_total,
                )
                .await?;
            items.push(item);
        }

        self.audit_repo
            .record(
                &mut *conn,
                "order.create",
                AuditEntityType::Order,
                order.id,
                &format!("Created order {} ({} items)", order.order_number, items.len()),
                actor,
            )
            .await?;

        Ok(OrderDetail { order, items })
    }

    async fn transition_on(
        &self,
        conn: &mut PgConnection,
        order_id: Uuid,
        new_status: OrderStatus,
        actor: &User,
    ) -> Result<Order, AppError> {
        let order = self
            .repo
            .find_order_for_update(&mut *conn, order_id)
            .await?
            .ok_or(AppError::NotFound("Order"))?;

        if !order.status.can_transition(new_status) {
            return Err(AppError::InvalidStatusTransition { from: order.status, to: new_status });
        }

        if order.status == OrderStatus::Pending && new_status == OrderStatus::Processing {
            // Confirmation consumes stock: one outward movement per line
            // item, all under this transaction. Insufficient stock on any
            // line aborts the whole transition.
            let items = self.repo.list_items(&mut *conn, order_id).await?;
            for item in &items {
                self.inventory_service
                    .apply_movement(
                        &mut *conn,
                        item.product_id,
                        MovementType::Outward,
                        item.quantity,
                        "Order fulfillment",
                        Some(&order.order_number),
                        actor,
                    )
                    .await?;
            }
        }

        let updated = self.repo.update_status(&mut *conn, order_id, new_status).await?;

        self.audit_repo
            .record(
                &mut *conn,
                "order.status",
                AuditEntityType::Order,
                order_id,
                &format!("Order {}: {} -> {}", order.order_number, order.status, new_status),
                actor,
            )
            .await?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[rstest]
    // subtotal only
    #[case(dec(10_000), None, None, dec(10_000))]
    // tax adds, discount subtracts
    #[case(dec(10_000), Some(dec(1_000)), None, dec(11_000))]
    #[case(dec(10_000), None, Some(dec(2_500)), dec(7_500))]
    #[case(dec(10_000), Some(dec(1_000)), Some(dec(2_500)), dec(8_500))]
    // a discount larger than the subtotal is the operator's business
    #[case(dec(1_000), None, Some(dec(1_500)), dec(-500))]
    fn order_total_arithmetic(
        #[case] subtotal: Decimal,
        #[case] tax: Option<Decimal>,
        #[case] discount: Option<Decimal>,
        #[case] expected: Decimal,
    ) {
        assert_eq!(order_total(subtotal, tax, discount), expected);
    }

    #[test]
    fn line_pricing_is_quantity_times_unit_price() {
        let unit_price = dec(1_990);
        let line_total = unit_price * Decimal::from(3);
        assert_eq!(line_total, dec(5_970));
    }
}
