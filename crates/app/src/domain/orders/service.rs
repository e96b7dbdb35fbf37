//! Orders service.

use std::sync::Arc;

use alahas::cart::Cart;
use async_trait::async_trait;
use mockall::automock;
use serde_json::json;
use tracing::{Span, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        decode_rows,
        orders::{
            errors::OrdersServiceError,
            models::{
                NewOrderItemRow, NewOrderRow, Order, OrderItem, OrderStatus, OrderWithCustomer,
                PaymentMethod,
            },
        },
    },
    gateway::{Direction, Filter, Gateway, Query},
};

/// What to do when an order row was created but a line-item insert fails.
///
/// The backend offers no multi-statement transaction to this client, so the
/// order and its items are written sequentially and a mid-loop failure
/// leaves a partial order behind either way; the policy only decides whether
/// the caller hears about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemFailurePolicy {
    /// Log a warning and keep going (historical behavior).
    #[default]
    Ignore,

    /// Finish the loop, then report the created order id and the failed
    /// product ids.
    Fail,
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// The shopper's own orders, newest first.
    async fn list_orders_for_user(&self, user_id: Uuid)
    -> Result<Vec<Order>, OrdersServiceError>;

    /// Every order with its customer embedded, newest first (back-office).
    async fn list_all_orders(&self) -> Result<Vec<OrderWithCustomer>, OrdersServiceError>;

    /// A single order by id.
    async fn get_order(&self, id: Uuid) -> Result<Order, OrdersServiceError>;

    /// The lines of an order, each with its product row embedded.
    async fn get_order_items(&self, order_id: Uuid)
    -> Result<Vec<OrderItem>, OrdersServiceError>;

    /// Moves an order to a new status (back-office).
    async fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError>;

    /// Turns the cart into an order plus line items.
    ///
    /// COD orders start at `processing` with `[COD]`-prefixed notes; online
    /// orders start at `awaiting_payment`. Stock is not decremented here --
    /// reconciliation is a manual back-office concern.
    async fn place_order(
        &self,
        user_id: Uuid,
        cart: &Cart,
        notes: Option<String>,
        method: PaymentMethod,
    ) -> Result<Order, OrdersServiceError>;
}

/// Gateway-backed [`OrdersService`].
pub struct RestOrdersService {
    gateway: Arc<dyn Gateway>,
    item_failure_policy: ItemFailurePolicy,
}

impl std::fmt::Debug for RestOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestOrdersService")
            .field("item_failure_policy", &self.item_failure_policy)
            .finish_non_exhaustive()
    }
}

impl RestOrdersService {
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>, item_failure_policy: ItemFailurePolicy) -> Self {
        Self {
            gateway,
            item_failure_policy,
        }
    }
}

#[async_trait]
impl OrdersService for RestOrdersService {
    async fn list_orders_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let rows = self
            .gateway
            .select(
                "orders",
                Query::new()
                    .filter(Filter::eq("user_id", user_id))
                    .order("created_at", Direction::Desc),
            )
            .await?;

        Ok(decode_rows(rows)?)
    }

    async fn list_all_orders(&self) -> Result<Vec<OrderWithCustomer>, OrdersServiceError> {
        let rows = self
            .gateway
            .select(
                "orders",
                Query::new()
                    .select("*, users(full_name, email)")
                    .order("created_at", Direction::Desc),
            )
            .await?;

        Ok(decode_rows(rows)?)
    }

    async fn get_order(&self, id: Uuid) -> Result<Order, OrdersServiceError> {
        let row = self
            .gateway
            .select_one("orders", Query::new().filter(Filter::eq("id", id)))
            .await?;

        Ok(serde_json::from_value(row)?)
    }

    async fn get_order_items(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<OrderItem>, OrdersServiceError> {
        let rows = self
            .gateway
            .select(
                "order_items",
                Query::new()
                    .select("*, products(*)")
                    .filter(Filter::eq("order_id", order_id)),
            )
            .await?;

        Ok(decode_rows(rows)?)
    }

    async fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError> {
        self.gateway
            .update(
                "orders",
                json!({ "status": status }),
                vec![Filter::eq("id", order_id)],
            )
            .await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, cart, notes),
        fields(
            user_id = %user_id,
            line_count = cart.len(),
            order_uuid = tracing::field::Empty,
        ),
        err
    )]
    async fn place_order(
        &self,
        user_id: Uuid,
        cart: &Cart,
        notes: Option<String>,
        method: PaymentMethod,
    ) -> Result<Order, OrdersServiceError> {
        if cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let row = NewOrderRow {
            user_id,
            status: initial_status(method),
            total_amount: cart.total_amount(),
            notes: order_notes(method, notes.as_deref()),
        };

        let created = self
            .gateway
            .insert("orders", serde_json::to_value(&row)?)
            .await?;

        let order: Order = serde_json::from_value(created)?;

        Span::current().record("order_uuid", tracing::field::display(order.id));

        let mut failed_products = Vec::new();

        for line in cart.lines() {
            let item = NewOrderItemRow {
                order_id: order.id,
                product_id: line.product.id,
                quantity: line.quantity,
                unit_price: line.product.price,
            };

            if let Err(error) = self
                .gateway
                .insert("order_items", serde_json::to_value(&item)?)
                .await
            {
                warn!(
                    order_uuid = %order.id,
                    product_uuid = %line.product.id,
                    %error,
                    "failed to create order item"
                );

                failed_products.push(line.product.id);
            }
        }

        if !failed_products.is_empty() && self.item_failure_policy == ItemFailurePolicy::Fail {
            return Err(OrdersServiceError::PartialOrder {
                order_id: order.id,
                failed_products,
            });
        }

        info!(order_uuid = %order.id, "placed order");

        Ok(order)
    }
}

fn initial_status(method: PaymentMethod) -> OrderStatus {
    match method {
        PaymentMethod::Online => OrderStatus::AwaitingPayment,
        PaymentMethod::Cod => OrderStatus::Processing,
    }
}

fn order_notes(method: PaymentMethod, notes: Option<&str>) -> Option<String> {
    match method {
        PaymentMethod::Cod => Some(format!("[COD] {}", notes.unwrap_or_default()).trim().to_owned()),
        PaymentMethod::Online => notes.map(str::to_owned),
    }
}
