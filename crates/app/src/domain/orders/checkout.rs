//! Checkout orchestration.

use alahas::store::{CartStore, StoredCart};
use uuid::Uuid;

use crate::domain::orders::{
    errors::OrdersServiceError,
    models::{Order, PaymentMethod},
    service::OrdersService,
};

/// Places an order from the stored cart, clearing the cart only after the
/// order exists.
///
/// Under [`ItemFailurePolicy::Fail`] a partial order leaves the cart intact
/// so the shopper can retry without re-picking their items.
///
/// # Errors
///
/// Propagates any [`OrdersServiceError`] from [`OrdersService::place_order`].
///
/// [`ItemFailurePolicy::Fail`]: crate::domain::orders::service::ItemFailurePolicy
pub async fn checkout<S: CartStore>(
    orders: &dyn OrdersService,
    stored: &mut StoredCart<S>,
    user_id: Uuid,
    notes: Option<String>,
    method: PaymentMethod,
) -> Result<Order, OrdersServiceError> {
    let order = orders
        .place_order(user_id, stored.cart(), notes, method)
        .await?;

    stored.clear();

    Ok(order)
}

#[cfg(test)]
mod tests {
    use alahas::{cart::Cart, snapshot::ProductSnapshot, store::CartStoreError};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::domain::orders::{models::OrderStatus, service::MockOrdersService};

    use super::*;

    struct MemoryStore;

    impl CartStore for MemoryStore {
        fn load(&self) -> Result<Option<Cart>, CartStoreError> {
            Ok(None)
        }

        fn save(&self, _cart: &Cart) -> Result<(), CartStoreError> {
            Ok(())
        }
    }

    fn stored_cart_with_one_line() -> StoredCart<MemoryStore> {
        let mut stored = StoredCart::open(MemoryStore);

        stored.add(ProductSnapshot {
            id: Uuid::new_v4(),
            name: "Gold ring".to_owned(),
            price: Decimal::from(1000),
            image_url: None,
            stock: 5,
        });

        stored
    }

    fn placed_order(user_id: Uuid) -> Order {
        Order {
            id: Uuid::new_v4(),
            user_id,
            status: OrderStatus::AwaitingPayment,
            total_amount: Decimal::from(1000),
            notes: None,
            created_at: jiff::Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn successful_checkout_clears_the_cart() -> TestResult {
        let user_id = Uuid::new_v4();
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .times(1)
            .returning(move |user_id, _, _, _| Ok(placed_order(user_id)));

        let mut stored = stored_cart_with_one_line();

        checkout(
            &orders,
            &mut stored,
            user_id,
            None,
            PaymentMethod::Online,
        )
        .await?;

        assert!(stored.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn failed_checkout_keeps_the_cart() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .returning(|_, _, _, _| Err(OrdersServiceError::EmptyCart));

        let mut stored = stored_cart_with_one_line();

        let result = checkout(
            &orders,
            &mut stored,
            Uuid::nil(),
            None,
            PaymentMethod::Online,
        )
        .await;

        assert!(result.is_err(), "checkout should propagate the failure");
        assert_eq!(stored.cart().total_items(), 1);
    }
}
