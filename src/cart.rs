//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::snapshot::ProductSnapshot;

/// One (product snapshot, quantity) pair in the shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product as it looked when first added.
    pub product: ProductSnapshot,

    /// How many units of the product the shopper wants. Always positive;
    /// a line whose quantity would drop to zero is removed instead.
    pub quantity: u32,
}

impl CartLine {
    /// The line's contribution to the cart total, at its snapshot price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// An ordered collection of [`CartLine`], scoped to one browsing session.
///
/// Lines keep first-added-first order and there is at most one line per
/// distinct product id. Every operation is a total function: the cart itself
/// cannot fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cart from already-deduplicated lines, e.g. when rehydrating
    /// from durable storage.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds one unit of `product`.
    ///
    /// When a line for the product id already exists its quantity is
    /// incremented; otherwise a new line is appended with quantity 1,
    /// snapshotting the product as given. Live stock is not consulted.
    pub fn add(&mut self, product: ProductSnapshot) {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }

        self.lines.push(CartLine {
            product,
            quantity: 1,
        });
    }

    /// Sets the quantity of the line for `product_id`.
    ///
    /// A quantity of zero or below removes the line entirely. Quantities are
    /// not clamped to the snapshot's stock count. Unknown ids are a no-op.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        // Quantities past u32::MAX saturate rather than wrap.
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    /// Removes the line for `product_id`, if present. Removing an absent id
    /// is a no-op, not an error.
    pub fn remove(&mut self, product_id: Uuid) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    /// Empties the cart. Used after a successful checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines. Recomputed on every access.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Sum of (snapshot price x quantity) across all lines. Recomputed on
    /// every access.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    fn line_mut(&mut self, product_id: Uuid) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn snapshot(id: Uuid, name: &str, price: i64) -> ProductSnapshot {
        ProductSnapshot {
            id,
            name: name.to_owned(),
            price: Decimal::from(price),
            image_url: None,
            stock: 10,
        }
    }

    #[test]
    fn empty_cart_has_zero_totals() {
        let cart = Cart::new();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn adding_same_product_twice_accumulates_one_line() -> TestResult {
        let mut cart = Cart::new();
        let id = Uuid::new_v4();

        cart.add(snapshot(id, "Gold ring", 1000));
        cart.add(snapshot(id, "Gold ring", 1000));

        assert_eq!(cart.len(), 1, "one line per distinct product id");

        let line = cart.lines().first().ok_or("cart should hold a line")?;

        assert_eq!(line.quantity, 2);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_amount(), Decimal::from(2000));

        Ok(())
    }

    #[test]
    fn lines_keep_insertion_order() -> TestResult {
        let mut cart = Cart::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        cart.add(snapshot(first, "Gold ring", 1000));
        cart.add(snapshot(second, "Silver chain", 500));
        cart.add(snapshot(first, "Gold ring", 1000));

        let ids: Vec<Uuid> = cart.lines().iter().map(|line| line.product.id).collect();

        assert_eq!(ids, vec![first, second]);

        Ok(())
    }

    #[test]
    fn update_quantity_recomputes_total() {
        let mut cart = Cart::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        cart.add(snapshot(a, "Gold ring", 1000));
        cart.add(snapshot(b, "Silver chain", 500));

        cart.update_quantity(a, 3);

        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_amount(), Decimal::from(3500));
    }

    #[test]
    fn update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        let id = Uuid::new_v4();

        cart.add(snapshot(id, "Gold ring", 1000));
        cart.update_quantity(id, 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_to_negative_removes_line() {
        let mut cart = Cart::new();
        let id = Uuid::new_v4();

        cart.add(snapshot(id, "Gold ring", 1000));
        cart.update_quantity(id, -1);

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_for_unknown_id_is_noop() {
        let mut cart = Cart::new();
        let id = Uuid::new_v4();

        cart.add(snapshot(id, "Gold ring", 1000));
        cart.update_quantity(Uuid::new_v4(), 5);

        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn removing_absent_id_is_noop() {
        let mut cart = Cart::new();
        let id = Uuid::new_v4();

        cart.add(snapshot(id, "Gold ring", 1000));
        cart.remove(Uuid::new_v4());

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn remove_deletes_only_that_line() {
        let mut cart = Cart::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        cart.add(snapshot(a, "Gold ring", 1000));
        cart.add(snapshot(b, "Silver chain", 500));

        cart.remove(b);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_amount(), Decimal::from(1000));
    }

    #[test]
    fn clear_empties_fully() {
        let mut cart = Cart::new();

        cart.add(snapshot(Uuid::new_v4(), "Gold ring", 1000));
        cart.add(snapshot(Uuid::new_v4(), "Silver chain", 500));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn snapshot_price_is_kept_over_later_catalog_changes() -> TestResult {
        let mut cart = Cart::new();
        let id = Uuid::new_v4();

        cart.add(snapshot(id, "Gold ring", 1000));

        // A later add sees a repriced catalog row; the existing snapshot wins.
        cart.add(snapshot(id, "Gold ring", 1200));

        assert_eq!(cart.total_amount(), Decimal::from(2000));

        Ok(())
    }

    #[test]
    fn total_amount_keeps_minor_unit_precision() {
        let mut cart = Cart::new();
        let id = Uuid::new_v4();

        cart.add(ProductSnapshot {
            id,
            name: "Stud earrings".to_owned(),
            price: Decimal::new(1995, 2),
            image_url: None,
            stock: 1,
        });
        cart.update_quantity(id, 3);

        assert_eq!(cart.total_amount(), Decimal::new(5985, 2));
    }

    #[test]
    fn serialized_cart_round_trips() -> TestResult {
        let mut cart = Cart::new();

        cart.add(snapshot(Uuid::new_v4(), "Gold ring", 1000));
        cart.add(snapshot(Uuid::new_v4(), "Silver chain", 500));
        cart.update_quantity(
            cart.lines()
                .first()
                .ok_or("cart should hold a line")?
                .product
                .id,
            2,
        );

        let encoded = serde_json::to_string(&cart)?;
        let decoded: Cart = serde_json::from_str(&encoded)?;

        assert_eq!(decoded, cart);

        Ok(())
    }
}
