//! Product snapshots

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A copy of a product's display fields captured at the moment it was added
/// to the cart.
///
/// Snapshots are not live-linked to the catalog: price and stock reflect the
/// product as last fetched, and are not re-validated until checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Catalog identity of the product.
    pub id: Uuid,

    /// Display name at add time.
    pub name: String,

    /// Unit price at add time.
    pub price: Decimal,

    /// Image reference at add time, when the product had one.
    pub image_url: Option<String>,

    /// Stock count as last fetched. Informational only; the cart never
    /// clamps quantities to it.
    pub stock: u32,
}
