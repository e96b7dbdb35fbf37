//! Catalog models.

use alahas::snapshot::ProductSnapshot;
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product row.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock: u32,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl Product {
    /// Captures the display fields the cart keeps after add-to-cart.
    #[must_use]
    pub fn to_snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
            stock: self.stock,
        }
    }
}

/// Payload for creating or replacing a product row.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock: u32,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_row_deserializes_from_backend_json() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": Uuid::nil(),
            "name": "Pearl pendant",
            "description": "Freshwater pearl on a gold chain",
            "price": 1250.50,
            "image_url": null,
            "category": "necklaces",
            "stock": 4,
            "is_active": true,
            "created_at": "2024-05-01T10:00:00.000000+00:00",
        }))
        .expect("product row should deserialize");

        assert_eq!(product.price, Decimal::new(125_050, 2));
        assert_eq!(product.category.as_deref(), Some("necklaces"));
    }

    #[test]
    fn snapshot_copies_display_fields() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": Uuid::nil(),
            "name": "Pearl pendant",
            "description": "",
            "price": 100,
            "image_url": "https://example.test/p.jpg",
            "category": null,
            "stock": 4,
            "is_active": true,
            "created_at": "2024-05-01T10:00:00Z",
        }))
        .expect("product row should deserialize");

        let snapshot = product.to_snapshot();

        assert_eq!(snapshot.id, product.id);
        assert_eq!(snapshot.price, product.price);
        assert_eq!(snapshot.stock, 4);
    }

    #[test]
    fn new_product_serializes_price_as_a_number() {
        let payload = serde_json::to_value(NewProduct {
            name: "Pearl pendant".to_owned(),
            description: String::new(),
            price: Decimal::new(1999, 2),
            image_url: None,
            category: None,
            stock: 1,
            is_active: true,
        })
        .expect("payload should serialize");

        assert_eq!(payload["price"], serde_json::json!(19.99));
    }
}
