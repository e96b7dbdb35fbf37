//! Order models.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::models::Product;

/// Where an order sits in the manual fulfilment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    AwaitingPayment,
    PaymentSubmitted,
    PaymentConfirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::AwaitingPayment => "awaiting_payment",
            Self::PaymentSubmitted => "payment_submitted",
            Self::PaymentConfirmed => "payment_confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable label for status badges.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::AwaitingPayment => "Awaiting Payment",
            Self::PaymentSubmitted => "Payment Submitted",
            Self::PaymentConfirmed => "Payment Confirmed",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// How the shopper intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Bank transfer or e-wallet, settled by manual proof upload.
    Online,
    /// Cash on delivery.
    Cod,
}

/// An order row.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// An order row with the embedded customer fields the back-office list shows.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderWithCustomer {
    #[serde(flatten)]
    pub order: Order,
    #[serde(rename = "users")]
    pub customer: Option<CustomerRef>,
}

/// The customer columns embedded in back-office reads.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRef {
    pub full_name: String,
    pub email: String,
}

/// One line of an order, optionally with its product row embedded.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(rename = "products")]
    pub product: Option<Product>,
}

/// Insert payload for an order row.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewOrderRow {
    pub(crate) user_id: Uuid,
    pub(crate) status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) total_amount: Decimal,
    pub(crate) notes: Option<String>,
}

/// Insert payload for an order line.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewOrderItemRow {
    pub(crate) order_id: Uuid,
    pub(crate) product_id: Uuid,
    pub(crate) quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) unit_price: Decimal,
}
