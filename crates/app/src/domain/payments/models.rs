//! Payment models.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::orders::models::OrderWithCustomer;

/// Review state of a submitted payment proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl PaymentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable label for status badges.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Rejected => "Rejected",
        }
    }
}

/// A manual proof-of-transfer payment row.
#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount: Decimal,
    pub payment_method: String,
    pub proof_url: String,
    pub status: PaymentStatus,
    pub confirmed_by: Option<Uuid>,
    pub confirmed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A payment with its order (and that order's customer) embedded, as the
/// back-office review list reads it.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentWithOrder {
    #[serde(flatten)]
    pub payment: Payment,
    #[serde(rename = "orders")]
    pub order: Option<OrderWithCustomer>,
}

/// Insert payload for a pending payment.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewPaymentRow {
    pub(crate) order_id: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) amount: Decimal,
    pub(crate) payment_method: String,
    pub(crate) proof_url: String,
    pub(crate) status: PaymentStatus,
}
