//! Orders service errors.

use thiserror::Error;
use uuid::Uuid;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("cart is empty")]
    EmptyCart,

    /// The order row was created but some of its line items were not.
    ///
    /// Raised only under [`ItemFailurePolicy::Fail`]; the policy's `Ignore`
    /// variant reproduces the historical behavior of logging and moving on.
    ///
    /// [`ItemFailurePolicy::Fail`]: crate::domain::orders::service::ItemFailurePolicy
    #[error("order {order_id} created but {} line item(s) failed", .failed_products.len())]
    PartialOrder {
        order_id: Uuid,
        failed_products: Vec<Uuid>,
    },

    #[error("gateway error")]
    Gateway(#[source] GatewayError),

    #[error("malformed order row")]
    Decode(#[source] serde_json::Error),
}

impl From<GatewayError> for OrdersServiceError {
    fn from(error: GatewayError) -> Self {
        if error.is_no_rows() {
            return Self::NotFound;
        }

        Self::Gateway(error)
    }
}

impl From<serde_json::Error> for OrdersServiceError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error)
    }
}
