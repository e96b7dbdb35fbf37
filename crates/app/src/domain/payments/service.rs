//! Payments service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{
        decode_rows,
        orders::models::{Order, OrderStatus},
        payments::{
            errors::PaymentsServiceError,
            models::{NewPaymentRow, Payment, PaymentStatus, PaymentWithOrder},
        },
    },
    gateway::{Direction, Filter, Gateway, Query},
};

/// Storage bucket holding uploaded payment proofs.
pub const PAYMENT_PROOFS_BUCKET: &str = "payment-proofs";

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// The payments submitted against an order, newest first.
    async fn list_payments_for_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<Payment>, PaymentsServiceError>;

    /// Payments awaiting review, each with its order and customer embedded.
    async fn list_pending_payments(
        &self,
    ) -> Result<Vec<PaymentWithOrder>, PaymentsServiceError>;

    /// Uploads a proof image, records a pending payment for the order's
    /// total, and moves the order to `payment_submitted`.
    async fn submit_proof(
        &self,
        order: &Order,
        payment_method: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Payment, PaymentsServiceError>;

    /// Marks a payment confirmed by `admin_id` and moves its order to
    /// `payment_confirmed`.
    async fn confirm_payment(
        &self,
        payment_id: Uuid,
        order_id: Uuid,
        admin_id: Uuid,
    ) -> Result<(), PaymentsServiceError>;

    /// Marks a payment rejected; the order keeps its current status.
    async fn reject_payment(&self, payment_id: Uuid) -> Result<(), PaymentsServiceError>;
}

/// Gateway-backed [`PaymentsService`].
pub struct RestPaymentsService {
    gateway: Arc<dyn Gateway>,
}

impl std::fmt::Debug for RestPaymentsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestPaymentsService").finish_non_exhaustive()
    }
}

impl RestPaymentsService {
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl PaymentsService for RestPaymentsService {
    async fn list_payments_for_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<Payment>, PaymentsServiceError> {
        let rows = self
            .gateway
            .select(
                "payments",
                Query::new()
                    .filter(Filter::eq("order_id", order_id))
                    .order("created_at", Direction::Desc),
            )
            .await?;

        Ok(decode_rows(rows)?)
    }

    async fn list_pending_payments(
        &self,
    ) -> Result<Vec<PaymentWithOrder>, PaymentsServiceError> {
        let rows = self
            .gateway
            .select(
                "payments",
                Query::new()
                    .select("*, orders(*, users(full_name, email))")
                    .filter(Filter::eq("status", PaymentStatus::Pending.as_str()))
                    .order("created_at", Direction::Desc),
            )
            .await?;

        Ok(decode_rows(rows)?)
    }

    #[tracing::instrument(
        name = "payments.service.submit_proof",
        skip(self, order, bytes),
        fields(order_uuid = %order.id),
        err
    )]
    async fn submit_proof(
        &self,
        order: &Order,
        payment_method: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Payment, PaymentsServiceError> {
        let proof_url = self
            .gateway
            .upload(PAYMENT_PROOFS_BUCKET, file_name, content_type, bytes)
            .await
            .map_err(PaymentsServiceError::Upload)?;

        let row = NewPaymentRow {
            order_id: order.id,
            amount: order.total_amount,
            payment_method: payment_method.to_owned(),
            proof_url,
            status: PaymentStatus::Pending,
        };

        let created = self
            .gateway
            .insert("payments", serde_json::to_value(&row)?)
            .await?;

        let payment: Payment = serde_json::from_value(created)?;

        self.gateway
            .update(
                "orders",
                json!({ "status": OrderStatus::PaymentSubmitted }),
                vec![Filter::eq("id", order.id)],
            )
            .await?;

        info!(payment_uuid = %payment.id, "submitted payment proof");

        Ok(payment)
    }

    async fn confirm_payment(
        &self,
        payment_id: Uuid,
        order_id: Uuid,
        admin_id: Uuid,
    ) -> Result<(), PaymentsServiceError> {
        self.gateway
            .update(
                "payments",
                json!({
                    "status": PaymentStatus::Confirmed,
                    "confirmed_by": admin_id,
                    "confirmed_at": Timestamp::now(),
                }),
                vec![Filter::eq("id", payment_id)],
            )
            .await?;

        self.gateway
            .update(
                "orders",
                json!({ "status": OrderStatus::PaymentConfirmed }),
                vec![Filter::eq("id", order_id)],
            )
            .await?;

        info!(payment_uuid = %payment_id, order_uuid = %order_id, "confirmed payment");

        Ok(())
    }

    async fn reject_payment(&self, payment_id: Uuid) -> Result<(), PaymentsServiceError> {
        self.gateway
            .update(
                "payments",
                json!({ "status": PaymentStatus::Rejected }),
                vec![Filter::eq("id", payment_id)],
            )
            .await?;

        Ok(())
    }
}
