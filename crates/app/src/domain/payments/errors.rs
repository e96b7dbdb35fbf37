//! Payments service errors.

use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    #[error("payment not found")]
    NotFound,

    #[error("payment proof upload failed")]
    Upload(#[source] GatewayError),

    #[error("gateway error")]
    Gateway(#[source] GatewayError),

    #[error("malformed payment row")]
    Decode(#[source] serde_json::Error),
}

impl From<GatewayError> for PaymentsServiceError {
    fn from(error: GatewayError) -> Self {
        if error.is_no_rows() {
            return Self::NotFound;
        }

        Self::Gateway(error)
    }
}

impl From<serde_json::Error> for PaymentsServiceError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error)
    }
}
