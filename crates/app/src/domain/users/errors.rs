//! Users service errors.

use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user not found")]
    NotFound,

    #[error("gateway error")]
    Gateway(#[source] GatewayError),

    #[error("malformed user row")]
    Decode(#[source] serde_json::Error),
}

impl From<GatewayError> for UsersServiceError {
    fn from(error: GatewayError) -> Self {
        if error.is_no_rows() {
            return Self::NotFound;
        }

        Self::Gateway(error)
    }
}

impl From<serde_json::Error> for UsersServiceError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error)
    }
}
