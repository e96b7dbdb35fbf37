//! Gateway errors.

use serde::Deserialize;
use thiserror::Error;

/// Backend error code reported when a single-object read matched no rows.
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Errors surfaced by the remote data gateway.
///
/// All gateway failures are returned as values; callers decide what, if
/// anything, to show the user.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a usable response.
    #[error("transport error")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status; message and code are
    /// passed through from the response body when present.
    #[error("backend error {code}: {message}")]
    Backend {
        /// Backend-reported error code, or the HTTP status when absent.
        code: String,
        /// Backend-reported message, or a generic fallback.
        message: String,
    },
}

impl GatewayError {
    /// Whether this is the backend's "no rows matched" single-object error.
    #[must_use]
    pub fn is_no_rows(&self) -> bool {
        matches!(self, Self::Backend { code, .. } if code == NO_ROWS_CODE)
    }
}

/// Error body shape returned by the backend.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) message: Option<String>,
    pub(crate) code: Option<String>,
    /// Storage endpoints report the message under `error` instead.
    pub(crate) error: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_gateway_error(self, status: reqwest::StatusCode, fallback: &str) -> GatewayError {
        GatewayError::Backend {
            code: self.code.unwrap_or_else(|| status.as_u16().to_string()),
            message: self
                .message
                .or(self.error)
                .unwrap_or_else(|| fallback.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_body_passes_through_message_and_code() {
        let body = ErrorBody {
            message: Some("permission denied".to_owned()),
            code: Some("42501".to_owned()),
            error: None,
        };

        let error = body.into_gateway_error(reqwest::StatusCode::FORBIDDEN, "Request failed");

        assert!(
            matches!(error, GatewayError::Backend { code, message }
                if code == "42501" && message == "permission denied"),
            "expected passthrough of backend code and message"
        );
    }

    #[test]
    fn missing_fields_fall_back_to_status_and_generic_message() {
        let body = ErrorBody {
            message: None,
            code: None,
            error: None,
        };

        let error = body.into_gateway_error(reqwest::StatusCode::BAD_GATEWAY, "Insert failed");

        assert!(
            matches!(error, GatewayError::Backend { code, message }
                if code == "502" && message == "Insert failed"),
            "expected status-code and fallback message"
        );
    }

    #[test]
    fn no_rows_code_is_recognized() {
        let error = GatewayError::Backend {
            code: NO_ROWS_CODE.to_owned(),
            message: "JSON object requested, multiple (or no) rows returned".to_owned(),
        };

        assert!(error.is_no_rows());
    }
}
