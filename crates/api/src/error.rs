//! RPC error envelope with HTTP-equivalent status codes.

use domain::DomainError;
use serde::Serialize;

/// Structured error returned to RPC callers.
///
/// Carries the HTTP-equivalent status and a human-readable message; no
/// store or transport detail crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcError {
    pub status: u16,
    pub message: String,
}

impl RpcError {
    /// A 400-equivalent rejection raised before any store access.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            message: message.into(),
        }
    }
}

impl From<DomainError> for RpcError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::ProductsNotFound { .. } => 400,
            DomainError::OrderNotFound { .. } => 404,
            DomainError::Store(store_err) => {
                tracing::error!(error = %store_err, "order store failure");
                500
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}
