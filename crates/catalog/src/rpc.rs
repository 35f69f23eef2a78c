//! Validator backed by a request/response messaging transport.

use async_trait::async_trait;
use common::{Money, ProductId};
use serde::Deserialize;
use thiserror::Error;

use crate::{CatalogError, Product, ProductValidator, Result};

/// Message pattern the Product service answers validation requests on.
pub const VALIDATE_PRODUCTS: &str = "validate_products";

/// Error surfaced by a [`RequestTransport`].
///
/// Delivery, connection management, and the request timeout are owned by
/// the transport; whatever goes wrong arrives here as one opaque kind.
#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// Narrow seam over the message broker.
///
/// Issues one request on a subject and awaits the response. The transport
/// must bound the wait with its own timeout so a call never hangs.
#[async_trait]
pub trait RequestTransport: Send + Sync {
    async fn request(
        &self,
        subject: &str,
        payload: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, TransportError>;
}

/// Product record as the remote catalog serializes it.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    price: f64,
}

/// Product validator that calls the remote Product service over an
/// injected transport.
#[derive(Clone)]
pub struct RpcProductValidator<T> {
    transport: T,
}

impl<T: RequestTransport> RpcProductValidator<T> {
    /// Creates a validator over the given transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: RequestTransport> ProductValidator for RpcProductValidator<T> {
    async fn validate(&self, product_ids: &[ProductId]) -> Result<Vec<Product>> {
        let payload = serde_json::to_value(product_ids)
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        let response = self
            .transport
            .request(VALIDATE_PRODUCTS, payload)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "product validation call failed");
                CatalogError::Unavailable(e.to_string())
            })?;

        let records: Vec<ProductRecord> = serde_json::from_value(response).map_err(|e| {
            tracing::warn!(error = %e, "product validation response malformed");
            CatalogError::Unavailable(e.to_string())
        })?;

        Ok(records
            .into_iter()
            .map(|r| Product {
                id: r.id,
                name: r.name,
                price: Money::from_decimal(r.price),
            })
            .collect())
    }
}
