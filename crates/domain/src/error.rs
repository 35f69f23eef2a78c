//! Domain error types.

use common::{OrderId, ProductId};
use order_store::OrderStoreError;
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// Catalog failures and catalog coverage gaps both surface as
/// [`DomainError::ProductsNotFound`]; by design the caller cannot tell
/// "product not found" apart from "catalog unreachable".
#[derive(Debug, Error)]
pub enum DomainError {
    /// One or more products could not be validated by the remote catalog,
    /// or the catalog call failed entirely.
    ///
    /// `missing` names the ids absent from the catalog's answer when the
    /// call itself succeeded; it is empty when the call failed.
    #[error("Products in order were not found")]
    ProductsNotFound { missing: Vec<ProductId> },

    /// Referenced order id does not exist.
    #[error("Order with id {id} not found")]
    OrderNotFound { id: OrderId },

    /// An error occurred in the order store.
    #[error("Order store error: {0}")]
    Store(#[from] OrderStoreError),
}

impl DomainError {
    /// ProductsNotFound with no surviving detail, for failed catalog calls.
    pub fn products_not_found() -> Self {
        DomainError::ProductsNotFound { missing: vec![] }
    }
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
