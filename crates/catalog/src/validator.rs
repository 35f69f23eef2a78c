use async_trait::async_trait;
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Read-only projection of a remote catalog product.
///
/// Fetched fresh per validation call and attached transiently to
/// responses; never persisted or cached here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
}

/// Trait for validating product identifiers against the catalog.
#[async_trait]
pub trait ProductValidator: Send + Sync {
    /// Validates a batch of product identifiers in a single remote call.
    ///
    /// Duplicates are sent as given. The returned set is not guaranteed to
    /// cover every requested id; callers that need per-item data must
    /// verify coverage themselves.
    async fn validate(&self, product_ids: &[ProductId]) -> Result<Vec<Product>>;
}
