use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::ProductId;

use crate::{CatalogError, Product, ProductValidator, Result};

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: HashMap<ProductId, Product>,
    unavailable: bool,
}

/// In-memory product catalog for testing.
///
/// Behaves like the remote Product service: a request naming any unknown
/// id fails as a whole, and an induced outage fails every call.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalog {
    /// Creates a new empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-loaded with products.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = Self::new();
        for product in products {
            catalog.insert(product);
        }
        catalog
    }

    /// Adds or replaces a product.
    pub fn insert(&self, product: Product) {
        self.state
            .write()
            .unwrap()
            .products
            .insert(product.id.clone(), product);
    }

    /// Removes a product, simulating deletion between calls.
    pub fn remove(&self, id: &ProductId) {
        self.state.write().unwrap().products.remove(id);
    }

    /// Configures the catalog to fail every validation call.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.write().unwrap().unavailable = unavailable;
    }
}

#[async_trait]
impl ProductValidator for InMemoryCatalog {
    async fn validate(&self, product_ids: &[ProductId]) -> Result<Vec<Product>> {
        let state = self.state.read().unwrap();

        if state.unavailable {
            return Err(CatalogError::Unavailable("catalog offline".to_string()));
        }

        let mut seen = Vec::new();
        let mut resolved = Vec::new();
        for id in product_ids {
            if seen.contains(id) {
                continue;
            }
            seen.push(id.clone());
            match state.products.get(id) {
                Some(product) => resolved.push(product.clone()),
                None => {
                    return Err(CatalogError::Unavailable(format!(
                        "product {id} not found"
                    )));
                }
            }
        }

        Ok(resolved)
    }
}
