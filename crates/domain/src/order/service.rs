//! Order service orchestrating the validator, the totals, and the store.

use std::collections::HashMap;
use std::time::Instant;

use catalog::{Product, ProductValidator};
use common::{Money, OrderId, ProductId};
use order_store::{NewOrder, OrderItem, OrderStore, OrderWithItems};

use crate::error::{DomainError, Result};

use super::{
    ChangeOrderStatus, CreateOrder, EnrichedItem, EnrichedOrder, OrderSummary, OrdersPage,
    PageMeta, Paginated, aggregate_totals,
};

/// Service for managing orders.
///
/// Composes the order store and the product validator; holds no state of
/// its own and no connection lifecycle.
pub struct OrderService<S, V> {
    store: S,
    validator: V,
}

impl<S: OrderStore, V: ProductValidator> OrderService<S, V> {
    /// Creates a new order service over the given store and validator.
    pub fn new(store: S, validator: V) -> Self {
        Self { store, validator }
    }

    /// Creates an order from a cart of line items.
    ///
    /// Line items are validated against the remote catalog before anything
    /// is persisted; the order and its items are then stored atomically and
    /// the response items carry the catalog's display names.
    #[tracing::instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn create(&self, request: CreateOrder) -> Result<EnrichedOrder> {
        let start = Instant::now();

        let product_ids = distinct_product_ids(&request.items);
        let products = self.validate(&product_ids).await?;

        let items: Vec<OrderItem> = request
            .items
            .iter()
            .map(|item| {
                OrderItem::new(
                    item.product_id.clone(),
                    item.quantity,
                    Money::from_decimal(item.price),
                )
            })
            .collect();
        let totals = aggregate_totals(&items);

        let persisted = self
            .store
            .create(NewOrder {
                total_amount: totals.total_amount,
                total_items: totals.total_items,
                items,
            })
            .await?;

        let order_id = persisted.order.id;
        let enriched = enrich(persisted, &products)?;

        metrics::counter!("orders_created_total").increment(1);
        metrics::histogram!("order_create_duration_seconds")
            .record(start.elapsed().as_secs_f64());
        tracing::info!(%order_id, "order created");

        Ok(enriched)
    }

    /// Returns a page of orders, optionally filtered by status.
    ///
    /// A page past the end yields empty data; the total is consistent only
    /// as of the count query.
    #[tracing::instrument(skip(self))]
    pub async fn find_all(&self, request: OrdersPage) -> Result<Paginated<OrderSummary>> {
        let total = self.store.count(request.status).await?;

        let skip = request.page.saturating_sub(1) * request.limit;
        let orders = self
            .store
            .find_many(request.status, skip, request.limit)
            .await?;

        Ok(Paginated {
            data: orders.into_iter().map(OrderSummary::from).collect(),
            meta: PageMeta::new(total, request.page, request.limit),
        })
    }

    /// Loads an order by id with its items, names resolved from the catalog.
    #[tracing::instrument(skip(self))]
    pub async fn find_one(&self, id: OrderId) -> Result<EnrichedOrder> {
        let persisted = self
            .store
            .find_with_items(id)
            .await?
            .ok_or(DomainError::OrderNotFound { id })?;

        let product_ids = distinct_ids_of(&persisted.items);
        let products = self.validate(&product_ids).await?;

        enrich(persisted, &products)
    }

    /// Overwrites an order's status.
    ///
    /// There is no transition graph: any listed status may be set from any
    /// other, including backward moves.
    #[tracing::instrument(skip(self))]
    pub async fn change_status(&self, request: ChangeOrderStatus) -> Result<OrderSummary> {
        let updated = self
            .store
            .update_status(request.id, request.status)
            .await?
            .ok_or(DomainError::OrderNotFound { id: request.id })?;

        metrics::counter!("orders_status_changed_total").increment(1);
        tracing::info!(order_id = %request.id, status = %request.status, "order status changed");

        Ok(OrderSummary::from(updated))
    }

    async fn validate(&self, product_ids: &[ProductId]) -> Result<Vec<Product>> {
        self.validator.validate(product_ids).await.map_err(|e| {
            metrics::counter!("product_validation_failures_total").increment(1);
            tracing::warn!(error = %e, "product validation failed");
            DomainError::products_not_found()
        })
    }
}

fn distinct_product_ids(items: &[super::NewOrderItem]) -> Vec<ProductId> {
    let mut ids = Vec::new();
    for item in items {
        if !ids.contains(&item.product_id) {
            ids.push(item.product_id.clone());
        }
    }
    ids
}

fn distinct_ids_of(items: &[OrderItem]) -> Vec<ProductId> {
    let mut ids = Vec::new();
    for item in items {
        if !ids.contains(&item.product_id) {
            ids.push(item.product_id.clone());
        }
    }
    ids
}

/// Attaches catalog display names to the persisted items.
///
/// A persisted productId missing from the validator's result set (e.g. the
/// product was deleted between validation and persistence) fails with
/// ProductsNotFound naming the gap instead of panicking.
fn enrich(persisted: OrderWithItems, products: &[Product]) -> Result<EnrichedOrder> {
    let names: HashMap<&ProductId, &str> = products
        .iter()
        .map(|p| (&p.id, p.name.as_str()))
        .collect();

    let missing: Vec<ProductId> = persisted
        .items
        .iter()
        .filter(|item| !names.contains_key(&item.product_id))
        .map(|item| item.product_id.clone())
        .collect();
    if !missing.is_empty() {
        tracing::warn!(?missing, "validated products do not cover persisted items");
        return Err(DomainError::ProductsNotFound { missing });
    }

    let items = persisted
        .items
        .into_iter()
        .map(|item| {
            let name = names[&item.product_id].to_string();
            EnrichedItem {
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.unit_price.as_decimal(),
                name,
            }
        })
        .collect();

    let order = persisted.order;
    Ok(EnrichedOrder {
        id: order.id,
        total_amount: order.total_amount.as_decimal(),
        total_items: order.total_items,
        status: order.status,
        created_at: order.created_at,
        updated_at: order.updated_at,
        items,
    })
}
