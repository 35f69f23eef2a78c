use async_trait::async_trait;

use crate::{NewOrder, Order, OrderId, OrderStatus, OrderWithItems, Result};

/// Core trait for order store implementations.
///
/// The orchestrator holds a store by reference and never manages
/// connections itself. All implementations must be thread-safe
/// (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists an order together with its items.
    ///
    /// The order row and all item rows appear together or not at all.
    async fn create(&self, new_order: NewOrder) -> Result<OrderWithItems>;

    /// Counts orders, optionally restricted to a status.
    async fn count(&self, status: Option<OrderStatus>) -> Result<u64>;

    /// Returns a page of orders in insertion order, without items.
    ///
    /// `skip` rows are dropped and at most `take` rows returned. A page
    /// past the end yields an empty vector, never an error.
    async fn find_many(
        &self,
        status: Option<OrderStatus>,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Order>>;

    /// Loads an order with its items.
    ///
    /// Returns None if the order doesn't exist.
    async fn find_with_items(&self, id: OrderId) -> Result<Option<OrderWithItems>>;

    /// Overwrites an order's status unconditionally.
    ///
    /// Returns the updated order, or None if the order doesn't exist.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Option<Order>>;
}
