use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    NewOrder, Order, OrderId, OrderStatus, OrderWithItems, Result,
    store::OrderStore,
};

/// In-memory order store implementation for testing.
///
/// Stores orders in insertion order and provides the same interface as the
/// PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<OrderWithItems>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Clears all orders.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, new_order: NewOrder) -> Result<OrderWithItems> {
        let now = Utc::now();
        let persisted = OrderWithItems {
            order: Order {
                id: OrderId::new(),
                total_amount: new_order.total_amount,
                total_items: new_order.total_items,
                status: OrderStatus::default(),
                created_at: now,
                updated_at: now,
            },
            items: new_order.items,
        };

        self.orders.write().await.push(persisted.clone());
        Ok(persisted)
    }

    async fn count(&self, status: Option<OrderStatus>) -> Result<u64> {
        let orders = self.orders.read().await;
        let count = orders
            .iter()
            .filter(|o| status.is_none_or(|s| o.order.status == s))
            .count();
        Ok(count as u64)
    }

    async fn find_many(
        &self,
        status: Option<OrderStatus>,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| status.is_none_or(|s| o.order.status == s))
            .skip(skip as usize)
            .take(take as usize)
            .map(|o| o.order.clone())
            .collect())
    }

    async fn find_with_items(&self, id: OrderId) -> Result<Option<OrderWithItems>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.order.id == id).cloned())
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Option<Order>> {
        let mut orders = self.orders.write().await;
        let Some(stored) = orders.iter_mut().find(|o| o.order.id == id) else {
            return Ok(None);
        };

        stored.order.status = status;
        stored.order.updated_at = Utc::now();
        Ok(Some(stored.order.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Money, ProductId};
    use crate::OrderItem;

    fn new_order(amount_cents: i64, quantities: &[u32]) -> NewOrder {
        let items = quantities
            .iter()
            .enumerate()
            .map(|(i, &q)| OrderItem {
                product_id: ProductId::new(format!("P{i}")),
                quantity: q,
                unit_price: Money::from_cents(amount_cents),
            })
            .collect::<Vec<_>>();
        let total_items = quantities.iter().map(|&q| q as i64).sum();
        NewOrder {
            total_amount: Money::from_cents(amount_cents * total_items),
            total_items,
            items,
        }
    }

    #[tokio::test]
    async fn create_assigns_unique_ids_and_pending_status() {
        let store = InMemoryOrderStore::new();

        let first = store.create(new_order(1000, &[1])).await.unwrap();
        let second = store.create(new_order(1000, &[1])).await.unwrap();

        assert_ne!(first.order.id, second.order.id);
        assert_eq!(first.order.status, OrderStatus::Pending);
        assert_eq!(store.order_count().await, 2);
    }

    #[tokio::test]
    async fn find_many_pages_in_insertion_order() {
        let store = InMemoryOrderStore::new();
        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(store.create(new_order(100, &[1])).await.unwrap().order.id);
        }

        let page = store.find_many(None, 2, 2).await.unwrap();
        assert_eq!(
            page.iter().map(|o| o.id).collect::<Vec<_>>(),
            &ids[2..4]
        );
    }

    #[tokio::test]
    async fn find_many_past_the_end_is_empty() {
        let store = InMemoryOrderStore::new();
        store.create(new_order(100, &[1])).await.unwrap();

        let page = store.find_many(None, 10, 10).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn count_honors_status_filter() {
        let store = InMemoryOrderStore::new();
        let order = store.create(new_order(100, &[1])).await.unwrap();
        store.create(new_order(100, &[1])).await.unwrap();

        store
            .update_status(order.order.id, OrderStatus::Paid)
            .await
            .unwrap();

        assert_eq!(store.count(None).await.unwrap(), 2);
        assert_eq!(store.count(Some(OrderStatus::Paid)).await.unwrap(), 1);
        assert_eq!(store.count(Some(OrderStatus::Delivered)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn find_with_items_returns_items() {
        let store = InMemoryOrderStore::new();
        let created = store.create(new_order(250, &[2, 3])).await.unwrap();

        let found = store
            .find_with_items(created.order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.items.len(), 2);
        assert_eq!(found.order.total_items, 5);
    }

    #[tokio::test]
    async fn find_with_items_missing_returns_none() {
        let store = InMemoryOrderStore::new();
        assert!(
            store
                .find_with_items(OrderId::new())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn update_status_overwrites_unconditionally() {
        let store = InMemoryOrderStore::new();
        let created = store.create(new_order(100, &[1])).await.unwrap();
        let id = created.order.id;

        let updated = store
            .update_status(id, OrderStatus::Delivered)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Delivered);

        // Backward transition is accepted; there is no transition graph.
        let reverted = store
            .update_status(id, OrderStatus::Pending)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reverted.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn update_status_missing_returns_none() {
        let store = InMemoryOrderStore::new();
        let result = store
            .update_status(OrderId::new(), OrderStatus::Paid)
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
