//! Response shapes returned to callers.
//!
//! Money renders as decimal numbers on the wire; product names are
//! attached transiently and never persisted.

use chrono::{DateTime, Utc};
use common::{OrderId, ProductId};
use order_store::{Order, OrderStatus};
use serde::Serialize;

/// An order without its items, as returned by listing and status changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    pub total_amount: f64,
    pub total_items: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            total_amount: order.total_amount.as_decimal(),
            total_items: order.total_items,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// An order with its items, each augmented with the resolved product name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedOrder {
    pub id: OrderId,
    pub total_amount: f64,
    pub total_items: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<EnrichedItem>,
}

/// A persisted line item with its display name resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: f64,
    pub name: String,
}

/// A page of results with its pagination envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub last_page: u64,
}

impl PageMeta {
    /// Computes the envelope for a page request.
    ///
    /// `last_page` is the ceiling of total/limit, and 0 when there are no
    /// matching rows.
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        Self {
            total,
            page,
            last_page: total.div_ceil(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_is_ceiling_of_total_over_limit() {
        assert_eq!(PageMeta::new(25, 3, 10).last_page, 3);
        assert_eq!(PageMeta::new(30, 1, 10).last_page, 3);
        assert_eq!(PageMeta::new(31, 1, 10).last_page, 4);
    }

    #[test]
    fn empty_result_has_last_page_zero() {
        assert_eq!(PageMeta::new(0, 1, 10).last_page, 0);
    }

    #[test]
    fn meta_serializes_in_camel_case() {
        let json = serde_json::to_value(PageMeta::new(25, 2, 10)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"total": 25, "page": 2, "lastPage": 3})
        );
    }
}
