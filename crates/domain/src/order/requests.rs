//! Inbound request shapes for the order operations.
//!
//! Field names match the wire format; schema enforcement beyond shape and
//! enum membership belongs to the transport layer.

use common::{OrderId, ProductId};
use order_store::OrderStatus;
use serde::Deserialize;

/// Request to create an order from a cart of line items.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub items: Vec<NewOrderItem>,
}

/// A line item as submitted by the caller.
///
/// The price is the decimal unit price captured at order time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: f64,
}

/// Request for a page of orders, optionally filtered by status.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersPage {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

impl Default for OrdersPage {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            status: None,
        }
    }
}

/// Request to overwrite an order's status.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeOrderStatus {
    pub id: OrderId,
    pub status: OrderStatus,
}
