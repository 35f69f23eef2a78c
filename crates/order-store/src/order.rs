//! Persisted order entities.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status of an order.
///
/// Closed set, transmitted verbatim in SCREAMING_SNAKE case. There is no
/// transition graph: any status may be overwritten with any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order has been created and awaits payment.
    #[default]
    Pending,

    /// Payment has been received.
    Paid,

    /// Order has been delivered to the customer.
    Delivered,

    /// Order was cancelled.
    Cancelled,
}

/// Error returned when parsing an unknown status token.
#[derive(Debug, Clone, Error)]
#[error("Invalid order status '{0}'. Possible values are PENDING, PAID, DELIVERED, CANCELLED")]
pub struct InvalidOrderStatus(pub String);

impl OrderStatus {
    /// All accepted wire tokens.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Returns the wire token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = InvalidOrderStatus;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidOrderStatus(s.to_string()))
    }
}

/// A persisted order.
///
/// Totals are computed once at creation and never recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub total_amount: Money,
    pub total_items: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item owned by its order.
///
/// Items carry no identity of their own; the unit price is captured at
/// order time and never re-fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderItem {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32, unit_price: Money) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
        }
    }
}

/// Input for creating an order together with its items.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub total_amount: Money,
    pub total_items: i64,
    pub items: Vec<OrderItem>,
}

/// An order loaded together with its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}
