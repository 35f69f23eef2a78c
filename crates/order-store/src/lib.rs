pub mod error;
pub mod memory;
pub mod order;
pub mod postgres;
pub mod store;

pub use common::{Money, OrderId, ProductId};
pub use error::{OrderStoreError, Result};
pub use memory::InMemoryOrderStore;
pub use order::{NewOrder, Order, OrderItem, OrderStatus, OrderWithItems};
pub use postgres::PostgresOrderStore;
pub use store::OrderStore;
