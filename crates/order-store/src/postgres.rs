use async_trait::async_trait;
use common::Money;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    NewOrder, Order, OrderId, OrderItem, OrderStatus, OrderStoreError, OrderWithItems, Result,
    store::OrderStore,
};

/// PostgreSQL-backed order store implementation.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_order(row: &PgRow) -> Result<Order> {
        let status_text: String = row.try_get("status")?;
        let status: OrderStatus = status_text
            .parse()
            .map_err(|_| OrderStoreError::InvalidStatus(status_text))?;

        Ok(Order {
            id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
            total_amount: Money::from_cents(row.try_get("total_amount")?),
            total_items: row.try_get("total_items")?,
            status,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn row_to_item(row: &PgRow) -> Result<OrderItem> {
        Ok(OrderItem {
            product_id: row.try_get::<String, _>("product_id")?.into(),
            quantity: row.try_get::<i32, _>("quantity")? as u32,
            unit_price: Money::from_cents(row.try_get("unit_price")?),
        })
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn create(&self, new_order: NewOrder) -> Result<OrderWithItems> {
        let order_id = OrderId::new();

        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query(
            r#"
            INSERT INTO orders (id, total_amount, total_items, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, total_amount, total_items, status, created_at, updated_at
            "#,
        )
        .bind(order_id.as_uuid())
        .bind(new_order.total_amount.cents())
        .bind(new_order.total_items)
        .bind(OrderStatus::default().as_str())
        .fetch_one(&mut *tx)
        .await?;

        for item in &new_order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(order_id.as_uuid())
            .bind(item.product_id.as_str())
            .bind(item.quantity as i32)
            .bind(item.unit_price.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(OrderWithItems {
            order: Self::row_to_order(&order_row)?,
            items: new_order.items,
        })
    }

    async fn count(&self, status: Option<OrderStatus>) -> Result<u64> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = $1")
                    .bind(status.as_str())
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM orders")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count as u64)
    }

    async fn find_many(
        &self,
        status: Option<OrderStatus>,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Order>> {
        let rows = match status {
            Some(status) => {
                sqlx::query(
                    r#"
                    SELECT id, total_amount, total_items, status, created_at, updated_at
                    FROM orders
                    WHERE status = $1
                    ORDER BY created_at, id
                    OFFSET $2 LIMIT $3
                    "#,
                )
                .bind(status.as_str())
                .bind(skip as i64)
                .bind(take as i64)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, total_amount, total_items, status, created_at, updated_at
                    FROM orders
                    ORDER BY created_at, id
                    OFFSET $1 LIMIT $2
                    "#,
                )
                .bind(skip as i64)
                .bind(take as i64)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(Self::row_to_order).collect()
    }

    async fn find_with_items(&self, id: OrderId) -> Result<Option<OrderWithItems>> {
        let order_row = sqlx::query(
            r#"
            SELECT id, total_amount, total_items, status, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(order_row) = order_row else {
            return Ok(None);
        };

        let item_rows = sqlx::query(
            r#"
            SELECT product_id, quantity, unit_price
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(OrderWithItems {
            order: Self::row_to_order(&order_row)?,
            items: item_rows
                .iter()
                .map(Self::row_to_item)
                .collect::<Result<_>>()?,
        }))
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Option<Order>> {
        let row = sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, total_amount, total_items, status, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_order).transpose()
    }
}
