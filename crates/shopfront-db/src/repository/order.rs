//! # Order Repository
//!
//! Persists placed orders and their lines.
//!
//! Order lines hold a name/price snapshot and a plain `product_id` (no
//! foreign key to `products`): a product sold out at checkout is deleted,
//! and its orders must survive that.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::product::apply_decrement;
use shopfront_core::{Order, OrderLine};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    name: String,
    address: String,
    city: String,
    zip: String,
    country: String,
    placed_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, lines: Vec<OrderLine>) -> Order {
        Order {
            id: self.id,
            name: self.name,
            address: self.address,
            city: self.city,
            zip: self.zip,
            country: self.country,
            placed_at: self.placed_at,
            lines,
        }
    }
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order and takes every line's quantity out of stock.
    ///
    /// ## Transaction
    /// ```text
    /// BEGIN
    ///   INSERT orders, order_lines
    ///   for each line: UPDATE products ... RETURNING quantity
    ///                  (exactly zero → DELETE the product)
    /// COMMIT
    /// ```
    /// Returns the order with its assigned id; the incoming id is ignored.
    /// A line whose product is gone fails with `DbError::NotFound`; the
    /// transaction is dropped and neither the order nor any stock change is kept.
    pub async fn place(&self, order: &Order) -> DbResult<Order> {
        debug!(lines = order.lines.len(), "Placing order");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let id = insert_rows(&mut *tx, order).await?;

        for line in &order.lines {
            apply_decrement(&mut *tx, line.product_id, line.quantity).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(id, lines = order.lines.len(), "Order placed");
        Ok(Order {
            id,
            ..order.clone()
        })
    }

    /// Gets an order and its lines.
    ///
    /// ## Returns
    /// * `Ok(None)` - No order has this id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, name, address, city, zip, country, placed_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT product_id, product_name, unit_price_cents, quantity
            FROM order_lines
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.into_order(lines)))
    }

    /// Counts placed orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn insert_rows(conn: &mut SqliteConnection, order: &Order) -> DbResult<i64> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO orders (name, address, city, zip, country, placed_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING id
        "#,
    )
    .bind(&order.name)
    .bind(&order.address)
    .bind(&order.city)
    .bind(&order.zip)
    .bind(&order.country)
    .bind(order.placed_at)
    .fetch_one(&mut *conn)
    .await?;

    for line in &order.lines {
        sqlx::query(
            r#"
            INSERT INTO order_lines (order_id, product_id, product_name, unit_price_cents, quantity)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(id)
        .bind(line.product_id)
        .bind(&line.product_name)
        .bind(line.unit_price_cents)
        .bind(line.quantity)
        .execute(&mut *conn)
        .await?;
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::SubsecRound;
    use shopfront_core::{OrderInput, Product, UNSAVED_ID};

    fn shipping() -> OrderInput {
        OrderInput {
            name: Some("Ada Lovelace".to_string()),
            address: Some("12 Analytical Row".to_string()),
            city: Some("London".to_string()),
            zip: Some("NW1".to_string()),
            country: Some("UK".to_string()),
        }
    }

    fn line(product_id: i64, quantity: i64) -> OrderLine {
        OrderLine {
            product_id,
            product_name: "Lamp".to_string(),
            unit_price_cents: 1999,
            quantity,
        }
    }

    async fn stocked(db: &Database, quantity: i64) -> i64 {
        let product = Product {
            id: UNSAVED_ID,
            name: "Lamp".to_string(),
            description: "A test description".to_string(),
            details: "Some test details".to_string(),
            price_cents: 1999,
            quantity,
        };
        db.products().insert(&product).await.unwrap().id
    }

    #[tokio::test]
    async fn test_place_and_fetch_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let lamp = stocked(&db, 10).await;
        let bulb = stocked(&db, 10).await;

        let mut bulbs = line(bulb, 5);
        bulbs.product_name = "Bulb".to_string();
        bulbs.unit_price_cents = 299;
        // Whole seconds so the text round-trip compares equal
        let order = Order::new(shipping(), vec![line(lamp, 2), bulbs], Utc::now().trunc_subsecs(0));

        let repo = db.orders();
        let saved = repo.place(&order).await.unwrap();
        assert!(saved.id > 0);

        let fetched = repo.get_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(fetched, saved);
        assert_eq!(fetched.total().cents(), 1999 * 2 + 299 * 5);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_order_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(db.orders().get_by_id(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_place_takes_lines_out_of_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let lamp = stocked(&db, 2).await;
        let bulb = stocked(&db, 9).await;

        let order = Order::new(shipping(), vec![line(lamp, 2), line(bulb, 5)], Utc::now());
        let placed = db.orders().place(&order).await.unwrap();

        assert_eq!(db.orders().count().await.unwrap(), 1);
        assert_eq!(db.orders().get_by_id(placed.id).await.unwrap().unwrap().lines.len(), 2);
        assert_eq!(db.products().get_by_id(lamp).await.unwrap(), None);
        assert_eq!(db.products().get_by_id(bulb).await.unwrap().unwrap().quantity, 4);
    }

    #[tokio::test]
    async fn test_place_with_missing_product_keeps_nothing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let lamp = stocked(&db, 5).await;

        let order = Order::new(shipping(), vec![line(lamp, 2), line(999, 1)], Utc::now());
        let err = db.orders().place(&order).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(db.orders().count().await.unwrap(), 0);
        assert_eq!(db.products().get_by_id(lamp).await.unwrap().unwrap().quantity, 5);

        let lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_lines")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(lines, 0);
    }
}
