//! # Store Traits
//!
//! Persistence seams used by the services, with two implementations:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Store Implementations                          │
//! │                                                                         │
//! │   CatalogService / CheckoutService                                      │
//! │            │                                                            │
//! │            ▼                                                            │
//! │   ProductStore + OrderStore (async traits)                              │
//! │            │                                                            │
//! │     ┌──────┴───────────────┐                                            │
//! │     ▼                      ▼                                            │
//! │   Database (SQLite)      MemoryStore (RwLock<BTreeMap>)                 │
//! │                                                                         │
//! │   Both apply the same stock policy:                                     │
//! │     stock - qty == 0  → product removed                                 │
//! │     stock - qty  < 0  → kept, negative                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use shopfront_core::{Order, Product, UNSAVED_ID};
use shopfront_db::{Database, DbError, DbResult, StockUpdate};

/// Product persistence.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product, or `None` when the store has no listing to give.
    async fn get_all_products(&self) -> DbResult<Option<Vec<Product>>>;

    async fn get_product(&self, id: i64) -> DbResult<Option<Product>>;

    /// Inserts (id `0`) or updates, returning the stored product.
    async fn save_product(&self, product: Product) -> DbResult<Product>;

    /// Fails with `DbError::NotFound` when no product has this id.
    async fn delete_product(&self, id: i64) -> DbResult<()>;

    /// Removes `quantity` from stock; a product landing on zero is deleted.
    async fn update_product_stocks(&self, id: i64, quantity: i64) -> DbResult<StockUpdate>;
}

/// Order persistence.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Saves the order and takes each line's quantity out of stock under the
    /// stock policy, all or nothing.
    ///
    /// A line whose product is gone fails with `DbError::NotFound`; no order
    /// is saved and no stock changes. Returns the order with its assigned id.
    async fn place_order(&self, order: Order) -> DbResult<Order>;

    async fn get_order(&self, id: i64) -> DbResult<Option<Order>>;
}

// =============================================================================
// SQLite
// =============================================================================

#[async_trait]
impl ProductStore for Database {
    async fn get_all_products(&self) -> DbResult<Option<Vec<Product>>> {
        self.products().list_all().await.map(Some)
    }

    async fn get_product(&self, id: i64) -> DbResult<Option<Product>> {
        self.products().get_by_id(id).await
    }

    async fn save_product(&self, product: Product) -> DbResult<Product> {
        self.products().save(&product).await
    }

    async fn delete_product(&self, id: i64) -> DbResult<()> {
        self.products().delete(id).await
    }

    async fn update_product_stocks(&self, id: i64, quantity: i64) -> DbResult<StockUpdate> {
        self.products().decrement_stock(id, quantity).await
    }
}

#[async_trait]
impl OrderStore for Database {
    async fn place_order(&self, order: Order) -> DbResult<Order> {
        self.orders().place(&order).await
    }

    async fn get_order(&self, id: i64) -> DbResult<Option<Order>> {
        self.orders().get_by_id(id).await
    }
}

// =============================================================================
// In-Memory
// =============================================================================

#[derive(Debug, Default)]
struct Tables {
    products: BTreeMap<i64, Product>,
    orders: BTreeMap<i64, Order>,
    last_product_id: i64,
    last_order_id: i64,
}

/// Store held entirely in memory.
///
/// Ids are assigned from 1 upward and never reused, like SQLite's
/// `AUTOINCREMENT`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store pre-filled with products, assigning ids in order.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut tables = Tables::default();
        for product in products {
            tables.last_product_id += 1;
            let id = tables.last_product_id;
            tables.products.insert(id, Product { id, ..product });
        }

        MemoryStore {
            tables: RwLock::new(tables),
        }
    }

    /// Number of products currently stored.
    pub async fn product_count(&self) -> usize {
        self.tables.read().await.products.len()
    }

    /// Number of orders saved.
    pub async fn order_count(&self) -> usize {
        self.tables.read().await.orders.len()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn get_all_products(&self) -> DbResult<Option<Vec<Product>>> {
        let tables = self.tables.read().await;
        Ok(Some(tables.products.values().cloned().collect()))
    }

    async fn get_product(&self, id: i64) -> DbResult<Option<Product>> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn save_product(&self, product: Product) -> DbResult<Product> {
        let mut tables = self.tables.write().await;

        if product.id == UNSAVED_ID {
            tables.last_product_id += 1;
            let stored = Product {
                id: tables.last_product_id,
                ..product
            };
            tables.products.insert(stored.id, stored.clone());
            return Ok(stored);
        }

        match tables.products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(product)
            }
            None => Err(DbError::not_found("Product", product.id)),
        }
    }

    async fn delete_product(&self, id: i64) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    async fn update_product_stocks(&self, id: i64, quantity: i64) -> DbResult<StockUpdate> {
        let mut tables = self.tables.write().await;
        decrement(&mut tables.products, id, quantity)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn place_order(&self, order: Order) -> DbResult<Order> {
        let mut tables = self.tables.write().await;

        // Work on a copy so a missing product leaves the stock untouched
        let mut products = tables.products.clone();
        for line in &order.lines {
            decrement(&mut products, line.product_id, line.quantity)?;
        }
        tables.products = products;

        tables.last_order_id += 1;
        let stored = Order {
            id: tables.last_order_id,
            ..order
        };
        tables.orders.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_order(&self, id: i64) -> DbResult<Option<Order>> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }
}

/// The stock policy over the in-memory product table.
fn decrement(
    products: &mut BTreeMap<i64, Product>,
    id: i64,
    quantity: i64,
) -> DbResult<StockUpdate> {
    let product = products
        .get_mut(&id)
        .ok_or_else(|| DbError::not_found("Product", id))?;
    product.quantity = product.quantity.saturating_sub(quantity);
    let remaining = product.quantity;

    if remaining == 0 {
        products.remove(&id);
        debug!(id, "Stock exhausted, product removed");
        return Ok(StockUpdate::Removed);
    }

    Ok(StockUpdate::Remaining(remaining))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shopfront_core::{OrderInput, OrderLine};
    use shopfront_db::DbConfig;

    fn product(name: &str, quantity: i64) -> Product {
        Product {
            id: UNSAVED_ID,
            name: name.to_string(),
            description: "A fine description".to_string(),
            details: "Some fine details".to_string(),
            price_cents: 1000,
            quantity,
        }
    }

    fn order_for(lines: &[(i64, i64)]) -> Order {
        let lines = lines
            .iter()
            .map(|&(product_id, quantity)| OrderLine {
                product_id,
                product_name: "Lamp".to_string(),
                unit_price_cents: 1000,
                quantity,
            })
            .collect();
        let input = OrderInput {
            name: Some("Ada".to_string()),
            address: Some("12 Analytical Row".to_string()),
            city: Some("London".to_string()),
            zip: Some("NW1".to_string()),
            country: Some("UK".to_string()),
        };
        Order::new(input, lines, Utc::now())
    }

    /// Runs the shared stock policy checks against any store.
    async fn assert_stock_policy<S: ProductStore>(store: &S) {
        let exact = store.save_product(product("Exact", 2)).await.unwrap();
        let short = store.save_product(product("Short", 1)).await.unwrap();

        assert_eq!(
            store.update_product_stocks(exact.id, 2).await.unwrap(),
            StockUpdate::Removed
        );
        assert_eq!(store.get_product(exact.id).await.unwrap(), None);

        assert_eq!(
            store.update_product_stocks(short.id, 2).await.unwrap(),
            StockUpdate::Remaining(-1)
        );
        assert_eq!(store.get_product(short.id).await.unwrap().unwrap().quantity, -1);

        assert!(store
            .update_product_stocks(exact.id, 1)
            .await
            .unwrap_err()
            .is_not_found());
    }

    async fn assert_place_is_all_or_nothing<S: ProductStore + OrderStore>(store: &S) {
        let lamp = store.save_product(product("Lamp", 5)).await.unwrap();
        let mug = store.save_product(product("Mug", 2)).await.unwrap();

        let err = store
            .place_order(order_for(&[(lamp.id, 2), (999, 1)]))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.get_product(lamp.id).await.unwrap().unwrap().quantity, 5);
        assert_eq!(store.get_order(1).await.unwrap(), None);

        let placed = store
            .place_order(order_for(&[(lamp.id, 2), (mug.id, 2)]))
            .await
            .unwrap();
        assert_eq!(store.get_product(lamp.id).await.unwrap().unwrap().quantity, 3);
        assert_eq!(store.get_product(mug.id).await.unwrap(), None);
        assert_eq!(
            store.get_order(placed.id).await.unwrap().map(|o| o.lines.len()),
            Some(2)
        );
    }

    #[tokio::test]
    async fn test_memory_place_order_is_all_or_nothing() {
        assert_place_is_all_or_nothing(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_sqlite_place_order_is_all_or_nothing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_place_is_all_or_nothing(&db).await;
    }

    #[tokio::test]
    async fn test_memory_stock_saturates() {
        let store = MemoryStore::with_products([product("Lamp", i64::MIN + 1)]);

        assert_eq!(
            store.update_product_stocks(1, 5).await.unwrap(),
            StockUpdate::Remaining(i64::MIN)
        );
    }

    #[tokio::test]
    async fn test_memory_store_stock_policy() {
        assert_stock_policy(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_sqlite_store_stock_policy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_stock_policy(&db).await;
    }

    #[tokio::test]
    async fn test_memory_ids_are_not_reused() {
        let store = MemoryStore::new();
        let first = store.save_product(product("First", 1)).await.unwrap();
        store.delete_product(first.id).await.unwrap();

        let second = store.save_product(product("Second", 1)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_memory_update_and_delete_missing() {
        let store = MemoryStore::with_products([product("Lamp", 3)]);

        let mut lamp = store.get_product(1).await.unwrap().unwrap();
        lamp.price_cents = 1500;
        store.save_product(lamp.clone()).await.unwrap();
        assert_eq!(store.get_product(1).await.unwrap(), Some(lamp));

        let ghost = Product {
            id: 42,
            ..product("Ghost", 1)
        };
        assert!(store.save_product(ghost).await.unwrap_err().is_not_found());
        assert!(store.delete_product(42).await.unwrap_err().is_not_found());
        assert_eq!(store.product_count().await, 1);
    }

    #[tokio::test]
    async fn test_listing_is_in_id_order() {
        let store = MemoryStore::with_products([product("Alpha", 1), product("Beta", 1)]);
        let names: Vec<String> = store
            .get_all_products()
            .await
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, ["Alpha", "Beta"]);
    }
}
