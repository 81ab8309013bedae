//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Stock decrements applied at checkout
//!
//! ## Stock Decrement Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    decrement_stock(id, qty)                         │
//! │                                                                     │
//! │  UPDATE products SET quantity = quantity - qty  (delta, no clamp)  │
//! │       │                                                             │
//! │       ├── remaining == 0  → DELETE the product  → Removed          │
//! │       ├── remaining  < 0  → keep it (oversold)  → Remaining(n)     │
//! │       └── remaining  > 0  → keep it             → Remaining(n)     │
//! │                                                                     │
//! │  Both statements run in one transaction.                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use shopfront_core::{Product, UNSAVED_ID};

/// Outcome of a stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockUpdate {
    /// The product is still listed with this stock (may be negative).
    Remaining(i64),
    /// Stock reached exactly zero and the product was deleted.
    Removed,
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let saved = repo.save(&product).await?;
/// let product = repo.get_by_id(saved.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, details, price_cents, quantity
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, details, price_cents, quantity
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product and returns it with its assigned id.
    ///
    /// The incoming id is ignored.
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, description, details, price_cents, quantity)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.details)
        .bind(product.price_cents)
        .bind(product.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(Product {
            id,
            ..product.clone()
        })
    }

    /// Updates an existing product.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                details = ?4,
                price_cents = ?5,
                quantity = ?6
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.details)
        .bind(product.price_cents)
        .bind(product.quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Inserts an unsaved product or updates a persisted one.
    pub async fn save(&self, product: &Product) -> DbResult<Product> {
        if product.id == UNSAVED_ID {
            self.insert(product).await
        } else {
            self.update(product).await?;
            Ok(product.clone())
        }
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No product has this id
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Removes `quantity` from a product's stock.
    ///
    /// No clamping: oversold products go negative. A product whose stock
    /// lands on exactly zero is deleted.
    pub async fn decrement_stock(&self, id: i64, quantity: i64) -> DbResult<StockUpdate> {
        debug!(id, quantity, "Decrementing stock");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let update = apply_decrement(&mut *tx, id, quantity).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(update)
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Applies the stock policy for one product on an open transaction.
///
/// Shared by [`ProductRepository::decrement_stock`] and
/// [`OrderRepository::place`](crate::OrderRepository::place).
pub(crate) async fn apply_decrement(
    conn: &mut SqliteConnection,
    id: i64,
    quantity: i64,
) -> DbResult<StockUpdate> {
    let remaining: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE products
        SET quantity = quantity - ?2
        WHERE id = ?1
        RETURNING quantity
        "#,
    )
    .bind(id)
    .bind(quantity)
    .fetch_optional(&mut *conn)
    .await?;

    match remaining {
        None => Err(DbError::not_found("Product", id)),
        Some(0) => {
            sqlx::query("DELETE FROM products WHERE id = ?1")
                .bind(id)
                .execute(&mut *conn)
                .await?;
            info!(id, "Stock exhausted, product removed");
            Ok(StockUpdate::Removed)
        }
        Some(left) => Ok(StockUpdate::Remaining(left)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
