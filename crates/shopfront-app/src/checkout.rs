//! # Checkout Service
//!
//! Turns a cart into a placed order.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    checkout(cart, order_input)                          │
//! │                                                                         │
//! │  1. No product line with quantity > 0? ─────► CartEmpty                │
//! │  2. validate_order(&input) ── keys ─────────► Validation(keys)         │
//! │  3. Build Order (name + price snapshot per line)                       │
//! │  4. store.place_order(order)   order saved + stock -= qty per line     │
//! │                                in one transaction ──► Order { id }     │
//! │  5. cart.clear()                                                        │
//! │                                                                         │
//! │  Any error leaves the store and the cart as they were.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::store::OrderStore;
use shopfront_core::{validate_order, Cart, Order, OrderInput, OrderLine};

/// Places orders against a store holding both products and orders.
pub struct CheckoutService<S> {
    store: Arc<S>,
}

impl<S> Clone for CheckoutService<S> {
    fn clone(&self) -> Self {
        CheckoutService {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: OrderStore> CheckoutService<S> {
    pub fn new(store: Arc<S>) -> Self {
        CheckoutService { store }
    }

    /// Places an order for the cart and empties it.
    ///
    /// ## Returns
    /// * `Ok(Order)` - The saved order with its assigned id
    /// * `Err(ServiceError::CartEmpty)` - The cart holds no product lines
    /// * `Err(ServiceError::Validation)` - Shipping details are missing
    /// * `Err(ServiceError::Db(DbError::NotFound))` - A cart product was deleted
    pub async fn checkout(&self, cart: &mut Cart, input: OrderInput) -> ServiceResult<Order> {
        let lines = order_lines(cart);
        if lines.is_empty() {
            return Err(ServiceError::CartEmpty);
        }

        let keys = validate_order(&input);
        if !keys.is_empty() {
            return Err(ServiceError::Validation(keys));
        }

        let order = self
            .store
            .place_order(Order::new(input, lines, Utc::now()))
            .await?;
        cart.clear();

        info!(
            id = order.id,
            lines = order.lines.len(),
            total = %order.total(),
            "Order placed"
        );
        Ok(order)
    }

    /// Looks a placed order up.
    pub async fn get_order(&self, id: i64) -> ServiceResult<Option<Order>> {
        if id <= 0 {
            return Ok(None);
        }
        Ok(self.store.get_order(id).await?)
    }
}

/// Snapshots the product lines of the cart.
///
/// The `Unknown` line and lines with a quantity of zero or less are left out.
fn order_lines(cart: &Cart) -> Vec<OrderLine> {
    cart.lines()
        .iter()
        .filter(|line| line.quantity > 0)
        .filter_map(|line| {
            line.product.product().map(|product| OrderLine {
                product_id: product.id,
                product_name: product.name.clone(),
                unit_price_cents: product.price_cents,
                quantity: line.quantity,
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
