//! # Cart
//!
//! The per-session shopping cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Cart Method             Line Change           │
//! │  ──────────────           ───────────             ───────────           │
//! │                                                                         │
//! │  Add to cart ────────────► add_item(p, n) ──────► qty += n or push     │
//! │                                                                         │
//! │  Remove ─────────────────► remove_line(p) ──────► retain(id != p.id)   │
//! │                                                                         │
//! │  Checkout done ──────────► clear() ─────────────► lines.clear()        │
//! │                                                                         │
//! │  View cart ──────────────► total_value() / average_value() (read only) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! A Cart belongs to one session and has no interior locking. A line keeps a
//! snapshot of the product taken when it was first added; the store stays
//! the owner of the live record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Line Product
// =============================================================================

/// What a cart line refers to.
///
/// `Unknown` stands for "no product": adding an absent product is tolerated
/// and collects on a single line with no identity. It has no price, so it
/// never contributes to totals, and the stock reconciler skips it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "product")]
pub enum LineProduct {
    Unknown,
    Known(Product),
}

impl LineProduct {
    /// Identity used to merge lines. `None` for the sentinel.
    #[inline]
    pub fn id(&self) -> Option<i64> {
        match self {
            LineProduct::Unknown => None,
            LineProduct::Known(product) => Some(product.id),
        }
    }

    /// Returns the product for a real line.
    #[inline]
    pub fn product(&self) -> Option<&Product> {
        match self {
            LineProduct::Unknown => None,
            LineProduct::Known(product) => Some(product),
        }
    }

    /// Unit price; zero for the sentinel.
    #[inline]
    pub fn price(&self) -> Money {
        self.product().map(Product::price).unwrap_or_default()
    }
}

impl From<&Product> for LineProduct {
    fn from(product: &Product) -> Self {
        LineProduct::Known(product.clone())
    }
}

impl From<Product> for LineProduct {
    fn from(product: Product) -> Self {
        LineProduct::Known(product)
    }
}

impl From<Option<&Product>> for LineProduct {
    fn from(product: Option<&Product>) -> Self {
        product.map_or(LineProduct::Unknown, LineProduct::from)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One (product, quantity) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: LineProduct,

    /// Can be zero or negative: adding a negative quantity decrements
    /// without a floor.
    pub quantity: i64,
}

impl CartLine {
    /// Line value (unit price × quantity).
    #[inline]
    pub fn value(&self) -> Money {
        self.product.price() * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per product identity (adding the same product again
///   changes that line's quantity)
/// - The `Unknown` sentinel counts as one identity
/// - Lines keep insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,

    /// When the cart was created/last cleared
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a quantity of a product, merging with an existing line.
    ///
    /// ## Behavior
    /// - Line with the same identity exists: its quantity changes by `quantity`
    /// - Otherwise: a new line is appended
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::{Cart, LineProduct, Product};
    ///
    /// let lamp = Product {
    ///     id: 1,
    ///     name: "Lamp".into(),
    ///     description: String::new(),
    ///     details: String::new(),
    ///     price_cents: 1000,
    ///     quantity: 5,
    /// };
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item(&lamp, 2);
    /// cart.add_item(&lamp, -1);
    /// cart.add_item(LineProduct::Unknown, 4);
    ///
    /// assert_eq!(cart.line_count(), 2);
    /// assert_eq!(cart.quantity_of(1), Some(1));
    /// assert_eq!(cart.total_value().cents(), 1000);
    /// ```
    pub fn add_item(&mut self, product: impl Into<LineProduct>, quantity: i64) {
        let product = product.into();
        let id = product.id();

        match self.lines.iter_mut().find(|line| line.product.id() == id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine { product, quantity }),
        }
    }

    /// Removes every line for the product. Not an error if there is none.
    pub fn remove_line(&mut self, product: &Product) {
        self.lines
            .retain(|line| line.product.id() != Some(product.id));
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Sum of price × quantity over all lines; zero for an empty cart.
    ///
    /// Saturates at the i64 range rather than overflowing.
    pub fn total_value(&self) -> Money {
        self.lines.iter().map(CartLine::value).sum()
    }

    /// Total value divided by the number of distinct lines.
    ///
    /// Zero for an empty cart. Rounded half to even at the cent.
    pub fn average_value(&self) -> Money {
        self.total_value().divide_rounded(self.lines.len() as i64)
    }

    /// The lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |total, line| total.saturating_add(line.quantity))
    }

    /// Quantity on the line for `product_id`, if there is one.
    pub fn quantity_of(&self, product_id: i64) -> Option<i64> {
        self.lines
            .iter()
            .find(|line| line.product.id() == Some(product_id))
            .map(|line| line.quantity)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: i64, price: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            description: "Test description".to_string(),
            details: "Test details".to_string(),
            price_cents: Money::from_major(price).cents(),
            quantity: 10,
        }
    }

    #[test]
    fn test_huge_price_total_saturates() {
        let mut cart = Cart::new();
        let product = Product {
            price_cents: crate::parse_price("90000000000000000").unwrap().cents(),
            ..test_product(1, 0)
        };

        cart.add_item(&product, 2);
        cart.add_item(&test_product(2, 10), 1);

        assert_eq!(cart.total_value().cents(), i64::MAX);
        assert!(cart.average_value().cents() > 0);
    }

    #[test]
    fn test_line_quantity_saturates() {
        let mut cart = Cart::new();
        let product = test_product(1, 10);

        cart.add_item(&product, i64::MAX);
        cart.add_item(&product, 5);

        assert_eq!(cart.quantity_of(1), Some(i64::MAX));
        assert_eq!(cart.total_quantity(), i64::MAX);
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let product = test_product(1, 10);

        cart.add_item(&product, 2);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_value(), Money::from_major(20));
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product(1, 10);

        cart.add_item(&product, 2);
        cart.add_item(&product, 3);

        let mut single = Cart::new();
        single.add_item(&product, 5);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of(1), single.quantity_of(1));
    }

    #[test]
    fn test_negative_quantity_decrements_without_floor() {
        let mut cart = Cart::new();
        let product = test_product(1, 10);

        cart.add_item(&product, 1);
        cart.add_item(&product, -3);

        assert_eq!(cart.quantity_of(1), Some(-2));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_value(), Money::from_major(-20));
    }

    #[test]
    fn test_unknown_product_collects_on_one_sentinel_line() {
        let mut cart = Cart::new();
        let product = test_product(1, 10);

        cart.add_item(None::<&Product>, 1);
        cart.add_item(LineProduct::Unknown, 2);
        cart.add_item(&product, 1);

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.lines()[0].product, LineProduct::Unknown);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total_value(), Money::from_major(10));
    }

    #[test]
    fn test_remove_line_is_idempotent() {
        let mut cart = Cart::new();
        let a = test_product(1, 10);
        let b = test_product(2, 20);

        cart.add_item(&a, 1);
        cart.add_item(&b, 1);

        cart.remove_line(&a);
        assert_eq!(cart.line_count(), 1);
        cart.remove_line(&a);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of(2), Some(1));
    }

    #[test]
    fn test_remove_line_keeps_sentinel() {
        let mut cart = Cart::new();
        let a = test_product(1, 10);

        cart.add_item(LineProduct::Unknown, 1);
        cart.remove_line(&a);

        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_total_value() {
        assert!(Cart::new().total_value().is_zero());

        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 10), 1);
        cart.add_item(&test_product(2, 20), 1);
        cart.add_item(&test_product(3, 30), 1);
        assert_eq!(cart.total_value(), Money::from_major(60));

        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 10), 1);
        cart.add_item(&test_product(2, 20), 2);
        cart.add_item(&test_product(3, 30), 3);
        assert_eq!(cart.total_value(), Money::from_major(140));
    }

    #[test]
    fn test_average_value() {
        assert!(Cart::new().average_value().is_zero());

        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 10), 1);
        cart.add_item(&test_product(2, 20), 1);
        cart.add_item(&test_product(3, 30), 1);
        assert_eq!(cart.average_value(), Money::from_major(20));
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 10), 2);
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.total_value().is_zero());
    }

    #[test]
    fn test_line_keeps_price_snapshot() {
        let mut cart = Cart::new();
        let mut product = test_product(1, 10);
        cart.add_item(&product, 1);

        product.price_cents = 99_999;
        cart.add_item(&product, 1);

        assert_eq!(cart.total_value(), Money::from_major(20));
    }
}
