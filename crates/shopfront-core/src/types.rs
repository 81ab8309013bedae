//! # Domain Types
//!
//! Core domain types used throughout Shopfront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  validate   ┌─────────────────┐                   │
//! │  │  ProductInput   │ ──────────► │    Product      │                   │
//! │  │  ─────────────  │  + parse    │  ─────────────  │                   │
//! │  │  raw text only  │             │  id (i64)       │                   │
//! │  │  price: "9.99"  │             │  price_cents    │                   │
//! │  │  stock: " 3 "   │             │  quantity       │                   │
//! │  └─────────────────┘             └────────┬────────┘                   │
//! │                                           │ snapshot at checkout        │
//! │  ┌─────────────────┐             ┌────────▼────────┐                   │
//! │  │   OrderInput    │ ──────────► │     Order       │                   │
//! │  │  shipping text  │             │  OrderLine[]    │                   │
//! │  └─────────────────┘             └─────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are integers assigned by the store. `0` means "not persisted yet".

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{parse_price, parse_quantity, Money};

/// Id carried by entities that the store has not assigned an id to yet.
pub const UNSAVED_ID: i64 = 0;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier, `0` before creation.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Short marketing description.
    pub description: String,

    /// Longer details text.
    pub details: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Stock on hand. Can go negative when checkout oversells.
    pub quantity: i64,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether the store has assigned this product an id.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}

// =============================================================================
// Product Input
// =============================================================================

/// A product submission as typed by the user, before validation.
///
/// Every field is optional raw text: the input boundary must be able to
/// hold (and report on) blank or malformed values without failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ProductInput {
    /// `0` for a new product.
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub details: Option<String>,
    /// Raw price text, e.g. `"12.50"`.
    pub price: Option<String>,
    /// Raw stock text, e.g. `"3"`.
    pub stock: Option<String>,
}

/// Returns the text if it is present and not only whitespace.
pub(crate) fn non_blank(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.trim().is_empty())
}

fn trimmed_or_empty(text: Option<String>) -> String {
    text.map(|t| t.trim().to_string()).unwrap_or_default()
}

/// Maps a submission into a Product.
///
/// Callers validate first; this conversion only refuses what it cannot
/// represent: blank price/stock text is a missing argument, and malformed
/// numbers surface as [`CoreError::Parse`].
impl TryFrom<ProductInput> for Product {
    type Error = CoreError;

    fn try_from(input: ProductInput) -> CoreResult<Self> {
        let price = non_blank(&input.price)
            .ok_or_else(|| CoreError::invalid_argument("price"))
            .and_then(|text| parse_price(text).map_err(CoreError::from))?;

        let quantity = non_blank(&input.stock)
            .ok_or_else(|| CoreError::invalid_argument("stock"))
            .and_then(|text| parse_quantity(text).map_err(CoreError::from))?;

        Ok(Product {
            id: input.id,
            name: trimmed_or_empty(input.name),
            description: trimmed_or_empty(input.description),
            details: trimmed_or_empty(input.details),
            price_cents: price.cents(),
            quantity,
        })
    }
}

impl From<&Product> for ProductInput {
    /// Pre-fills an edit form from a stored product.
    fn from(product: &Product) -> Self {
        ProductInput {
            id: product.id,
            name: Some(product.name.clone()),
            description: Some(product.description.clone()),
            details: Some(product.details.clone()),
            price: Some(Decimal::new(product.price_cents, 2).to_string()),
            stock: Some(product.quantity.to_string()),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// Shipping details typed at checkout, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct OrderInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

/// A line of a placed order.
/// Uses snapshot pattern to freeze product data at time of checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderLine {
    pub product_id: i64,
    /// Product name at time of checkout (frozen).
    pub product_name: String,
    /// Unit price in cents at time of checkout (frozen).
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl OrderLine {
    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents) * self.quantity
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Store-assigned identifier, `0` before creation.
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Builds an unsaved order from shipping details and lines.
    pub fn new(input: OrderInput, lines: Vec<OrderLine>, placed_at: DateTime<Utc>) -> Self {
        Order {
            id: UNSAVED_ID,
            name: trimmed_or_empty(input.name),
            address: trimmed_or_empty(input.address),
            city: trimmed_or_empty(input.city),
            zip: trimmed_or_empty(input.zip),
            country: trimmed_or_empty(input.country),
            placed_at,
            lines,
        }
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(OrderLine::line_total).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn input() -> ProductInput {
        ProductInput {
            id: 0,
            name: Some("  Desk lamp ".to_string()),
            description: Some("A sturdy steel desk lamp".to_string()),
            details: Some("Adjustable arm, E27 socket".to_string()),
            price: Some(" 19.99 ".to_string()),
            stock: Some("4".to_string()),
        }
    }

    #[test]
    fn test_product_from_input() {
        let product = Product::try_from(input()).unwrap();
        assert_eq!(product.name, "Desk lamp");
        assert_eq!(product.price_cents, 1999);
        assert_eq!(product.quantity, 4);
        assert!(!product.is_persisted());
    }

    #[test]
    fn test_product_from_input_requires_price_and_stock() {
        let missing_price = ProductInput {
            price: Some("   ".to_string()),
            ..input()
        };
        assert_eq!(
            Product::try_from(missing_price),
            Err(CoreError::invalid_argument("price"))
        );

        let missing_stock = ProductInput {
            stock: None,
            ..input()
        };
        assert_eq!(
            Product::try_from(missing_stock),
            Err(CoreError::invalid_argument("stock"))
        );
    }

    #[test]
    fn test_product_from_input_reports_malformed_numbers() {
        let bad = ProductInput {
            stock: Some("two".to_string()),
            ..input()
        };
        assert_eq!(
            Product::try_from(bad),
            Err(CoreError::Parse(ParseError::NotAnInteger("two".to_string())))
        );
    }

    #[test]
    fn test_input_prefill_round_trips_through_parsing() {
        let product = Product {
            id: 7,
            ..Product::try_from(input()).unwrap()
        };
        let prefill = ProductInput::from(&product);
        assert_eq!(prefill.price.as_deref(), Some("19.99"));
        assert_eq!(Product::try_from(prefill).unwrap(), product);
    }

    #[test]
    fn test_order_total() {
        let lines = vec![
            OrderLine {
                product_id: 1,
                product_name: "Lamp".to_string(),
                unit_price_cents: 1000,
                quantity: 2,
            },
            OrderLine {
                product_id: 2,
                product_name: "Bulb".to_string(),
                unit_price_cents: 250,
                quantity: 4,
            },
        ];
        let order = Order::new(OrderInput::default(), lines, Utc::now());
        assert_eq!(order.total().cents(), 3000);
        assert_eq!(order.id, UNSAVED_ID);
    }

    #[test]
    fn test_product_input_deserializes_partial_json() {
        let input: ProductInput = serde_json::from_str(r#"{"name":"Lamp"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Lamp"));
        assert_eq!(input.price, None);
        assert_eq!(input.id, 0);
    }
}
