//! # shopfront-core: Pure Business Logic for Shopfront
//!
//! This crate is the **heart** of Shopfront. It holds the cart aggregate,
//! the product validator and the money parsing rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                shopfront-app (catalog / checkout)               │   │
//! │  │   create_product, delete_product, checkout, reconcile stock     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopfront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  ErrorKey │  │   │
//! │  │   │   Order   │  │  parsing  │  │ CartLine  │  │ Localizer │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shopfront-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductInput, Order, ...)
//! - [`money`] - Money type and locale-invariant price / stock parsing
//! - [`validation`] - Product field validation returning [`ErrorKey`]s
//! - [`cart`] - The per-session cart aggregate
//! - [`localization`] - Error key → display text
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{validate_product, Cart, Product, ProductInput};
//!
//! let input = ProductInput {
//!     name: Some("Desk lamp".into()),
//!     price: Some("  19.99 ".into()),
//!     stock: Some("4".into()),
//!     details: Some("Adjustable arm, E27 socket".into()),
//!     description: Some("A sturdy steel desk lamp".into()),
//!     ..ProductInput::default()
//! };
//! assert!(validate_product(&input).is_empty());
//!
//! let product = Product::try_from(input).unwrap();
//! let mut cart = Cart::new();
//! cart.add_item(&product, 2);
//! assert_eq!(cart.total_value().cents(), 3998);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod localization;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, LineProduct};
pub use error::{CoreError, CoreResult, ParseError};
pub use localization::{CatalogLocalizer, Locale, Localizer};
pub use money::{parse_decimal, parse_price, parse_quantity, Money};
pub use types::*;
pub use validation::{validate_order, validate_product, ErrorKey};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum product name length (exclusive): names of 3 characters or fewer are rejected.
pub const NAME_MIN_EXCLUSIVE: usize = 3;

/// Maximum product name length.
pub const NAME_MAX: usize = 100;

/// Minimum length for details and description.
pub const TEXT_MIN: usize = 10;

/// Maximum details length.
pub const DETAILS_MAX: usize = 200;

/// Maximum description length.
pub const DESCRIPTION_MAX: usize = 100;
