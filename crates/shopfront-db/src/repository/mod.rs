//! # Repository Module
//!
//! Database repository implementations for Shopfront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CatalogService (through the ProductStore trait)                       │
//! │       │                                                                 │
//! │       │  db.products().decrement_stock(id, 2)                          │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list_all(&self)                                                   │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── save(&self, product)                                              │
//! │  ├── delete(&self, id)                                                 │
//! │  └── decrement_stock(&self, id, qty)                                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and stock
//! - [`OrderRepository`](order::OrderRepository) - Placed orders and their lines

pub mod order;
pub mod product;
