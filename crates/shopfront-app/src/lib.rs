//! # shopfront-app: Catalog and Checkout Services
//!
//! Wires the pure core (`shopfront-core`) to a product/order store and
//! exposes the operations a storefront front end calls.
//!
//! ## Module Organization
//! ```text
//! shopfront_app/
//! ├── lib.rs          ◄─── You are here (Storefront wiring, tracing init)
//! ├── config.rs       ◄─── AppConfig (SHOPFRONT_* environment)
//! ├── error.rs        ◄─── ServiceError, ErrorCode, ErrorPayload
//! ├── store.rs        ◄─── ProductStore / OrderStore + SQLite and memory stores
//! ├── catalog.rs      ◄─── List, get, create, delete-with-cart-cleanup, reconcile
//! └── checkout.rs     ◄─── Cart → Order, stock decrement, cart clear
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Startup                                │
//! │                                                                         │
//! │  1. init_tracing()        EnvFilter, RUST_LOG overrides the default    │
//! │  2. AppConfig::from_env() database path, locale, pool size             │
//! │  3. Storefront::open()    SQLite pool (WAL) + pending migrations       │
//! │  4. storefront.catalog / storefront.checkout                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use shopfront_app::{init_tracing, AppConfig, Storefront};
//! use shopfront_core::{Cart, OrderInput};
//!
//! init_tracing();
//! let storefront = Storefront::open(&AppConfig::from_env()).await?;
//!
//! let mut cart = Cart::new();
//! let lamp = storefront.catalog.get_product(1).await?.unwrap();
//! cart.add_item(&lamp, 2);
//!
//! let order = storefront.checkout.checkout(&mut cart, order_input).await?;
//! ```

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod store;

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shopfront_core::Localizer;
use shopfront_db::Database;

pub use catalog::CatalogService;
pub use checkout::CheckoutService;
pub use config::AppConfig;
pub use error::{ErrorCode, ErrorPayload, ServiceError, ServiceResult};
pub use store::{MemoryStore, OrderStore, ProductStore};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,shopfront=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront_app=trace` - Show trace for this crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// A second call is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Already installed (tests, embedding apps)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// The services of one storefront, sharing a database.
#[derive(Clone)]
pub struct Storefront {
    pub database: Arc<Database>,
    pub catalog: CatalogService<Database>,
    pub checkout: CheckoutService<Database>,
}

impl Storefront {
    /// Connects to the configured database and builds the services.
    pub async fn open(config: &AppConfig) -> ServiceResult<Self> {
        if let Some(dir) = config.database_path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    shopfront_db::DbError::ConnectionFailed(format!(
                        "cannot create {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        let database = Database::new(config.db_config()).await?;
        info!(path = %config.database_path.display(), locale = %config.locale, "Storefront opened");

        Ok(Self::with_database(database, Arc::new(config.localizer())))
    }

    /// Builds the services over an already-open database.
    pub fn with_database(database: Database, localizer: Arc<dyn Localizer>) -> Self {
        let database = Arc::new(database);
        Storefront {
            catalog: CatalogService::new(Arc::clone(&database), localizer),
            checkout: CheckoutService::new(Arc::clone(&database)),
            database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::{Cart, CatalogLocalizer, Locale, OrderInput, ProductInput};
    use shopfront_db::DbConfig;

    async fn storefront() -> Storefront {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Storefront::with_database(db, Arc::new(CatalogLocalizer::new(Locale::Fr)))
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing();
        init_tracing();
    }

    #[tokio::test]
    async fn test_create_browse_and_check_out() {
        let storefront = storefront().await;

        let lamp = storefront
            .catalog
            .create_product(Some(ProductInput {
                id: 0,
                name: Some("Desk Lamp".to_string()),
                description: Some("Warm LED desk lamp".to_string()),
                details: Some("Adjustable arm, 40cm reach".to_string()),
                price: Some("24.50".to_string()),
                stock: Some("3".to_string()),
            }))
            .await
            .unwrap();

        let mut cart = Cart::new();
        cart.add_item(&lamp, 3);

        let order = storefront
            .checkout
            .checkout(
                &mut cart,
                OrderInput {
                    name: Some("Ada".to_string()),
                    address: Some("12 Analytical Row".to_string()),
                    city: Some("London".to_string()),
                    zip: Some("NW1".to_string()),
                    country: Some("UK".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(order.total().cents(), 7350);
        assert!(cart.is_empty());
        assert!(storefront.catalog.get_all_products().await.unwrap().is_empty());
        assert_eq!(storefront.database.orders().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_validation_text_uses_configured_locale() {
        let storefront = storefront().await;

        let err = storefront
            .catalog
            .create_product(Some(ProductInput::default()))
            .await
            .unwrap_err();

        let french = storefront.catalog.localize(err.keys());
        let english = CatalogLocalizer::new(Locale::En).lookup_all(err.keys());
        assert_eq!(french.len(), english.len());
        assert_ne!(french[0], english[0]);
    }
}
