//! # Catalog Service
//!
//! Product listing, creation, deletion with cart cleanup, and the stock
//! reconciler.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_product(input)                                │
//! │                                                                         │
//! │  None ─────────────────────────────────────► InvalidArgument("input")  │
//! │  Some(input)                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_product(&input) ── keys ─────────► Validation(keys)          │
//! │       │ []                                   (nothing persisted)       │
//! │       ▼                                                                 │
//! │  Product::try_from(input)   trim text, parse price + stock             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.save_product(product) ──────────────► Product { id: assigned }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lookups
//! `get_product` is lenient (`Ok(None)` for unknown or non-positive ids).
//! `delete_product` is strict (`ServiceError::NotFound`).

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use crate::store::ProductStore;
use shopfront_core::{validate_product, Cart, ErrorKey, Localizer, Product, ProductInput};
use shopfront_db::StockUpdate;

/// Catalog operations over a product store.
pub struct CatalogService<S> {
    store: Arc<S>,
    localizer: Arc<dyn Localizer>,
}

impl<S> Clone for CatalogService<S> {
    fn clone(&self) -> Self {
        CatalogService {
            store: Arc::clone(&self.store),
            localizer: Arc::clone(&self.localizer),
        }
    }
}

impl<S: ProductStore> CatalogService<S> {
    pub fn new(store: Arc<S>, localizer: Arc<dyn Localizer>) -> Self {
        CatalogService { store, localizer }
    }

    /// Every product; a store with no listing yields an empty list.
    pub async fn get_all_products(&self) -> ServiceResult<Vec<Product>> {
        let products = self.store.get_all_products().await?.unwrap_or_default();
        debug!(count = products.len(), "get_all_products");
        Ok(products)
    }

    /// Looks a product up; non-positive ids are never sent to the store.
    pub async fn get_product(&self, id: i64) -> ServiceResult<Option<Product>> {
        if id <= 0 {
            return Ok(None);
        }
        Ok(self.store.get_product(id).await?)
    }

    /// Validates and stores a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored product with its assigned id
    /// * `Err(ServiceError::InvalidArgument)` - No input was given
    /// * `Err(ServiceError::Validation)` - The input has errors; nothing stored
    pub async fn create_product(&self, input: Option<ProductInput>) -> ServiceResult<Product> {
        let input = input.ok_or_else(|| ServiceError::InvalidArgument("input".to_string()))?;

        let keys = validate_product(&input);
        if !keys.is_empty() {
            debug!(errors = keys.len(), "Product input rejected");
            return Err(ServiceError::Validation(keys));
        }

        let product = Product::try_from(input)?;
        let saved = self.store.save_product(product).await?;

        info!(id = saved.id, name = %saved.name, "Product created");
        Ok(saved)
    }

    /// Deletes a product and drops its line from the cart.
    ///
    /// An unknown id fails without touching the cart or the store.
    pub async fn delete_product(&self, cart: &mut Cart, id: i64) -> ServiceResult<Product> {
        let product = self
            .get_product(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id))?;

        cart.remove_line(&product);
        self.store.delete_product(product.id).await?;

        info!(id, "Product deleted");
        Ok(product)
    }

    /// Applies the cart's quantities to stock. See [`update_product_quantities`].
    pub async fn update_product_quantities(&self, cart: &Cart) -> ServiceResult<()> {
        update_product_quantities(self.store.as_ref(), cart).await
    }

    /// Display text for validation keys in the configured locale.
    pub fn localize(&self, keys: &[ErrorKey]) -> Vec<String> {
        self.localizer
            .lookup_all(keys)
            .into_iter()
            .map(|text| text.into_owned())
            .collect()
    }
}

/// Decrements stock for every product line of the cart, in line order.
///
/// The `Unknown` line has no product to decrement and is skipped. The first
/// store error stops the walk; decrements already applied stay applied.
pub async fn update_product_quantities<S>(store: &S, cart: &Cart) -> ServiceResult<()>
where
    S: ProductStore + ?Sized,
{
    for line in cart.lines() {
        let Some(id) = line.product.id() else {
            continue;
        };

        match store.update_product_stocks(id, line.quantity).await? {
            StockUpdate::Removed => info!(id, "Product sold out and removed"),
            StockUpdate::Remaining(left) => debug!(id, left, "Stock decremented"),
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
