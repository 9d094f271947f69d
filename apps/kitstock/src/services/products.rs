//! Product use cases.

use std::sync::Arc;

use kitstock_core::validation::{validate_product_details, validate_product_update};
use kitstock_core::{CoreError, Product, ProductDetails, ProductUpdate};
use kitstock_db::{DbError, KitRepository, ProductRepository};
use tracing::{info, warn};

use super::{ServiceError, ServiceResult};

/// Product CRUD with the kit reference guard on removal.
#[derive(Clone)]
pub struct ProductsService {
    products: Arc<dyn ProductRepository>,
    kits: Arc<dyn KitRepository>,
}

impl ProductsService {
    pub fn new(products: Arc<dyn ProductRepository>, kits: Arc<dyn KitRepository>) -> Self {
        ProductsService { products, kits }
    }

    /// Validates and stores a new product, returning it with its identity.
    pub async fn create_product(&self, details: ProductDetails) -> ServiceResult<Product> {
        validate_product_details(&details)?;

        let mut product = Product::new(details);
        let id = self.products.add(&product).await?;
        product.define_id(id)?;

        info!(id = ?product.id(), sku = %product.sku(), "Product created");
        Ok(product)
    }

    pub async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.products.list().await?)
    }

    pub async fn get_product(&self, id: &str) -> ServiceResult<Product> {
        Ok(self.products.get_by_id(id).await?)
    }

    pub async fn get_product_by_sku(&self, sku: &str) -> ServiceResult<Product> {
        Ok(self.products.get_by_sku(sku).await?)
    }

    /// Replaces name, cost, price and inventory of an existing product.
    pub async fn update_product(&self, id: &str, update: ProductUpdate) -> ServiceResult<Product> {
        validate_product_update(&update)?;

        let mut product = self.products.get_by_id(id).await?;
        product.update_infos(update);
        self.products.update(&product).await?;

        info!(id = %id, "Product updated");
        Ok(product)
    }

    /// Removes a product no kit refers to.
    ///
    /// A kit stored between the check and the delete is caught by the
    /// storage foreign key and reported the same way.
    ///
    /// ## Errors
    /// * `CoreError::ProductInUse` - at least one kit has a line item with this SKU
    /// * `DbError::NotFound` - unknown id
    pub async fn remove_product(&self, id: &str) -> ServiceResult<()> {
        let product = self.products.get_by_id(id).await?;

        let kits = self.kits.list_by_product(product.sku()).await?;
        if !kits.is_empty() {
            return Err(in_use(&product, kits.len()));
        }

        match self.products.remove(id).await {
            Ok(()) => {}
            Err(DbError::ForeignKeyViolation { .. }) => {
                let kit_count = self
                    .kits
                    .list_by_product(product.sku())
                    .await
                    .map_or(1, |kits| kits.len().max(1));
                return Err(in_use(&product, kit_count));
            }
            Err(e) => return Err(e.into()),
        }

        info!(id = %id, sku = %product.sku(), "Product removed");
        Ok(())
    }
}

fn in_use(product: &Product, kit_count: usize) -> ServiceError {
    warn!(sku = %product.sku(), kit_count, "Product removal blocked");
    CoreError::ProductInUse {
        sku: product.sku().to_string(),
        kit_count,
    }
    .into()
}
