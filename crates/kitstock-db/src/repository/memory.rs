//! # In-Memory Repositories
//!
//! Vec-backed implementations of the repository traits for tests.
//! Compiled only under `cfg(test)` or the `test-util` feature.
//!
//! Ids are sequential decimal strings starting at `"1"` (highest existing id
//! plus one), so test expectations can name them directly.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use kitstock_core::{Kit, Product, ProductDetails};

use super::{KitRepository, ProductRepository};
use crate::error::{DbError, DbResult};

fn lock<T>(items: &Mutex<Vec<T>>) -> DbResult<MutexGuard<'_, Vec<T>>> {
    items
        .lock()
        .map_err(|_| DbError::Internal("in-memory repository lock poisoned".to_string()))
}

/// Highest numeric id in use plus one.
fn next_id<'a>(ids: impl Iterator<Item = Option<&'a str>>) -> String {
    let max = ids
        .flatten()
        .filter_map(|id| id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

fn position<T>(items: &[T], id: &str, id_of: impl Fn(&T) -> Option<&str>) -> Option<usize> {
    items.iter().position(|item| id_of(item) == Some(id))
}

// =============================================================================
// Products
// =============================================================================

/// In-memory [`ProductRepository`].
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> DbResult<Vec<Product>> {
        Ok(lock(&self.products)?.clone())
    }

    async fn list_by_skus(&self, skus: &[String]) -> DbResult<Vec<Product>> {
        Ok(lock(&self.products)?
            .iter()
            .filter(|p| skus.iter().any(|sku| sku == p.sku()))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> DbResult<Product> {
        lock(&self.products)?
            .iter()
            .find(|p| p.id() == Some(id))
            .cloned()
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    async fn get_by_sku(&self, sku: &str) -> DbResult<Product> {
        lock(&self.products)?
            .iter()
            .find(|p| p.sku() == sku)
            .cloned()
            .ok_or_else(|| DbError::not_found("Product", sku))
    }

    async fn add(&self, product: &Product) -> DbResult<String> {
        let mut products = lock(&self.products)?;

        let id = next_id(products.iter().map(Product::id));
        let mut stored = product.clone();
        stored.define_id(id.clone())?;

        if products.iter().any(|p| p.sku() == stored.sku()) {
            return Err(DbError::duplicate("sku", stored.sku()));
        }

        products.push(stored);
        Ok(id)
    }

    async fn remove(&self, id: &str) -> DbResult<()> {
        let mut products = lock(&self.products)?;
        let index = position(products.as_slice(), id, Product::id)
            .ok_or_else(|| DbError::not_found("Product", id))?;
        products.remove(index);
        Ok(())
    }

    async fn update(&self, product: &Product) -> DbResult<()> {
        let id = product.id().ok_or_else(|| DbError::Unidentified {
            entity: "Product".to_string(),
        })?;

        let mut products = lock(&self.products)?;
        let index = position(products.as_slice(), id, Product::id)
            .ok_or_else(|| DbError::not_found("Product", id))?;

        // SKU is immutable: keep the stored one
        let details = ProductDetails {
            sku: products[index].sku().to_string(),
            ..product.details()
        };
        products[index] = Product::with_id(id, details);
        Ok(())
    }

    async fn count(&self) -> DbResult<i64> {
        Ok(lock(&self.products)?.len() as i64)
    }
}

// =============================================================================
// Kits
// =============================================================================

/// In-memory [`KitRepository`].
#[derive(Debug, Default)]
pub struct InMemoryKitRepository {
    kits: Mutex<Vec<Kit>>,
}

impl InMemoryKitRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KitRepository for InMemoryKitRepository {
    async fn list(&self) -> DbResult<Vec<Kit>> {
        Ok(lock(&self.kits)?.clone())
    }

    async fn list_by_product(&self, product_sku: &str) -> DbResult<Vec<Kit>> {
        Ok(lock(&self.kits)?
            .iter()
            .filter(|kit| kit.references(product_sku))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> DbResult<Kit> {
        lock(&self.kits)?
            .iter()
            .find(|k| k.id() == Some(id))
            .cloned()
            .ok_or_else(|| DbError::not_found("Kit", id))
    }

    async fn get_by_sku(&self, sku: &str) -> DbResult<Kit> {
        lock(&self.kits)?
            .iter()
            .find(|k| k.sku() == sku)
            .cloned()
            .ok_or_else(|| DbError::not_found("Kit", sku))
    }

    async fn add(&self, kit: &Kit) -> DbResult<String> {
        let mut kits = lock(&self.kits)?;

        let id = next_id(kits.iter().map(Kit::id));
        let mut stored = kit.clone();
        stored.define_id(id.clone())?;

        if kits.iter().any(|k| k.sku() == stored.sku()) {
            return Err(DbError::duplicate("sku", stored.sku()));
        }

        kits.push(stored);
        Ok(id)
    }

    async fn remove(&self, id: &str) -> DbResult<()> {
        let mut kits = lock(&self.kits)?;
        let index =
            position(kits.as_slice(), id, Kit::id).ok_or_else(|| DbError::not_found("Kit", id))?;
        kits.remove(index);
        Ok(())
    }

    async fn update(&self, kit: &Kit) -> DbResult<()> {
        let id = kit.id().ok_or_else(|| DbError::Unidentified {
            entity: "Kit".to_string(),
        })?;

        let mut kits = lock(&self.kits)?;
        let index =
            position(kits.as_slice(), id, Kit::id).ok_or_else(|| DbError::not_found("Kit", id))?;

        let sku = kits[index].sku().to_string();
        kits[index] = Kit::with_id(id, kit.name(), sku, kit.line_items().to_vec());
        Ok(())
    }

    async fn count(&self) -> DbResult<i64> {
        Ok(lock(&self.kits)?.len() as i64)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
