//! # Repository Module
//!
//! Storage contracts for the catalog and their backends.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Contracts                                 │
//! │                                                                         │
//! │  Services (apps/kitstock)                                              │
//! │       │                                                                 │
//! │       │  Arc<dyn ProductRepository> / Arc<dyn KitRepository>           │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────┐     ┌───────────────────────────┐       │
//! │  │ SqliteProductRepository   │     │ InMemoryProductRepository │       │
//! │  │ SqliteKitRepository       │     │ InMemoryKitRepository     │       │
//! │  │ (product.rs, kit.rs)      │     │ (memory.rs, tests only)   │       │
//! │  └───────────────────────────┘     └───────────────────────────┘       │
//! │                                                                         │
//! │  Both backends report the same DbError variants for the same           │
//! │  situations, so services never branch on the backend.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//!
//! - `add` assigns the identity and returns it; the caller's value keeps `id() == None`.
//! - `add` fails with [`DbError::UniqueViolation`](crate::DbError) when the SKU is taken.
//! - `get_*`, `update` and `remove` fail with `DbError::NotFound` for unknown records.
//! - `update` never changes the SKU.
//! - Listings come back in insertion order.

use async_trait::async_trait;
use kitstock_core::{Kit, Product};

use crate::error::{DbError, DbResult};

pub mod kit;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod product;

/// Storage for products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, in insertion order.
    async fn list(&self) -> DbResult<Vec<Product>>;

    /// Products whose SKU is in `skus`. Unknown SKUs are silently skipped.
    async fn list_by_skus(&self, skus: &[String]) -> DbResult<Vec<Product>>;

    async fn get_by_id(&self, id: &str) -> DbResult<Product>;

    async fn get_by_sku(&self, sku: &str) -> DbResult<Product>;

    /// Stores a new product and returns its generated id.
    async fn add(&self, product: &Product) -> DbResult<String>;

    async fn remove(&self, id: &str) -> DbResult<()>;

    /// Overwrites name, cost, price and inventory of the stored product with the same id.
    async fn update(&self, product: &Product) -> DbResult<()>;

    /// Counts stored products (for diagnostics).
    async fn count(&self) -> DbResult<i64>;
}

/// Storage for kits and their line items.
#[async_trait]
pub trait KitRepository: Send + Sync {
    /// All kits, in insertion order, each with its line items in order.
    async fn list(&self) -> DbResult<Vec<Kit>>;

    /// Kits with at least one line item referencing `product_sku`. Each kit appears once.
    async fn list_by_product(&self, product_sku: &str) -> DbResult<Vec<Kit>>;

    async fn get_by_id(&self, id: &str) -> DbResult<Kit>;

    async fn get_by_sku(&self, sku: &str) -> DbResult<Kit>;

    /// Stores a new kit with its line items and returns its generated id.
    async fn add(&self, kit: &Kit) -> DbResult<String>;

    async fn remove(&self, id: &str) -> DbResult<()>;

    /// Overwrites the name and the whole line item list of the stored kit.
    async fn update(&self, kit: &Kit) -> DbResult<()>;

    /// Counts stored kits (for diagnostics).
    async fn count(&self) -> DbResult<i64>;
}

/// SQLite hands integers back as i64; entity quantities are u32.
pub(crate) fn column_u32(column: &str, value: i64) -> DbResult<u32> {
    u32::try_from(value)
        .map_err(|_| DbError::Internal(format!("{column} out of range: {value}")))
}
