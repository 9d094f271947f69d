//! # Product Repository
//!
//! SQLite storage for products.
//!
//! ## Key Operations
//! - CRUD keyed by generated UUID
//! - Lookup by SKU (single and batch)
//!
//! ## SKU Uniqueness
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Duplicate SKU Detection                              │
//! │                                                                         │
//! │  add(product "AHJU-49685")                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT INTO products ...                                              │
//! │       │                                                                 │
//! │       ├── ok ───────────────────────────────► Ok(new id)               │
//! │       │                                                                 │
//! │       └── "UNIQUE constraint failed: products.sku"                     │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │           DbError::UniqueViolation { field: "sku", value: "AHJU-..." } │
//! │                                                                         │
//! │  No SELECT-then-INSERT: the index decides, even under concurrency.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use kitstock_core::{CoreError, Product, ProductDetails};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::{column_u32, ProductRepository};
use crate::error::{DbError, DbResult};

const SELECT_PRODUCTS: &str =
    "SELECT id, sku, name, cost, price, inventory_quantity FROM products";

/// A `products` row as SQLite returns it.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    sku: String,
    name: String,
    cost: f64,
    price: f64,
    inventory_quantity: i64,
}

impl ProductRow {
    fn into_product(self) -> DbResult<Product> {
        let inventory_quantity = column_u32("inventory_quantity", self.inventory_quantity)?;
        Ok(Product::with_id(
            self.id,
            ProductDetails {
                name: self.name,
                sku: self.sku,
                cost: self.cost,
                price: self.price,
                inventory_quantity,
            },
        ))
    }
}

fn into_products(rows: Vec<ProductRow>) -> DbResult<Vec<Product>> {
    rows.into_iter().map(ProductRow::into_product).collect()
}

/// SQLite-backed [`ProductRepository`].
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let id = repo.add(&product).await?;
/// let stored = repo.get_by_sku("AHJU-49685").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Creates a new SqliteProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteProductRepository { pool }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn list(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> =
            sqlx::query_as(&format!("{SELECT_PRODUCTS} ORDER BY rowid"))
                .fetch_all(&self.pool)
                .await?;

        debug!(count = rows.len(), "Listed products");
        into_products(rows)
    }

    /// Batch lookup used by kit calculation.
    ///
    /// ## Performance
    /// One `IN (...)` query regardless of how many SKUs are asked for.
    async fn list_by_skus(&self, skus: &[String]) -> DbResult<Vec<Product>> {
        if skus.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("{SELECT_PRODUCTS} WHERE sku IN ("));
        let mut separated = builder.separated(", ");
        for sku in skus {
            separated.push_bind(sku.clone());
        }
        separated.push_unseparated(") ORDER BY rowid");

        let rows: Vec<ProductRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        debug!(requested = skus.len(), found = rows.len(), "Loaded products by SKU");
        into_products(rows)
    }

    async fn get_by_id(&self, id: &str) -> DbResult<Product> {
        let row: Option<ProductRow> = sqlx::query_as(&format!("{SELECT_PRODUCTS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| DbError::not_found("Product", id))?
            .into_product()
    }

    async fn get_by_sku(&self, sku: &str) -> DbResult<Product> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("{SELECT_PRODUCTS} WHERE sku = ?"))
                .bind(sku)
                .fetch_optional(&self.pool)
                .await?;

        row.ok_or_else(|| DbError::not_found("Product", sku))?
            .into_product()
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(id)` - Generated UUID of the stored product
    /// * `Err(DbError::UniqueViolation)` - SKU already exists
    /// * `Err(DbError::Domain)` - The product already carries an id
    async fn add(&self, product: &Product) -> DbResult<String> {
        if let Some(id) = product.id() {
            return Err(CoreError::identity_assigned("Product", id).into());
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(sku = %product.sku(), "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, sku, name, cost, price, inventory_quantity, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(product.sku())
        .bind(product.name())
        .bind(product.cost())
        .bind(product.price())
        .bind(i64::from(product.inventory_quantity()))
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate("sku", product.sku()))?;

        Ok(id)
    }

    /// Deletes a product.
    ///
    /// Fails with `DbError::ForeignKeyViolation` while a kit line item still
    /// references the product's SKU.
    async fn remove(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    async fn update(&self, product: &Product) -> DbResult<()> {
        let id = product.id().ok_or_else(|| DbError::Unidentified {
            entity: "Product".to_string(),
        })?;

        debug!(id = %id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?,
                cost = ?,
                price = ?,
                inventory_quantity = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(product.name())
        .bind(product.cost())
        .bind(product.price())
        .bind(i64::from(product.inventory_quantity()))
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
