//! # Kit Repository
//!
//! SQLite storage for kits. A kit spans two tables:
//!
//! ```text
//! kits                         kit_line_items
//! ┌──────┬──────────┬──────┐   ┌────────┬──────────┬─────────────┬─────┬──────────┐
//! │ id   │ sku      │ name │   │ kit_id │ position │ product_sku │ qty │ discount │
//! ├──────┼──────────┼──────┤   ├────────┼──────────┼─────────────┼─────┼──────────┤
//! │ k-1  │ FASF-123 │ Sony │◄──│ k-1    │ 0        │ AHJU-49685  │ 1   │ 10.0     │
//! │      │          │      │◄──│ k-1    │ 1        │ AHJU-49621  │ 2   │ 15.0     │
//! └──────┴──────────┴──────┘   └────────┴──────────┴─────────────┴─────┴──────────┘
//! ```
//!
//! Every write touching both tables runs in one transaction, and line items
//! are removed by `ON DELETE CASCADE` together with their kit.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use kitstock_core::{CoreError, Kit, KitLineItem};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::{column_u32, KitRepository};
use crate::error::{DbError, DbResult};

#[derive(Debug, sqlx::FromRow)]
struct KitRow {
    id: String,
    sku: String,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct LineItemRow {
    kit_id: String,
    product_sku: String,
    quantity: i64,
    discount_percentage: f64,
}

/// SQLite-backed [`KitRepository`].
#[derive(Debug, Clone)]
pub struct SqliteKitRepository {
    pool: SqlitePool,
}

impl SqliteKitRepository {
    /// Creates a new SqliteKitRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteKitRepository { pool }
    }

    /// Loads the line items of every row in one query and assembles kits,
    /// preserving the order of `rows`.
    async fn attach_line_items(&self, rows: Vec<KitRow>) -> DbResult<Vec<Kit>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT kit_id, product_sku, quantity, discount_percentage \
             FROM kit_line_items WHERE kit_id IN (",
        );
        let mut separated = builder.separated(", ");
        for row in &rows {
            separated.push_bind(row.id.clone());
        }
        separated.push_unseparated(") ORDER BY kit_id, position");

        let item_rows: Vec<LineItemRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        let mut items_by_kit: HashMap<String, Vec<KitLineItem>> = HashMap::new();
        for item in item_rows {
            let quantity = column_u32("quantity", item.quantity)?;
            items_by_kit.entry(item.kit_id).or_default().push(KitLineItem::new(
                item.product_sku,
                quantity,
                item.discount_percentage,
            ));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let line_items = items_by_kit.remove(&row.id).unwrap_or_default();
                Kit::with_id(row.id, row.name, row.sku, line_items)
            })
            .collect())
    }

    async fn load_one(&self, row: Option<KitRow>, key: &str) -> DbResult<Kit> {
        let row = row.ok_or_else(|| DbError::not_found("Kit", key))?;
        self.attach_line_items(vec![row])
            .await?
            .pop()
            .ok_or_else(|| DbError::not_found("Kit", key))
    }
}

/// Writes `line_items` under `kit_id`, numbering positions from zero.
async fn insert_line_items(
    conn: &mut SqliteConnection,
    kit_id: &str,
    line_items: &[KitLineItem],
) -> DbResult<()> {
    for (position, item) in line_items.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO kit_line_items (
                kit_id, position, product_sku, quantity, discount_percentage
            ) VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(kit_id)
        .bind(position as i64)
        .bind(item.product_sku())
        .bind(i64::from(item.quantity()))
        .bind(item.discount_percentage())
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl KitRepository for SqliteKitRepository {
    async fn list(&self) -> DbResult<Vec<Kit>> {
        let rows: Vec<KitRow> = sqlx::query_as("SELECT id, sku, name FROM kits ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed kits");
        self.attach_line_items(rows).await
    }

    async fn list_by_product(&self, product_sku: &str) -> DbResult<Vec<Kit>> {
        let rows: Vec<KitRow> = sqlx::query_as(
            r#"
            SELECT k.id, k.sku, k.name
            FROM kits k
            WHERE EXISTS (
                SELECT 1 FROM kit_line_items li
                WHERE li.kit_id = k.id AND li.product_sku = ?
            )
            ORDER BY k.rowid
            "#,
        )
        .bind(product_sku)
        .fetch_all(&self.pool)
        .await?;

        self.attach_line_items(rows).await
    }

    async fn get_by_id(&self, id: &str) -> DbResult<Kit> {
        let row: Option<KitRow> = sqlx::query_as("SELECT id, sku, name FROM kits WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        self.load_one(row, id).await
    }

    async fn get_by_sku(&self, sku: &str) -> DbResult<Kit> {
        let row: Option<KitRow> = sqlx::query_as("SELECT id, sku, name FROM kits WHERE sku = ?")
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?;

        self.load_one(row, sku).await
    }

    /// Inserts the kit row and all its line items atomically.
    ///
    /// ## Returns
    /// * `Ok(id)` - Generated UUID of the stored kit
    /// * `Err(DbError::UniqueViolation)` - SKU already exists
    /// * `Err(DbError::ForeignKeyViolation)` - A line item names an unknown product
    async fn add(&self, kit: &Kit) -> DbResult<String> {
        if let Some(id) = kit.id() {
            return Err(CoreError::identity_assigned("Kit", id).into());
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(sku = %kit.sku(), lines = kit.line_items().len(), "Inserting kit");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO kits (id, sku, name, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(kit.sku())
        .bind(kit.name())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::from(e).with_duplicate("sku", kit.sku()))?;

        insert_line_items(&mut tx, &id, kit.line_items()).await?;

        tx.commit().await?;

        Ok(id)
    }

    async fn remove(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting kit");

        let result = sqlx::query("DELETE FROM kits WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Kit", id));
        }

        Ok(())
    }

    /// Replaces name and line items in one transaction.
    async fn update(&self, kit: &Kit) -> DbResult<()> {
        let id = kit.id().ok_or_else(|| DbError::Unidentified {
            entity: "Kit".to_string(),
        })?;

        debug!(id = %id, lines = kit.line_items().len(), "Updating kit");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE kits SET name = ?, updated_at = ? WHERE id = ?")
            .bind(kit.name())
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Err(DbError::not_found("Kit", id));
        }

        sqlx::query("DELETE FROM kit_line_items WHERE kit_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_line_items(&mut tx, id, kit.line_items()).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kits")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
