//! Kit use cases.
//!
//! Every line item of a created or updated kit must name an existing
//! product; the check runs here, not in `Kit`.

use std::sync::Arc;

use kitstock_core::validation::{validate_line_items, validate_name, validate_sku};
use kitstock_core::{Kit, KitLineItem, KitUpdate};
use kitstock_db::{DbError, KitRepository, ProductRepository};
use tracing::{debug, info, warn};

use super::ServiceResult;

/// Kit CRUD with line item validation.
#[derive(Clone)]
pub struct KitsService {
    kits: Arc<dyn KitRepository>,
    products: Arc<dyn ProductRepository>,
}

impl KitsService {
    pub fn new(kits: Arc<dyn KitRepository>, products: Arc<dyn ProductRepository>) -> Self {
        KitsService { kits, products }
    }

    /// Fails with `DbError::NotFound` for the first line item whose SKU has no product.
    async fn ensure_products_exist(&self, line_items: &[KitLineItem]) -> ServiceResult<()> {
        for item in line_items {
            self.products.get_by_sku(item.product_sku()).await?;
        }

        debug!(lines = line_items.len(), "Kit line items reference existing products");
        Ok(())
    }

    /// Turns a storage foreign key failure into the `NotFound` of the product
    /// that disappeared after [`Self::ensure_products_exist`].
    async fn missing_product(&self, err: DbError, line_items: &[KitLineItem]) -> DbError {
        if !matches!(err, DbError::ForeignKeyViolation { .. }) {
            return err;
        }

        let skus: Vec<String> = line_items.iter().map(|i| i.product_sku().to_string()).collect();
        let found = match self.products.list_by_skus(&skus).await {
            Ok(found) => found,
            Err(_) => return err,
        };

        match skus.iter().find(|sku| !found.iter().any(|p| p.sku() == sku.as_str())) {
            Some(sku) => {
                warn!(sku = %sku, "Product removed while its kit was being stored");
                DbError::not_found("Product", sku.as_str())
            }
            None => err,
        }
    }

    /// Validates and stores a kit built with [`Kit::new`], returning it with its identity.
    pub async fn create_kit(&self, mut kit: Kit) -> ServiceResult<Kit> {
        validate_name(kit.name())?;
        validate_sku(kit.sku())?;
        validate_line_items(kit.line_items())?;
        self.ensure_products_exist(kit.line_items()).await?;

        let id = match self.kits.add(&kit).await {
            Ok(id) => id,
            Err(e) => return Err(self.missing_product(e, kit.line_items()).await.into()),
        };
        kit.define_id(id)?;

        info!(id = ?kit.id(), sku = %kit.sku(), "Kit created");
        Ok(kit)
    }

    pub async fn list_kits(&self) -> ServiceResult<Vec<Kit>> {
        Ok(self.kits.list().await?)
    }

    pub async fn get_kit(&self, id: &str) -> ServiceResult<Kit> {
        Ok(self.kits.get_by_id(id).await?)
    }

    pub async fn get_kit_by_sku(&self, sku: &str) -> ServiceResult<Kit> {
        Ok(self.kits.get_by_sku(sku).await?)
    }

    /// Replaces the name and the whole line item list of an existing kit.
    pub async fn update_kit(&self, id: &str, update: KitUpdate) -> ServiceResult<Kit> {
        validate_name(&update.name)?;
        validate_line_items(&update.line_items)?;
        self.ensure_products_exist(&update.line_items).await?;

        let mut kit = self.kits.get_by_id(id).await?;
        kit.update_infos(update);
        if let Err(e) = self.kits.update(&kit).await {
            return Err(self.missing_product(e, kit.line_items()).await.into());
        }

        info!(id = %id, "Kit updated");
        Ok(kit)
    }

    pub async fn remove_kit(&self, id: &str) -> ServiceResult<()> {
        self.kits.remove(id).await?;

        info!(id = %id, "Kit removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use kitstock_core::{CoreError, Product, ProductDetails, ValidationError};
    use crate::services::test_support::StaleProductLookup;
    use kitstock_db::{Database, DbConfig, DbError, InMemoryKitRepository, InMemoryProductRepository};

    async fn service() -> KitsService {
        let products = Arc::new(InMemoryProductRepository::new());
        for sku in ["AHJU-49685", "AHJU-49621"] {
            products
                .add(&Product::new(ProductDetails {
                    name: "Game".to_string(),
                    sku: sku.to_string(),
                    cost: 10.0,
                    price: 220.0,
                    inventory_quantity: 150,
                }))
                .await
                .unwrap();
        }
        KitsService::new(Arc::new(InMemoryKitRepository::new()), products)
    }

    fn sony_pack() -> Kit {
        Kit::new(
            "Sony Pack I",
            "FASF-123",
            vec![
                KitLineItem::new("AHJU-49685", 1, 10.0),
                KitLineItem::new("AHJU-49621", 2, 15.0),
            ],
        )
    }

    #[tokio::test]
    async fn test_create_kit() {
        let service = service().await;

        let kit = service.create_kit(sony_pack()).await.unwrap();

        assert_eq!(kit.id(), Some("1"));
        assert_eq!(service.get_kit_by_sku("FASF-123").await.unwrap(), kit);
    }

    #[tokio::test]
    async fn test_create_kit_with_unknown_product_is_not_found() {
        let service = service().await;
        let kit = Kit::new("Broken", "BRK-1", vec![KitLineItem::new("NOPE-1", 1, 0.0)]);

        let err = service.create_kit(kit).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(service.list_kits().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_kit_without_line_items_is_rejected() {
        let service = service().await;

        let err = service.create_kit(Kit::new("Empty", "EMPTY-1", Vec::new())).await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Core(CoreError::Validation(ValidationError::Required { ref field }))
                if field == "line_items"
        ));
    }

    #[tokio::test]
    async fn test_create_kit_duplicate_sku() {
        let service = service().await;
        service.create_kit(sony_pack()).await.unwrap();

        let err = service.create_kit(sony_pack()).await.unwrap_err();

        assert!(matches!(err, ServiceError::Db(DbError::UniqueViolation { .. })));
        assert_eq!(service.list_kits().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_kit_replaces_line_items() {
        let service = service().await;
        service.create_kit(sony_pack()).await.unwrap();

        let updated = service
            .update_kit(
                "1",
                KitUpdate {
                    name: "Sony Pack II".to_string(),
                    line_items: vec![KitLineItem::new("AHJU-49621", 3, 20.0)],
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.sku(), "FASF-123");
        assert_eq!(service.get_kit("1").await.unwrap().line_items().len(), 1);

        let err = service
            .update_kit(
                "1",
                KitUpdate {
                    name: "Sony Pack III".to_string(),
                    line_items: vec![KitLineItem::new("NOPE-1", 1, 0.0)],
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.get_kit("1").await.unwrap().name(), "Sony Pack II");
    }

    #[tokio::test]
    async fn test_remove_kit() {
        let service = service().await;
        service.create_kit(sony_pack()).await.unwrap();

        service.remove_kit("1").await.unwrap();

        assert!(service.get_kit("1").await.unwrap_err().is_not_found());
    }

    async fn sqlite_service_with_stale_lookup() -> (Database, KitsService) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
            .add(&Product::new(ProductDetails {
                name: "The Last of Us Part II".to_string(),
                sku: "AHJU-49685".to_string(),
                cost: 10.0,
                price: 220.0,
                inventory_quantity: 150,
            }))
            .await
            .unwrap();
        let service = KitsService::new(
            Arc::new(db.kits()),
            Arc::new(StaleProductLookup(db.products())),
        );
        (db, service)
    }

    #[tokio::test]
    async fn test_product_gone_before_kit_insert_is_not_found() {
        let (db, service) = sqlite_service_with_stale_lookup().await;
        let kit = Kit::new(
            "Sony Pack I",
            "FASF-123",
            vec![
                KitLineItem::new("AHJU-49685", 1, 10.0),
                KitLineItem::new("AHJU-49621", 2, 15.0),
            ],
        );

        let err = service.create_kit(kit).await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Db(DbError::NotFound { ref entity, ref id }) if entity == "Product" && id == "AHJU-49621"
        ));
        assert_eq!(db.kits().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_product_gone_before_kit_update_is_not_found() {
        let (db, service) = sqlite_service_with_stale_lookup().await;
        let kit = service
            .create_kit(Kit::new(
                "Sony Pack I",
                "FASF-123",
                vec![KitLineItem::new("AHJU-49685", 1, 10.0)],
            ))
            .await
            .unwrap();
        let id = kit.id().unwrap();

        let err = service
            .update_kit(
                id,
                KitUpdate {
                    name: "Sony Pack II".to_string(),
                    line_items: vec![KitLineItem::new("AHJU-49621", 1, 0.0)],
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Db(DbError::NotFound { ref id, .. }) if id == "AHJU-49621"
        ));
        let stored = db.kits().get_by_id(id).await.unwrap();
        assert_eq!(stored.name(), "Sony Pack I");
        assert_eq!(stored.line_items().len(), 1);
    }
}
