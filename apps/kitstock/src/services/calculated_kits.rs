//! Kit calculation use case.

use std::sync::Arc;

use kitstock_core::CalculatedKit;
use kitstock_db::{KitRepository, ProductRepository};
use tracing::debug;

use super::ServiceResult;

/// Builds [`CalculatedKit`] views from stored kits and products.
#[derive(Clone)]
pub struct CalculatedKitsService {
    kits: Arc<dyn KitRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CalculatedKitsService {
    pub fn new(kits: Arc<dyn KitRepository>, products: Arc<dyn ProductRepository>) -> Self {
        CalculatedKitsService { kits, products }
    }

    /// Fetches the kit, loads the products its line items name in one batch,
    /// and runs the calculation.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - unknown kit id
    /// * `CoreError::MissingLineItemProduct` - a referenced product no longer exists
    pub async fn calculate_kit(&self, id: &str) -> ServiceResult<CalculatedKit> {
        let kit = self.kits.get_by_id(id).await?;
        let products = self.products.list_by_skus(&kit.product_skus()).await?;

        let calculated = CalculatedKit::new(kit, &products)?;

        debug!(
            id = %id,
            cost = calculated.cost(),
            price = calculated.price(),
            inventory_quantity = calculated.inventory_quantity(),
            "Kit calculated"
        );
        Ok(calculated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use kitstock_core::{CoreError, Kit, KitLineItem, Product, ProductDetails};
    use kitstock_db::{InMemoryKitRepository, InMemoryProductRepository};

    fn product(sku: &str, cost: f64, price: f64, inventory_quantity: u32) -> Product {
        Product::new(ProductDetails {
            name: sku.to_string(),
            sku: sku.to_string(),
            cost,
            price,
            inventory_quantity,
        })
    }

    #[tokio::test]
    async fn test_calculate_kit() {
        let products = Arc::new(InMemoryProductRepository::new());
        let kits = Arc::new(InMemoryKitRepository::new());
        products.add(&product("A", 20.0, 100.0, 10)).await.unwrap();
        products.add(&product("B", 10.0, 50.0, 50)).await.unwrap();
        kits.add(&Kit::new(
            "Pack",
            "PACK-1",
            vec![KitLineItem::new("A", 2, 10.0), KitLineItem::new("B", 1, 0.0)],
        ))
        .await
        .unwrap();
        let service = CalculatedKitsService::new(kits, products);

        let calculated = service.calculate_kit("1").await.unwrap();

        assert_eq!(calculated.id(), Some("1"));
        assert_eq!(calculated.cost(), 50.0);
        assert_eq!(calculated.price(), 230.0);
        assert_eq!(calculated.inventory_quantity(), 5);
    }

    #[tokio::test]
    async fn test_calculate_kit_with_vanished_product() {
        let products = Arc::new(InMemoryProductRepository::new());
        let kits = Arc::new(InMemoryKitRepository::new());
        kits.add(&Kit::new("Pack", "PACK-1", vec![KitLineItem::new("GONE", 1, 0.0)]))
            .await
            .unwrap();
        let service = CalculatedKitsService::new(kits, products);

        let err = service.calculate_kit("1").await.unwrap_err();

        assert!(matches!(err, ServiceError::Core(CoreError::MissingLineItemProduct { .. })));
        assert!(service.calculate_kit("2").await.unwrap_err().is_not_found());
    }
}
