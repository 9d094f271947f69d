//! # Domain Types
//!
//! The catalog entities used throughout Kitstock.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌──────────────────────────┐         │
//! │  │      Product        │          │           Kit            │         │
//! │  │  ─────────────────  │          │  ──────────────────────  │         │
//! │  │  id (define once)   │          │  id (define once)        │         │
//! │  │  sku (business key) │◄─────┐   │  sku (business key)      │         │
//! │  │  name               │      │   │  name                    │         │
//! │  │  cost, price        │      │   │  line_items ─────────┐   │         │
//! │  │  inventory_quantity │      │   └──────────────────────┼───┘         │
//! │  └─────────────────────┘      │                          ▼             │
//! │                               │   ┌──────────────────────────┐         │
//! │                               └───│       KitLineItem        │         │
//! │                                   │  product_sku             │         │
//! │                                   │  quantity                │         │
//! │                                   │  discount_percentage     │         │
//! │                                   └──────────────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: assigned by the repository on first persistence, never reassigned
//! - `sku`: human-readable business key, unique per entity type
//!
//! Fields are private. Identity assignment and field updates are each a single
//! call, so no caller ever observes a half-updated entity.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Assigns `id` to an empty identity slot.
fn define_identity(slot: &mut Option<String>, entity: &str, id: String) -> CoreResult<()> {
    if let Some(existing) = slot {
        return Err(CoreError::identity_assigned(entity, existing.as_str()));
    }
    *slot = Some(id);
    Ok(())
}

// =============================================================================
// Product
// =============================================================================

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: Option<String>,
    name: String,
    sku: String,
    cost: f64,
    price: f64,
    inventory_quantity: u32,
}

/// Business fields of a product, used to create one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub name: String,
    pub sku: String,
    /// Unit acquisition price.
    pub cost: f64,
    /// Unit sale price.
    pub price: f64,
    /// Units on hand.
    pub inventory_quantity: u32,
}

/// Replacement values for every mutable product field.
///
/// The SKU is the business key and is not part of an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub cost: f64,
    pub price: f64,
    pub inventory_quantity: u32,
}

impl Product {
    /// Creates a product that has not been persisted yet (no identity).
    pub fn new(details: ProductDetails) -> Self {
        Product {
            id: None,
            name: details.name,
            sku: details.sku,
            cost: details.cost,
            price: details.price,
            inventory_quantity: details.inventory_quantity,
        }
    }

    /// Rebuilds a persisted product.
    pub fn with_id(id: impl Into<String>, details: ProductDetails) -> Self {
        Product {
            id: Some(id.into()),
            ..Product::new(details)
        }
    }

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn sku(&self) -> &str {
        &self.sku
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[inline]
    pub fn inventory_quantity(&self) -> u32 {
        self.inventory_quantity
    }

    /// Records the identity assigned by a repository.
    ///
    /// ## Errors
    /// `CoreError::IdentityAlreadyAssigned` if the product already has an id;
    /// the existing id is kept.
    pub fn define_id(&mut self, id: impl Into<String>) -> CoreResult<()> {
        define_identity(&mut self.id, "Product", id.into())
    }

    /// Replaces name, cost, price and inventory quantity in one step.
    pub fn update_infos(&mut self, update: ProductUpdate) {
        self.name = update.name;
        self.cost = update.cost;
        self.price = update.price;
        self.inventory_quantity = update.inventory_quantity;
    }

    /// Returns the business fields of this product.
    pub fn details(&self) -> ProductDetails {
        ProductDetails {
            name: self.name.clone(),
            sku: self.sku.clone(),
            cost: self.cost,
            price: self.price,
            inventory_quantity: self.inventory_quantity,
        }
    }
}

// =============================================================================
// Kit Line Item
// =============================================================================

/// One entry of a kit's product list.
///
/// A value object: no identity, compared field by field, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitLineItem {
    product_sku: String,
    quantity: u32,
    discount_percentage: f64,
}

impl KitLineItem {
    /// Creates a line item.
    ///
    /// ## Arguments
    /// * `product_sku` - SKU of the referenced product
    /// * `quantity` - Units of that product per kit
    /// * `discount_percentage` - 0 to 100, applied to this line's price only
    pub fn new(product_sku: impl Into<String>, quantity: u32, discount_percentage: f64) -> Self {
        KitLineItem {
            product_sku: product_sku.into(),
            quantity,
            discount_percentage,
        }
    }

    #[inline]
    pub fn product_sku(&self) -> &str {
        &self.product_sku
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[inline]
    pub fn discount_percentage(&self) -> f64 {
        self.discount_percentage
    }
}

// =============================================================================
// Kit
// =============================================================================

/// A bundle of products sold together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kit {
    id: Option<String>,
    name: String,
    sku: String,
    line_items: Vec<KitLineItem>,
}

/// Replacement values for every mutable kit field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitUpdate {
    pub name: String,
    pub line_items: Vec<KitLineItem>,
}

impl Kit {
    /// Creates a kit that has not been persisted yet (no identity).
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        line_items: Vec<KitLineItem>,
    ) -> Self {
        Kit {
            id: None,
            name: name.into(),
            sku: sku.into(),
            line_items,
        }
    }

    /// Rebuilds a persisted kit.
    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        sku: impl Into<String>,
        line_items: Vec<KitLineItem>,
    ) -> Self {
        Kit {
            id: Some(id.into()),
            ..Kit::new(name, sku, line_items)
        }
    }

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn sku(&self) -> &str {
        &self.sku
    }

    #[inline]
    pub fn line_items(&self) -> &[KitLineItem] {
        &self.line_items
    }

    /// Records the identity assigned by a repository.
    ///
    /// ## Errors
    /// `CoreError::IdentityAlreadyAssigned` if the kit already has an id.
    pub fn define_id(&mut self, id: impl Into<String>) -> CoreResult<()> {
        define_identity(&mut self.id, "Kit", id.into())
    }

    /// Replaces the name and the whole line item list in one step.
    pub fn update_infos(&mut self, update: KitUpdate) {
        self.name = update.name;
        self.line_items = update.line_items;
    }

    /// SKUs referenced by the line items, first occurrence order, no repeats.
    pub fn product_skus(&self) -> Vec<String> {
        let mut skus: Vec<String> = Vec::with_capacity(self.line_items.len());
        for item in &self.line_items {
            if !skus.iter().any(|s| s == item.product_sku()) {
                skus.push(item.product_sku().to_string());
            }
        }
        skus
    }

    /// Checks whether any line item references `product_sku`.
    pub fn references(&self, product_sku: &str) -> bool {
        self.line_items
            .iter()
            .any(|item| item.product_sku() == product_sku)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ProductDetails {
        ProductDetails {
            name: "The Last of Us Part II".to_string(),
            sku: "AHJU-49685".to_string(),
            cost: 10.0,
            price: 220.0,
            inventory_quantity: 150,
        }
    }

    #[test]
    fn test_product_initialization_has_all_fields() {
        let product = Product::new(details());
        assert_eq!(product.id(), None);
        assert_eq!(product.name(), "The Last of Us Part II");
        assert_eq!(product.sku(), "AHJU-49685");
        assert_eq!(product.cost(), 10.0);
        assert_eq!(product.price(), 220.0);
        assert_eq!(product.inventory_quantity(), 150);
    }

    #[test]
    fn test_define_id_only_once() {
        let mut product = Product::new(details());
        product.define_id("1").unwrap();
        assert_eq!(product.id(), Some("1"));

        let err = product.define_id("2").unwrap_err();
        assert_eq!(err, CoreError::identity_assigned("Product", "1"));
        assert_eq!(product.id(), Some("1"));
    }

    #[test]
    fn test_define_id_rejected_on_rebuilt_entity() {
        let mut product = Product::with_id("abc", details());
        assert!(product.define_id("abc").is_err());

        let mut kit = Kit::with_id("k1", "Pack", "PACK-1", vec![]);
        assert!(matches!(
            kit.define_id("k2"),
            Err(CoreError::IdentityAlreadyAssigned { .. })
        ));
        assert_eq!(kit.id(), Some("k1"));
    }

    #[test]
    fn test_update_infos_replaces_all_mutable_fields() {
        let mut product = Product::with_id("1", details());
        product.update_infos(ProductUpdate {
            name: "The Last of Us Part I".to_string(),
            cost: 12.5,
            price: 199.9,
            inventory_quantity: 3,
        });

        assert_eq!(product.id(), Some("1"));
        assert_eq!(product.sku(), "AHJU-49685");
        assert_eq!(product.name(), "The Last of Us Part I");
        assert_eq!(product.cost(), 12.5);
        assert_eq!(product.price(), 199.9);
        assert_eq!(product.inventory_quantity(), 3);
    }

    #[test]
    fn test_kit_update_replaces_line_items() {
        let mut kit = Kit::new(
            "Sony Pack I",
            "FASF-123",
            vec![
                KitLineItem::new("AHJU-49685", 1, 10.0),
                KitLineItem::new("AHJU-49621", 2, 15.0),
            ],
        );
        kit.update_infos(KitUpdate {
            name: "Sony Pack II".to_string(),
            line_items: vec![KitLineItem::new("AHJU-49621", 3, 0.0)],
        });

        assert_eq!(kit.name(), "Sony Pack II");
        assert_eq!(kit.sku(), "FASF-123");
        assert_eq!(kit.line_items(), &[KitLineItem::new("AHJU-49621", 3, 0.0)]);
    }

    #[test]
    fn test_line_item_structural_equality() {
        assert_eq!(
            KitLineItem::new("A", 2, 10.0),
            KitLineItem::new("A", 2, 10.0)
        );
        assert_ne!(KitLineItem::new("A", 2, 10.0), KitLineItem::new("A", 2, 5.0));
    }

    #[test]
    fn test_product_skus_dedupes_in_order() {
        let kit = Kit::new(
            "Pack",
            "PACK",
            vec![
                KitLineItem::new("B", 1, 0.0),
                KitLineItem::new("A", 1, 0.0),
                KitLineItem::new("B", 2, 5.0),
            ],
        );
        assert_eq!(kit.product_skus(), vec!["B".to_string(), "A".to_string()]);
        assert!(kit.references("A"));
        assert!(!kit.references("C"));
    }

    #[test]
    fn test_product_serializes_with_snake_case_fields() {
        let json = serde_json::to_value(Product::with_id("9", details())).unwrap();
        assert_eq!(json["id"], "9");
        assert_eq!(json["inventory_quantity"], 150);
    }
}
