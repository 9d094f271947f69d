//! # Kit Calculation Engine
//!
//! Derives a kit's aggregate cost, discounted price and sellable quantity from
//! its line items and the products they reference.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CalculatedKit::new(kit, products)                    │
//! │                                                                         │
//! │  for each line item (in kit order)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  find product with line.product_sku ──► none? MissingLineItemProduct   │
//! │       │                                                                 │
//! │       ├──► cost  += product.cost  × quantity                           │
//! │       ├──► price += apply_discount(product.price × quantity, discount) │
//! │       └──► stock  = min(stock, product.inventory_quantity / quantity)  │
//! │                     (seeded by the first line item)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CalculatedKit { kit, cost, price, inventory_quantity }  (read-only)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Worked Example
//! ```text
//! Products: A (cost 20, price 100, stock 10)   B (cost 10, price 50, stock 50)
//! Lines:    A × 2 at 10% off                   B × 1 at 0% off
//!
//! cost  = 20×2 + 10×1                    = 50.00
//! price = (100×2)×0.90 + (50×1)×1.00     = 230.00
//! stock = min(10 / 2, 50 / 1) = min(5, 50) = 5 kits
//! ```
//!
//! No I/O and no shared state; inputs are never mutated.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Kit, KitLineItem, Product};

/// Removes `discount_percentage` percent from `amount`.
///
/// ## Example
/// ```rust
/// use kitstock_core::apply_discount;
///
/// assert_eq!(apply_discount(200.0, 10.0), 180.0);
/// assert_eq!(apply_discount(50.0, 0.0), 50.0);
/// ```
#[inline]
pub fn apply_discount(amount: f64, discount_percentage: f64) -> f64 {
    amount - (amount * discount_percentage / 100.0)
}

/// Read-only view of a kit with its derived cost, price and stock.
///
/// All values are computed once in [`CalculatedKit::new`]; every read of the
/// same instance returns the same numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatedKit {
    kit: Kit,
    cost: f64,
    price: f64,
    inventory_quantity: u32,
}

impl CalculatedKit {
    /// Calculates a kit against the products its line items reference.
    ///
    /// `products` must hold one product per distinct SKU used by the kit.
    /// Extra products are ignored; if a SKU appears twice, the first product
    /// with that SKU is used.
    ///
    /// ## Errors
    /// - `CoreError::MissingLineItemProduct` when a line item's SKU has no
    ///   matching product. Nothing is computed in that case.
    /// - `CoreError::Validation(MustBePositive)` when a line item has a zero
    ///   quantity, which would make the stock division undefined.
    ///
    /// ## Empty Kits
    /// A kit without line items costs 0.0, sells for 0.0 and has no sellable
    /// stock. The services refuse to store such kits.
    pub fn new(kit: Kit, products: &[Product]) -> CoreResult<Self> {
        let mut by_sku: HashMap<&str, &Product> = HashMap::with_capacity(products.len());
        for product in products {
            by_sku.entry(product.sku()).or_insert(product);
        }

        let mut cost = 0.0;
        let mut price = 0.0;
        let mut inventory_quantity: Option<u32> = None;

        for item in kit.line_items() {
            let product = by_sku.get(item.product_sku()).ok_or_else(|| {
                CoreError::MissingLineItemProduct {
                    kit_sku: kit.sku().to_string(),
                    product_sku: item.product_sku().to_string(),
                }
            })?;

            cost += line_cost(product, item);
            price += line_price(product, item);

            let assemblable = line_inventory(product, item)?;
            inventory_quantity = Some(match inventory_quantity {
                Some(current) => current.min(assemblable),
                None => assemblable,
            });
        }

        Ok(CalculatedKit {
            kit,
            cost,
            price,
            inventory_quantity: inventory_quantity.unwrap_or(0),
        })
    }

    /// The underlying kit.
    #[inline]
    pub fn kit(&self) -> &Kit {
        &self.kit
    }

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.kit.id()
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.kit.name()
    }

    #[inline]
    pub fn sku(&self) -> &str {
        self.kit.sku()
    }

    #[inline]
    pub fn line_items(&self) -> &[KitLineItem] {
        self.kit.line_items()
    }

    /// Sum of product cost × quantity over all line items (no discount).
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Sum of discounted product price × quantity over all line items.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Number of complete kits the current stock can assemble.
    #[inline]
    pub fn inventory_quantity(&self) -> u32 {
        self.inventory_quantity
    }
}

#[inline]
fn line_cost(product: &Product, item: &KitLineItem) -> f64 {
    product.cost() * f64::from(item.quantity())
}

#[inline]
fn line_price(product: &Product, item: &KitLineItem) -> f64 {
    apply_discount(
        product.price() * f64::from(item.quantity()),
        item.discount_percentage(),
    )
}

/// Complete kits this line's product stock can supply (truncating division).
fn line_inventory(product: &Product, item: &KitLineItem) -> CoreResult<u32> {
    product
        .inventory_quantity()
        .checked_div(item.quantity())
        .ok_or_else(|| {
            ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into()
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
