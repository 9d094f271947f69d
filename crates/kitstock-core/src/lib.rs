//! # kitstock-core: Pure Catalog Logic for Kitstock
//!
//! This crate is the **heart** of Kitstock. It holds the catalog entities and
//! the kit calculation engine as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kitstock Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    kitstock CLI / commands                      │   │
//! │  │    product add, kit add, kit calculate, ...                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Services (apps/kitstock)                     │   │
//! │  │    ProductsService, KitsService, CalculatedKitsService          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kitstock-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌──────────────┐  ┌───────────┐               │   │
//! │  │   │   types   │  │ calculation  │  │ validation│               │   │
//! │  │   │  Product  │  │ CalculatedKit│  │   rules   │               │   │
//! │  │   │    Kit    │  │  discounts   │  │  checks   │               │   │
//! │  │   └───────────┘  └──────────────┘  └───────────┘               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 kitstock-db (Repository Layer)                  │   │
//! │  │          repository traits, SQLite and in-memory backends       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Product, Kit, KitLineItem)
//! - [`calculation`] - The kit calculation engine ([`CalculatedKit`])
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation used by the orchestration layer
//!
//! ## Example Usage
//!
//! ```rust
//! use kitstock_core::{CalculatedKit, Kit, KitLineItem, Product, ProductDetails};
//!
//! let controller = Product::new(ProductDetails {
//!     name: "DualSense Controller".to_string(),
//!     sku: "PS5-PAD".to_string(),
//!     cost: 20.0,
//!     price: 100.0,
//!     inventory_quantity: 10,
//! });
//!
//! let kit = Kit::new(
//!     "Two Player Pack",
//!     "PACK-2P",
//!     vec![KitLineItem::new("PS5-PAD", 2, 10.0)],
//! );
//!
//! let calculated = CalculatedKit::new(kit, &[controller]).unwrap();
//! assert_eq!(calculated.cost(), 40.0);
//! assert_eq!(calculated.price(), 180.0);
//! assert_eq!(calculated.inventory_quantity(), 5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculation;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kitstock_core::Kit` instead of
// `use kitstock_core::types::Kit`

pub use calculation::{apply_discount, CalculatedKit};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a SKU.
pub const MAX_SKU_LENGTH: usize = 50;

/// Maximum length of a product or kit name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Upper bound of a line item discount, in percent.
pub const MAX_DISCOUNT_PERCENTAGE: f64 = 100.0;
