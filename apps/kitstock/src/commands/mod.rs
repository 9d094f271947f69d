//! # Commands
//!
//! Presentation layer over the services. Each command takes `&AppState`,
//! converts DTO input into domain types, and returns camelCase DTOs or an
//! [`ApiError`](crate::error::ApiError).
//!
//! ## Available Commands
//!
//! | Module | Commands |
//! |--------|----------|
//! | [`product`] | `list_products`, `get_product`, `get_product_by_sku`, `create_product`, `update_product`, `remove_product` |
//! | [`kit`] | `list_kits`, `get_kit`, `get_kit_by_sku`, `create_kit`, `update_kit`, `remove_kit`, `calculate_kit` |

pub mod kit;
pub mod product;
