//! # Product Commands
//!
//! ```text
//! CreateProductInput ──► ProductDetails ──► ProductsService::create_product
//!                                                    │
//!                                                    ▼
//!                                   ProductDto { id, sku, name, cost, ... }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;
use kitstock_core::{Product, ProductDetails, ProductUpdate};

/// Product as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub cost: f64,
    pub price: f64,
    pub inventory_quantity: u32,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id().unwrap_or_default().to_string(),
            sku: p.sku().to_string(),
            name: p.name().to_string(),
            cost: p.cost(),
            price: p.price(),
            inventory_quantity: p.inventory_quantity(),
        }
    }
}

/// Input of [`create_product`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    pub name: String,
    pub sku: String,
    pub cost: f64,
    pub price: f64,
    pub inventory_quantity: u32,
}

impl From<CreateProductInput> for ProductDetails {
    fn from(input: CreateProductInput) -> Self {
        ProductDetails {
            name: input.name.trim().to_string(),
            sku: input.sku.trim().to_string(),
            cost: input.cost,
            price: input.price,
            inventory_quantity: input.inventory_quantity,
        }
    }
}

/// Input of [`update_product`]. The SKU cannot be changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    pub name: String,
    pub cost: f64,
    pub price: f64,
    pub inventory_quantity: u32,
}

impl From<UpdateProductInput> for ProductUpdate {
    fn from(input: UpdateProductInput) -> Self {
        ProductUpdate {
            name: input.name.trim().to_string(),
            cost: input.cost,
            price: input.price,
            inventory_quantity: input.inventory_quantity,
        }
    }
}

pub async fn list_products(state: &AppState) -> Result<Vec<ProductDto>, ApiError> {
    debug!("list_products command");
    let products = state.products().list_products().await?;
    Ok(products.into_iter().map(ProductDto::from).collect())
}

pub async fn get_product(state: &AppState, id: &str) -> Result<ProductDto, ApiError> {
    debug!(id = %id, "get_product command");
    Ok(state.products().get_product(id).await?.into())
}

pub async fn get_product_by_sku(state: &AppState, sku: &str) -> Result<ProductDto, ApiError> {
    debug!(sku = %sku, "get_product_by_sku command");
    Ok(state.products().get_product_by_sku(sku).await?.into())
}

pub async fn create_product(
    state: &AppState,
    input: CreateProductInput,
) -> Result<ProductDto, ApiError> {
    debug!(sku = %input.sku, "create_product command");
    Ok(state.products().create_product(input.into()).await?.into())
}

pub async fn update_product(
    state: &AppState,
    id: &str,
    input: UpdateProductInput,
) -> Result<ProductDto, ApiError> {
    debug!(id = %id, "update_product command");
    Ok(state.products().update_product(id, input.into()).await?.into())
}

/// Removes a product; fails with `PRODUCT_IN_USE` while a kit lists it.
pub async fn remove_product(state: &AppState, id: &str) -> Result<(), ApiError> {
    debug!(id = %id, "remove_product command");
    state.products().remove_product(id).await?;
    Ok(())
}
