//! # Kit Commands
//!
//! Kit CRUD plus `calculate_kit`, which returns the kit with its derived
//! cost, price and available quantity.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;
use kitstock_core::{CalculatedKit, Kit, KitLineItem, KitUpdate};

/// One line of a kit, used for both input and output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitLineItemDto {
    pub product_sku: String,
    pub quantity: u32,
    #[serde(default)]
    pub discount_percentage: f64,
}

impl From<&KitLineItem> for KitLineItemDto {
    fn from(item: &KitLineItem) -> Self {
        KitLineItemDto {
            product_sku: item.product_sku().to_string(),
            quantity: item.quantity(),
            discount_percentage: item.discount_percentage(),
        }
    }
}

impl From<KitLineItemDto> for KitLineItem {
    fn from(dto: KitLineItemDto) -> Self {
        KitLineItem::new(dto.product_sku.trim(), dto.quantity, dto.discount_percentage)
    }
}

/// Kit as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitDto {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub line_items: Vec<KitLineItemDto>,
}

impl From<Kit> for KitDto {
    fn from(kit: Kit) -> Self {
        KitDto {
            id: kit.id().unwrap_or_default().to_string(),
            sku: kit.sku().to_string(),
            name: kit.name().to_string(),
            line_items: kit.line_items().iter().map(KitLineItemDto::from).collect(),
        }
    }
}

/// Kit with its derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedKitDto {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub line_items: Vec<KitLineItemDto>,
    pub cost: f64,
    pub price: f64,
    pub inventory_quantity: u32,
}

impl From<CalculatedKit> for CalculatedKitDto {
    fn from(calculated: CalculatedKit) -> Self {
        CalculatedKitDto {
            id: calculated.id().unwrap_or_default().to_string(),
            sku: calculated.sku().to_string(),
            name: calculated.name().to_string(),
            line_items: calculated.line_items().iter().map(KitLineItemDto::from).collect(),
            cost: calculated.cost(),
            price: calculated.price(),
            inventory_quantity: calculated.inventory_quantity(),
        }
    }
}

/// Input of [`create_kit`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKitInput {
    pub name: String,
    pub sku: String,
    pub line_items: Vec<KitLineItemDto>,
}

impl From<CreateKitInput> for Kit {
    fn from(input: CreateKitInput) -> Self {
        Kit::new(
            input.name.trim(),
            input.sku.trim(),
            input.line_items.into_iter().map(KitLineItem::from).collect(),
        )
    }
}

/// Input of [`update_kit`]. The SKU cannot be changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKitInput {
    pub name: String,
    pub line_items: Vec<KitLineItemDto>,
}

impl From<UpdateKitInput> for KitUpdate {
    fn from(input: UpdateKitInput) -> Self {
        KitUpdate {
            name: input.name.trim().to_string(),
            line_items: input.line_items.into_iter().map(KitLineItem::from).collect(),
        }
    }
}

pub async fn list_kits(state: &AppState) -> Result<Vec<KitDto>, ApiError> {
    debug!("list_kits command");
    let kits = state.kits().list_kits().await?;
    Ok(kits.into_iter().map(KitDto::from).collect())
}

pub async fn get_kit(state: &AppState, id: &str) -> Result<KitDto, ApiError> {
    debug!(id = %id, "get_kit command");
    Ok(state.kits().get_kit(id).await?.into())
}

pub async fn get_kit_by_sku(state: &AppState, sku: &str) -> Result<KitDto, ApiError> {
    debug!(sku = %sku, "get_kit_by_sku command");
    Ok(state.kits().get_kit_by_sku(sku).await?.into())
}

pub async fn create_kit(state: &AppState, input: CreateKitInput) -> Result<KitDto, ApiError> {
    debug!(sku = %input.sku, lines = input.line_items.len(), "create_kit command");
    Ok(state.kits().create_kit(input.into()).await?.into())
}

pub async fn update_kit(
    state: &AppState,
    id: &str,
    input: UpdateKitInput,
) -> Result<KitDto, ApiError> {
    debug!(id = %id, lines = input.line_items.len(), "update_kit command");
    Ok(state.kits().update_kit(id, input.into()).await?.into())
}

pub async fn remove_kit(state: &AppState, id: &str) -> Result<(), ApiError> {
    debug!(id = %id, "remove_kit command");
    state.kits().remove_kit(id).await?;
    Ok(())
}

/// Calculates cost, price and available quantity of a stored kit.
pub async fn calculate_kit(state: &AppState, id: &str) -> Result<CalculatedKitDto, ApiError> {
    let start = Instant::now();

    let calculated = state.calculated_kits().calculate_kit(id).await?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        id = %id,
        "calculate_kit complete"
    );
    Ok(calculated.into())
}
