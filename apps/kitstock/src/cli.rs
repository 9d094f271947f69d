//! CLI Argument Parsing
//!
//! `kitstock <product|kit> <action>`; every action prints JSON.
//!
//! ## Line Items
//!
//! Kit line items are passed as `--item SKU:QTY[:DISCOUNT]`, repeated once
//! per line, in kit order:
//!
//! ```text
//! kitstock kit add --name "Sony Pack I" --sku FASF-123 \
//!     --item AHJU-49685:1:10 --item AHJU-49621:2:15
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};

use crate::commands::kit::{self, CreateKitInput, KitLineItemDto, UpdateKitInput};
use crate::commands::product::{self, CreateProductInput, UpdateProductInput};
use crate::error::ApiError;
use crate::state::AppState;

/// Kitstock - product and kit catalog
#[derive(Parser, Debug)]
#[command(name = "kitstock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./kitstock.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Manage kits and calculate their price and availability
    Kit {
        #[command(subcommand)]
        action: KitAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductAction {
    /// List all products
    List,

    /// Show one product
    Get(Lookup),

    /// Create a product
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        sku: String,

        /// Unit acquisition cost
        #[arg(long)]
        cost: f64,

        /// Unit sale price
        #[arg(long)]
        price: f64,

        /// Units on hand
        #[arg(long, default_value_t = 0)]
        inventory: u32,
    },

    /// Replace name, cost, price and inventory of a product
    Update {
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        cost: f64,

        #[arg(long)]
        price: f64,

        #[arg(long)]
        inventory: u32,
    },

    /// Remove a product no kit uses
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum KitAction {
    /// List all kits
    List,

    /// Show one kit
    Get(Lookup),

    /// Create a kit
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        sku: String,

        /// Line item as SKU:QTY[:DISCOUNT]; repeat for each line
        #[arg(long = "item", value_name = "SKU:QTY[:DISCOUNT]", value_parser = parse_line_item)]
        items: Vec<KitLineItemDto>,
    },

    /// Replace the name and all line items of a kit
    Update {
        id: String,

        #[arg(long)]
        name: String,

        /// Line item as SKU:QTY[:DISCOUNT]; repeat for each line
        #[arg(long = "item", value_name = "SKU:QTY[:DISCOUNT]", value_parser = parse_line_item)]
        items: Vec<KitLineItemDto>,
    },

    /// Remove a kit
    Remove { id: String },

    /// Show a kit with its cost, price and available quantity
    Calculate { id: String },
}

/// Id or, with `--sku`, SKU of a record.
#[derive(Args, Debug)]
pub struct Lookup {
    /// Record id (or SKU with --sku)
    pub key: String,

    /// Treat KEY as a SKU
    #[arg(long)]
    pub sku: bool,
}

/// Parses `SKU:QTY[:DISCOUNT]`.
pub fn parse_line_item(raw: &str) -> Result<KitLineItemDto, String> {
    let parts: Vec<&str> = raw.split(':').collect();

    let (sku, quantity, discount) = match parts.as_slice() {
        [sku, quantity] => (*sku, *quantity, None),
        [sku, quantity, discount] => (*sku, *quantity, Some(*discount)),
        _ => return Err(format!("expected SKU:QTY[:DISCOUNT], got '{}'", raw)),
    };

    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity '{}'", quantity))?;

    let discount_percentage = match discount {
        Some(discount) => discount
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid discount '{}'", discount))?,
        None => 0.0,
    };

    Ok(KitLineItemDto {
        product_sku: sku.trim().to_string(),
        quantity,
        discount_percentage,
    })
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// Runs one parsed command against `state`, returning its JSON output.
pub async fn execute(state: &AppState, command: Command) -> Result<Value, ApiError> {
    match command {
        Command::Product { action } => execute_product(state, action).await,
        Command::Kit { action } => execute_kit(state, action).await,
    }
}

async fn execute_product(state: &AppState, action: ProductAction) -> Result<Value, ApiError> {
    match action {
        ProductAction::List => to_json(product::list_products(state).await?),
        ProductAction::Get(Lookup { key, sku: true }) => {
            to_json(product::get_product_by_sku(state, &key).await?)
        }
        ProductAction::Get(Lookup { key, sku: false }) => {
            to_json(product::get_product(state, &key).await?)
        }
        ProductAction::Add {
            name,
            sku,
            cost,
            price,
            inventory,
        } => {
            let input = CreateProductInput {
                name,
                sku,
                cost,
                price,
                inventory_quantity: inventory,
            };
            to_json(product::create_product(state, input).await?)
        }
        ProductAction::Update {
            id,
            name,
            cost,
            price,
            inventory,
        } => {
            let input = UpdateProductInput {
                name,
                cost,
                price,
                inventory_quantity: inventory,
            };
            to_json(product::update_product(state, &id, input).await?)
        }
        ProductAction::Remove { id } => {
            product::remove_product(state, &id).await?;
            Ok(json!({ "removed": id }))
        }
    }
}

async fn execute_kit(state: &AppState, action: KitAction) -> Result<Value, ApiError> {
    match action {
        KitAction::List => to_json(kit::list_kits(state).await?),
        KitAction::Get(Lookup { key, sku: true }) => to_json(kit::get_kit_by_sku(state, &key).await?),
        KitAction::Get(Lookup { key, sku: false }) => to_json(kit::get_kit(state, &key).await?),
        KitAction::Add { name, sku, items } => {
            let input = CreateKitInput {
                name,
                sku,
                line_items: items,
            };
            to_json(kit::create_kit(state, input).await?)
        }
        KitAction::Update { id, name, items } => {
            let input = UpdateKitInput {
                name,
                line_items: items,
            };
            to_json(kit::update_kit(state, &id, input).await?)
        }
        KitAction::Remove { id } => {
            kit::remove_kit(state, &id).await?;
            Ok(json!({ "removed": id }))
        }
        KitAction::Calculate { id } => to_json(kit::calculate_kit(state, &id).await?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_item() {
        assert_eq!(
            parse_line_item("AHJU-49685:2:15").unwrap(),
            KitLineItemDto {
                product_sku: "AHJU-49685".to_string(),
                quantity: 2,
                discount_percentage: 15.0,
            }
        );
        assert_eq!(parse_line_item("AHJU-49685:1").unwrap().discount_percentage, 0.0);

        assert!(parse_line_item("AHJU-49685").is_err());
        assert!(parse_line_item("AHJU-49685:two").is_err());
        assert!(parse_line_item("AHJU-49685:1:ten").is_err());
        assert!(parse_line_item("A:1:2:3").is_err());
    }

    #[test]
    fn test_cli_parse_kit_add() {
        let cli = Cli::try_parse_from([
            "kitstock",
            "kit",
            "add",
            "--name",
            "Sony Pack I",
            "--sku",
            "FASF-123",
            "--item",
            "AHJU-49685:1:10",
            "--item",
            "AHJU-49621:2:15",
        ])
        .unwrap();

        match cli.command {
            Command::Kit {
                action: KitAction::Add { name, sku, items },
            } => {
                assert_eq!(name, "Sony Pack I");
                assert_eq!(sku, "FASF-123");
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].quantity, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_global_config_and_lookup() {
        let cli =
            Cli::try_parse_from(["kitstock", "product", "get", "AHJU-49685", "--sku", "--config", "k.toml"])
                .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("k.toml")));
        assert!(matches!(
            cli.command,
            Command::Product {
                action: ProductAction::Get(Lookup { sku: true, .. })
            }
        ));
    }

    #[test]
    fn test_cli_rejects_bad_line_item() {
        assert!(Cli::try_parse_from([
            "kitstock", "kit", "add", "--name", "X", "--sku", "X-1", "--item", "X-1:zero"
        ])
        .is_err());
    }
}
