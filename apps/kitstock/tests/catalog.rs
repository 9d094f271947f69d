//! End-to-end catalog flows through the command layer, against both the
//! in-memory repositories and an in-memory SQLite database.

use std::sync::Arc;

use clap::Parser;
use kitstock::cli::{self, Cli};
use kitstock::commands::kit::{self, CreateKitInput, KitLineItemDto, UpdateKitInput};
use kitstock::commands::product::{self, CreateProductInput, UpdateProductInput};
use kitstock::{AppState, ErrorCode};
use kitstock_db::{Database, DbConfig, InMemoryKitRepository, InMemoryProductRepository};

fn in_memory_state() -> AppState {
    AppState::from_repositories(
        Arc::new(InMemoryProductRepository::new()),
        Arc::new(InMemoryKitRepository::new()),
    )
}

async fn sqlite_state() -> AppState {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    AppState::new(&db)
}

fn product_input(name: &str, sku: &str, cost: f64, price: f64, inventory: u32) -> CreateProductInput {
    CreateProductInput {
        name: name.to_string(),
        sku: sku.to_string(),
        cost,
        price,
        inventory_quantity: inventory,
    }
}

fn line(sku: &str, quantity: u32, discount_percentage: f64) -> KitLineItemDto {
    KitLineItemDto {
        product_sku: sku.to_string(),
        quantity,
        discount_percentage,
    }
}

/// Two games and the "Sony Pack I" kit bundling them. Returns the kit id.
async fn seed_sony_pack(state: &AppState) -> String {
    product::create_product(
        state,
        product_input("The Last of Us Part II", "AHJU-49685", 10.0, 220.0, 150),
    )
    .await
    .unwrap();
    product::create_product(
        state,
        product_input("Ghost of Tsushima", "AHJU-49621", 20.0, 100.0, 9),
    )
    .await
    .unwrap();

    kit::create_kit(
        state,
        CreateKitInput {
            name: "Sony Pack I".to_string(),
            sku: "FASF-123".to_string(),
            line_items: vec![line("AHJU-49685", 1, 10.0), line("AHJU-49621", 2, 15.0)],
        },
    )
    .await
    .unwrap()
    .id
}

async fn calculates_sony_pack(state: AppState) {
    let kit_id = seed_sony_pack(&state).await;

    let calculated = kit::calculate_kit(&state, &kit_id).await.unwrap();

    // cost: 10*1 + 20*2; price: 220*0.9 + 200*0.85; inventory: min(150/1, 9/2)
    assert_eq!(calculated.cost, 50.0);
    assert!((calculated.price - 368.0).abs() < 1e-9);
    assert_eq!(calculated.inventory_quantity, 4);
    assert_eq!(calculated.sku, "FASF-123");
    assert_eq!(calculated.line_items.len(), 2);
}

async fn blocks_removal_of_product_in_use(state: AppState) {
    let kit_id = seed_sony_pack(&state).await;
    let used = product::get_product_by_sku(&state, "AHJU-49685").await.unwrap();
    let unused = product::create_product(&state, product_input("Returnal", "HOU-1", 5.0, 60.0, 3))
        .await
        .unwrap();

    let err = product::remove_product(&state, &used.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductInUse);
    assert!(product::get_product(&state, &used.id).await.is_ok());

    product::remove_product(&state, &unused.id).await.unwrap();
    assert_eq!(
        product::get_product(&state, &unused.id).await.unwrap_err().code,
        ErrorCode::NotFound
    );

    // Once the kit is gone the product is free
    kit::remove_kit(&state, &kit_id).await.unwrap();
    product::remove_product(&state, &used.id).await.unwrap();
}

async fn rejects_duplicate_skus(state: AppState) {
    seed_sony_pack(&state).await;

    let err = product::create_product(
        &state,
        product_input("Impostor", "AHJU-49685", 1.0, 1.0, 1),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateKey);

    let original = product::get_product_by_sku(&state, "AHJU-49685").await.unwrap();
    assert_eq!(original.name, "The Last of Us Part II");
    assert_eq!(original.price, 220.0);
    assert_eq!(product::list_products(&state).await.unwrap().len(), 2);

    let err = kit::create_kit(
        &state,
        CreateKitInput {
            name: "Sony Pack Copy".to_string(),
            sku: "FASF-123".to_string(),
            line_items: vec![line("AHJU-49685", 1, 0.0)],
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateKey);
    assert_eq!(kit::get_kit_by_sku(&state, "FASF-123").await.unwrap().name, "Sony Pack I");
}

async fn updates_flow_into_calculation(state: AppState) {
    let kit_id = seed_sony_pack(&state).await;
    let game = product::get_product_by_sku(&state, "AHJU-49621").await.unwrap();

    product::update_product(
        &state,
        &game.id,
        UpdateProductInput {
            name: "Ghost of Tsushima Director's Cut".to_string(),
            cost: 20.0,
            price: 100.0,
            inventory_quantity: 0,
        },
    )
    .await
    .unwrap();
    assert_eq!(kit::calculate_kit(&state, &kit_id).await.unwrap().inventory_quantity, 0);

    kit::update_kit(
        &state,
        &kit_id,
        UpdateKitInput {
            name: "Sony Pack Solo".to_string(),
            line_items: vec![line("AHJU-49685", 3, 0.0)],
        },
    )
    .await
    .unwrap();

    let calculated = kit::calculate_kit(&state, &kit_id).await.unwrap();
    assert_eq!(calculated.name, "Sony Pack Solo");
    assert_eq!(calculated.cost, 30.0);
    assert_eq!(calculated.price, 660.0);
    assert_eq!(calculated.inventory_quantity, 50);
}

async fn validates_input(state: AppState) {
    let err = product::create_product(&state, product_input("", "AHJU-1", 1.0, 1.0, 1))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    product::create_product(&state, product_input("Game", "AHJU-1", 1.0, 1.0, 1))
        .await
        .unwrap();

    for line_items in [
        Vec::new(),
        vec![line("AHJU-1", 0, 0.0)],
        vec![line("AHJU-1", 1, 150.0)],
    ] {
        let err = kit::create_kit(
            &state,
            CreateKitInput {
                name: "Bad".to_string(),
                sku: "BAD-1".to_string(),
                line_items,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    let err = kit::create_kit(
        &state,
        CreateKitInput {
            name: "Ghost".to_string(),
            sku: "GHOST-1".to_string(),
            line_items: vec![line("NOPE-1", 1, 0.0)],
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert!(kit::list_kits(&state).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_calculates_sony_pack() {
    calculates_sony_pack(in_memory_state()).await;
    calculates_sony_pack(sqlite_state().await).await;
}

#[tokio::test]
async fn test_blocks_removal_of_product_in_use() {
    blocks_removal_of_product_in_use(in_memory_state()).await;
    blocks_removal_of_product_in_use(sqlite_state().await).await;
}

#[tokio::test]
async fn test_rejects_duplicate_skus() {
    rejects_duplicate_skus(in_memory_state()).await;
    rejects_duplicate_skus(sqlite_state().await).await;
}

#[tokio::test]
async fn test_updates_flow_into_calculation() {
    updates_flow_into_calculation(in_memory_state()).await;
    updates_flow_into_calculation(sqlite_state().await).await;
}

#[tokio::test]
async fn test_validates_input() {
    validates_input(in_memory_state()).await;
    validates_input(sqlite_state().await).await;
}

#[tokio::test]
async fn test_unknown_kit_calculation_is_not_found() {
    let state = in_memory_state();

    let err = kit::calculate_kit(&state, "404").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(err.message, "Kit not found: 404");
}

#[tokio::test]
async fn test_cli_calculates_kit_as_json() {
    let state = sqlite_state().await;

    for args in [
        vec!["kitstock", "product", "add", "--name", "The Last of Us Part II", "--sku", "AHJU-49685",
             "--cost", "10", "--price", "220", "--inventory", "150"],
        vec!["kitstock", "product", "add", "--name", "Ghost of Tsushima", "--sku", "AHJU-49621",
             "--cost", "20", "--price", "100", "--inventory", "9"],
        vec!["kitstock", "kit", "add", "--name", "Sony Pack I", "--sku", "FASF-123",
             "--item", "AHJU-49685:1:10", "--item", "AHJU-49621:2:15"],
    ] {
        cli::execute(&state, Cli::try_parse_from(args).unwrap().command)
            .await
            .unwrap();
    }

    let kit = cli::execute(
        &state,
        Cli::try_parse_from(["kitstock", "kit", "get", "FASF-123", "--sku"]).unwrap().command,
    )
    .await
    .unwrap();
    let id = kit["id"].as_str().unwrap().to_string();

    let output = cli::execute(
        &state,
        Cli::try_parse_from(["kitstock", "kit", "calculate", id.as_str()]).unwrap().command,
    )
    .await
    .unwrap();

    assert_eq!(output["sku"], "FASF-123");
    assert_eq!(output["cost"], 50.0);
    assert_eq!(output["inventoryQuantity"], 4);
    assert_eq!(output["lineItems"][1]["discountPercentage"], 15.0);

    let product = cli::execute(
        &state,
        Cli::try_parse_from(["kitstock", "product", "get", "AHJU-49685", "--sku"]).unwrap().command,
    )
    .await
    .unwrap();
    let product_id = product["id"].as_str().unwrap().to_string();
    let err = cli::execute(
        &state,
        Cli::try_parse_from(["kitstock", "product", "remove", product_id.as_str()]).unwrap().command,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductInUse);
}
