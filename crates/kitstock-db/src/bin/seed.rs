//! # Seed Data Generator
//!
//! Populates a database with a demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./kitstock_dev.db with 24 products and their bundles
//! cargo run -p kitstock-db --bin seed
//!
//! # Custom amount / path
//! cargo run -p kitstock-db --bin seed -- --count 60 --db ./data/kitstock.db
//! ```
//!
//! ## Generated Data
//! - Products: one per (title, platform) pair, SKU `{PLATFORM}-{INDEX:05}`
//! - Kits: each pair of consecutive products becomes a bundle `BNDL-{INDEX:04}`,
//!   one copy of the first and two of the second, at 10% and 15% off

use std::path::PathBuf;

use clap::Parser;
use kitstock_core::{Kit, KitLineItem, Product, ProductDetails};
use kitstock_db::{Database, DbConfig, KitRepository, ProductRepository};

/// Kitstock seed data generator
#[derive(Parser, Debug)]
#[command(name = "seed")]
struct SeedArgs {
    /// Number of products to generate
    #[arg(short, long, default_value_t = 24)]
    count: usize,

    /// Database file path
    #[arg(short, long, default_value = "./kitstock_dev.db")]
    db: PathBuf,
}

const TITLES: &[&str] = &[
    "The Last of Us Part II",
    "Ghost of Tsushima",
    "God of War Ragnarok",
    "Horizon Forbidden West",
    "Gran Turismo 7",
    "Returnal",
    "Demon's Souls",
    "Ratchet & Clank: Rift Apart",
    "Marvel's Spider-Man 2",
    "Astro Bot",
    "Death Stranding",
    "Bloodborne",
];

const PLATFORMS: &[&str] = &["PS5", "PS4", "PC"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let SeedArgs { count, db: db_path } = SeedArgs::parse();

    println!("🌱 Kitstock Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path.display());
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(db_path)).await?;
    let products = db.products();
    let kits = db.kits();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = products.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut skus = Vec::with_capacity(count);
    for seed in 0..count {
        let product = generate_product(seed);
        if let Err(e) = products.add(&product).await {
            eprintln!("Failed to insert {}: {}", product.sku(), e);
            continue;
        }
        skus.push(product.sku().to_string());
    }
    println!("✓ Generated {} products", skus.len());

    let mut bundles = 0;
    for (index, pair) in skus.chunks_exact(2).enumerate() {
        let kit = Kit::new(
            format!("Bundle #{}", index + 1),
            format!("BNDL-{:04}", index + 1),
            vec![
                KitLineItem::new(pair[0].as_str(), 1, 10.0),
                KitLineItem::new(pair[1].as_str(), 2, 15.0),
            ],
        );
        if let Err(e) = kits.add(&kit).await {
            eprintln!("Failed to insert {}: {}", kit.sku(), e);
            continue;
        }
        bundles += 1;
    }
    println!("✓ Generated {} kits", bundles);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Deterministic demo product for position `seed`.
fn generate_product(seed: usize) -> Product {
    let title = TITLES[seed % TITLES.len()];
    let platform = PLATFORMS[(seed / TITLES.len()) % PLATFORMS.len()];

    // Price 49.90 - 349.90, cost 20-40% of price
    let price = 49.9 + ((seed * 37) % 31) as f64 * 10.0;
    let cost = (price * (20 + (seed % 21)) as f64 / 100.0 * 100.0).round() / 100.0;

    Product::new(ProductDetails {
        name: format!("{} ({})", title, platform),
        sku: format!("{}-{:05}", platform, seed),
        cost,
        price,
        inventory_quantity: ((seed * 13) % 200) as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_args_defaults() {
        let args = SeedArgs::try_parse_from(["seed"]).unwrap();

        assert_eq!(args.count, 24);
        assert_eq!(args.db, PathBuf::from("./kitstock_dev.db"));
    }

    #[test]
    fn test_seed_args_reject_invalid_count() {
        assert!(SeedArgs::try_parse_from(["seed", "--count", "many"]).is_err());

        let args = SeedArgs::try_parse_from(["seed", "-c", "60", "-d", "/tmp/k.db"]).unwrap();
        assert_eq!(args.count, 60);
        assert_eq!(args.db, PathBuf::from("/tmp/k.db"));
    }

    #[test]
    fn test_generated_products_are_valid_and_unique() {
        let products: Vec<Product> = (0..72).map(generate_product).collect();

        for product in &products {
            assert!(product.cost() <= product.price());
            assert!(product.price() > 0.0);
        }
        let mut skus: Vec<&str> = products.iter().map(Product::sku).collect();
        skus.sort_unstable();
        skus.dedup();
        assert_eq!(skus.len(), 72);
    }
}
