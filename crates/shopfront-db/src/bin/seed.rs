//! # Seed Data Generator
//!
//! Populates the database with catalog products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p shopfront-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p shopfront-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p shopfront-db --bin seed -- --db ./data/shopfront.db
//! ```
//!
//! ## Generated Products
//! Every product passes catalog validation:
//! - Name: `{base} {variant}`, 4 to 100 characters
//! - Description / details: 10 to 100 / 200 characters
//! - Price: $2.99 - $83.99
//! - Stock: 1 - 40 (never zero, a zero-stock product is not listed)

use shopfront_core::{Product, UNSAVED_ID};
use shopfront_db::{Database, DbConfig};
use std::env;

/// Base product names with a short description each.
const CATALOG: &[(&str, &str)] = &[
    ("Desk Lamp", "Adjustable arm with a warm LED head"),
    ("Floor Lamp", "Tall reading lamp with a linen shade"),
    ("Ceramic Mug", "Stoneware mug, safe for the dishwasher"),
    ("Teapot", "Cast iron teapot with a steel infuser"),
    ("Notebook", "Dot grid pages with a lay-flat binding"),
    ("Fountain Pen", "Medium nib pen with a converter"),
    ("Backpack", "Water resistant pack with a laptop sleeve"),
    ("Wool Scarf", "Merino scarf woven in a herringbone"),
    ("Cutting Board", "End grain walnut board with feet"),
    ("Chef Knife", "Eight inch blade in high carbon steel"),
];

/// Variants appended to each base name, with a price addon in cents.
const VARIANTS: &[(&str, i64)] = &[
    ("Classic", 0),
    ("Mini", -200),
    ("Large", 1500),
    ("Deluxe", 3000),
    ("Travel", 500),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./shopfront_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shopfront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./shopfront_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Shopfront Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let products = db.products();
    let mut generated = 0;

    for seed in 0..count {
        let product = generate_product(seed);

        if let Err(e) = products.save(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }

        generated += 1;
        if generated % 50 == 0 {
            println!("  Generated {} products...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Generates a single product; names repeat with a batch suffix once the
/// base/variant combinations run out.
fn generate_product(seed: usize) -> Product {
    let (base, description) = CATALOG[seed % CATALOG.len()];
    let (variant, addon) = VARIANTS[(seed / CATALOG.len()) % VARIANTS.len()];
    let batch = seed / (CATALOG.len() * VARIANTS.len());

    let name = if batch == 0 {
        format!("{} {}", base, variant)
    } else {
        format!("{} {} #{}", base, variant, batch + 1)
    };

    // $4.99 - $54.99 base, plus the variant addon
    let price_cents = 499 + ((seed * 37) % 50) as i64 * 100 + addon;

    Product {
        id: UNSAVED_ID,
        name,
        description: description.to_string(),
        details: format!("{} edition of our {}. Ships in recycled packaging.", variant, base.to_lowercase()),
        price_cents,
        quantity: 1 + (seed % 40) as i64,
    }
}
