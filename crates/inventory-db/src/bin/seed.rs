//! # Seed Data Generator
//!
//! Populates the inventory database with sample items for development.
//!
//! ## Usage
//! ```bash
//! # Insert 5 sample items into the configured database
//! cargo run -p inventory-db --bin seed
//!
//! # Start from an empty table and insert 20
//! cargo run -p inventory-db --bin seed -- --clear --count 20
//!
//! # Use a specific file and print the catalog afterwards
//! cargo run -p inventory-db --bin seed -- --db ./inventory_dev.db --list
//! ```
//!
//! ## Generated Items
//! Names cycle through a fixed catalog, the first being the "Silver Pen"
//! sample the app ships with. Repeated passes get a numeric suffix.

use inventory_core::{ItemForm, SaveOutcome};
use inventory_db::{Database, InventoryConfig};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// (product name, price, quantity, supplier, phone)
const CATALOG: &[(&str, &str, &str, &str, &str)] = &[
    ("Silver Pen", "19.95", "1", "Microsoft", "(360)514-1234"),
    ("Spiral Notebook", "3.49", "24", "Paper Works", "(206)555-0143"),
    ("Desk Stapler", "12.00", "6", "Office Depot", "(800)463-3768"),
    ("Sticky Notes", "4.25", "40", "3M", "(888)364-3577"),
    ("Highlighter Set", "6.99", "15", "Sharpie", "(800)346-3278"),
    ("Paper Clips", "1.50", "100", "", ""),
    ("Mechanical Pencil", "2.75", "30", "Pentel", "(310)320-3831"),
];

struct Args {
    db_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    count: usize,
    clear: bool,
    list: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(args) = parse_args() else {
        return Ok(());
    };

    let mut config = InventoryConfig::load_or_default(args.config_path);
    if let Some(path) = args.db_path {
        config.database.path = path;
    }

    init_logging(&config.logging.filter);

    println!("Inventory Seed Data Generator");
    println!("=============================");
    println!("Database: {}", config.database.path.display());
    println!("Items:    {}", args.count);
    println!();

    if let Some(parent) = config.database.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(config.to_db_config()).await?;
    let repo = db.inventory();

    println!("✓ Connected to database");
    println!("✓ Schema version {}", db.schema_version().await?);

    if args.clear {
        let removed = repo.delete_all().await?;
        println!("✓ Cleared {} existing items", removed);
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for index in 0..args.count {
        let form = sample_form(index);

        match repo.create(&form).await {
            Ok(SaveOutcome::Saved(id)) => {
                generated += 1;
                info!(%id, "Seeded item");
            }
            Ok(SaveOutcome::NothingToSave) => {}
            Err(e) => {
                warn!(error = %e, "Failed to insert sample item");
                eprintln!("Failed to insert item {}: {}", index, e);
            }
        }
    }

    println!();
    println!("✓ Generated {} items in {:?}", generated, start.elapsed());
    println!("  Table now holds {} items", repo.count().await?);

    if args.list {
        println!();
        for item in repo.list().await? {
            println!(
                "  #{:<4} {:<24} {:>8.2}  x{:<4} {} {}",
                item.id,
                item.product_name,
                item.price,
                item.quantity,
                item.supplier_name,
                item.supplier_phone
            );
        }
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Parses command line arguments. Returns `None` when help was printed.
fn parse_args() -> Option<Args> {
    let args: Vec<String> = env::args().collect();

    let mut parsed = Args {
        db_path: None,
        config_path: None,
        count: 5,
        clear: false,
        list: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    parsed.count = args[i + 1].parse().unwrap_or(5);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    parsed.db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    parsed.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--clear" => parsed.clear = true,
            "--list" | "-l" => parsed.list = true,
            "--help" | "-h" => {
                println!("Inventory Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>      Number of items to generate (default: 5)");
                println!("  -d, --db <PATH>      Database file path (default: from config)");
                println!("      --config <PATH>  Config file (default: platform config dir)");
                println!("      --clear          Delete every item before seeding");
                println!("  -l, --list           Print the catalog afterwards");
                println!("  -h, --help           Show this help message");
                return None;
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    Some(parsed)
}

/// Installs the tracing subscriber. `RUST_LOG` wins over the config filter.
fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the sample form for `index`, cycling through the catalog.
fn sample_form(index: usize) -> ItemForm {
    let (name, price, quantity, supplier, phone) = CATALOG[index % CATALOG.len()];
    let pass = index / CATALOG.len();

    let name = if pass == 0 {
        name.to_string()
    } else {
        format!("{} {}", name, pass + 1)
    };

    ItemForm::new()
        .product_name(name)
        .price(price)
        .quantity(quantity)
        .supplier_name(supplier)
        .supplier_phone(phone)
}
