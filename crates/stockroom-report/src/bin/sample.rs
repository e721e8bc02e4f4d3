//! # Sample Snapshot Generator
//!
//! Writes a demo snapshot for trying the report without a real backup.
//!
//! ## Usage
//! ```bash
//! # 20 products, 30 days of activity (default)
//! cargo run -p stockroom-report --bin sample
//!
//! # Custom size and output file
//! cargo run -p stockroom-report --bin sample -- --products 60 --days 90 --out ./data/demo.json
//! ```
//!
//! ## Generated Data
//! - One purchase per product at the start of the period
//! - A few sales per day, spread over three cashiers and the administrator
//! - Weekly rent and utility expenses
//!
//! Quantities and prices come from the record index, so the amounts are the
//! same on every run; only ids and timestamps change.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use tracing::{error, info};
use uuid::Uuid;

use stockroom_core::{Category, Expense, Product, Settings, Transaction, TransactionKind};
use stockroom_report::{init_tracing, ReportResult, Snapshot};

/// Categories and the products generated in each.
const CATALOG: &[(&str, &[&str])] = &[
    ("Flour & Grains", &["Wheat Flour", "Corn Flour", "Rice", "Buckwheat", "Oats"]),
    ("Dairy", &["Milk", "Sulguni", "Butter", "Matsoni", "Cream"]),
    ("Beverages", &["Mineral Water", "Lemonade", "Black Tea", "Coffee", "Juice"]),
    ("Household", &["Soap", "Detergent", "Paper Towels", "Sponges", "Bin Bags"]),
];

/// Units cycled across products.
const UNITS: &[&str] = &["kg", "pcs", "l", "pack"];

/// Cashiers; `None` records the sale as the administrator's.
const CASHIERS: &[Option<(&str, &str)>] = &[
    Some(("u-nino", "Nino")),
    Some(("u-giorgi", "Giorgi")),
    Some(("u-ana", "Ana")),
    None,
];

#[derive(Parser, Debug)]
#[command(name = "sample")]
#[command(about = "Generate a demo Stockroom snapshot")]
struct Args {
    /// Number of products to generate.
    #[arg(long, default_value_t = 20)]
    products: usize,

    /// Days of activity, ending today.
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Output file.
    #[arg(long, default_value = "./stockroom_sample.json")]
    out: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Sample generation failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> ReportResult<()> {
    let now = Utc::now();
    let start = now - Duration::days(i64::from(args.days));

    let categories: Vec<Category> = CATALOG
        .iter()
        .map(|(name, _)| Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Some(start),
        })
        .collect();

    let products = generate_products(&categories, args.products, start);
    let mut transactions = generate_purchases(&products, start);
    transactions.extend(generate_sales(&products, start, args.days));
    let expenses = generate_expenses(start, args.days);

    info!(
        products = products.len(),
        transactions = transactions.len(),
        expenses = expenses.len(),
        "Generated sample data"
    );

    let snapshot = Snapshot {
        products,
        transactions,
        expenses,
        categories,
        settings: Some(Settings {
            company_name: "Stockroom Demo".into(),
            ..Settings::default()
        }),
        export_date: Some(now),
    };
    snapshot.save(&args.out)?;

    println!("✓ Wrote {}", args.out.display());
    Ok(())
}

/// Products cycle through the catalog; repeats get a numbered suffix.
fn generate_products(categories: &[Category], count: usize, created_at: DateTime<Utc>) -> Vec<Product> {
    let names: Vec<(usize, &str)> = CATALOG
        .iter()
        .enumerate()
        .flat_map(|(idx, (_, items))| items.iter().map(move |name| (idx, *name)))
        .collect();

    (0..count)
        .map(|i| {
            let (category_idx, base) = names[i % names.len()];
            let round = i / names.len();
            let name = if round == 0 {
                base.to_string()
            } else {
                format!("{} #{}", base, round + 1)
            };

            // Cost 1.00 - 20.75, sold at a 20% - 60% markup
            let cost_price = 1.0 + ((i * 37) % 80) as f64 * 0.25;
            let markup = 1.2 + ((i * 13) % 5) as f64 * 0.1;
            let price = (cost_price * markup * 100.0).round() / 100.0;

            Product {
                id: Uuid::new_v4().to_string(),
                name,
                description: String::new(),
                category_id: categories.get(category_idx).map(|c| c.id.clone()),
                price,
                cost_price,
                stock: ((i * 29) % 60) as i64,
                unit: UNITS[i % UNITS.len()].to_string(),
                created_at: Some(created_at),
            }
        })
        .collect()
}

fn generate_purchases(products: &[Product], date: DateTime<Utc>) -> Vec<Transaction> {
    products
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let quantity = 20 + ((i * 7) % 40) as i64;
            Transaction {
                id: Uuid::new_v4().to_string(),
                kind: TransactionKind::Purchase,
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                quantity,
                unit_price: product.cost_price,
                total_price: product.cost_price * quantity as f64,
                date,
                note: Some("Opening stock".into()),
                cashier_id: None,
                cashier_name: None,
            }
        })
        .collect()
}

fn generate_sales(products: &[Product], start: DateTime<Utc>, days: u32) -> Vec<Transaction> {
    if products.is_empty() {
        return Vec::new();
    }

    let mut sales = Vec::new();
    for day in 0..days as usize {
        let per_day = 2 + day % 4;
        for slot in 0..per_day {
            let seed = day * 11 + slot * 5;
            let product = &products[seed % products.len()];
            let quantity = 1 + (seed % 5) as i64;
            let cashier = CASHIERS[seed % CASHIERS.len()];
            let date = start + Duration::days(day as i64 + 1) - Duration::hours(8 - slot as i64);

            sales.push(Transaction {
                id: Uuid::new_v4().to_string(),
                kind: TransactionKind::Sale,
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                quantity,
                unit_price: product.price,
                total_price: product.price * quantity as f64,
                date,
                note: None,
                cashier_id: cashier.map(|(id, _)| id.to_string()),
                cashier_name: cashier.map(|(_, name)| name.to_string()),
            });
        }
    }
    sales
}

fn generate_expenses(start: DateTime<Utc>, days: u32) -> Vec<Expense> {
    (0..days / 7 + 1)
        .flat_map(|week| {
            let date = start + Duration::days(i64::from(week * 7));
            [
                ("Rent", "rent", 150.0),
                ("Electricity", "utilities", 35.0 + f64::from(week % 3) * 5.0),
            ]
            .into_iter()
            .map(move |(title, category, amount)| Expense {
                id: Uuid::new_v4().to_string(),
                title: title.to_string(),
                amount,
                category: category.to_string(),
                date,
                note: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    }

    fn catalog(count: usize) -> Vec<Product> {
        let categories = vec![Category {
            id: "c1".into(),
            name: "Flour & Grains".into(),
            created_at: None,
        }];
        generate_products(&categories, count, start())
    }

    #[test]
    fn test_products_repeat_names_with_suffix() {
        let products = catalog(25);

        assert_eq!(products.len(), 25);
        assert_eq!(products[0].name, "Wheat Flour");
        assert_eq!(products[20].name, "Wheat Flour #2");
        assert_eq!(products[0].category_id.as_deref(), Some("c1"));
        // Only one category given; later catalog groups have none to point at
        assert_eq!(products[5].category_id, None);
        assert!(products.iter().all(|p| p.price > p.cost_price));
    }

    #[test]
    fn test_one_opening_purchase_per_product() {
        let products = catalog(6);
        let purchases = generate_purchases(&products, start());

        assert_eq!(purchases.len(), 6);
        for (tx, product) in purchases.iter().zip(&products) {
            assert!(tx.is_purchase());
            assert_eq!(tx.product_id, product.id);
            assert_eq!(tx.total_price, product.cost_price * tx.quantity as f64);
        }
    }

    #[test]
    fn test_sales_per_day_cycle() {
        let products = catalog(10);
        let sales = generate_sales(&products, start(), 8);

        // 2, 3, 4, 5 sales per day, repeating
        assert_eq!(sales.len(), 28);
        assert!(sales.iter().all(|tx| tx.is_sale()));

        let first_day = sales.iter().filter(|tx| tx.day() == start().date_naive()).count();
        assert_eq!(first_day, 2);
        assert!(sales.iter().any(|tx| tx.cashier_id.is_none()));
        assert!(sales.iter().any(|tx| tx.cashier_name.as_deref() == Some("Nino")));
    }

    #[test]
    fn test_no_products_means_no_sales() {
        assert!(generate_sales(&[], start(), 30).is_empty());
    }

    #[test]
    fn test_weekly_expenses() {
        let expenses = generate_expenses(start(), 14);

        assert_eq!(expenses.len(), 6);
        assert_eq!(expenses.iter().filter(|e| e.title == "Rent").count(), 3);
        assert!(expenses.iter().all(|e| e.amount > 0.0));
    }
}
