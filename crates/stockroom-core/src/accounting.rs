//! # Accounting Aggregators
//!
//! The three rollups behind the accounting view: period totals, per-product
//! profitability and per-cashier sales.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  &[Transaction] ─┬──► compute_totals ◄── &[Expense]                    │
//! │                  │         └──► Totals { purchases, sales,              │
//! │                  │                       expenses, cash_flow }          │
//! │                  │                                                      │
//! │                  ├──► compute_product_profitability ◄── &[Product]     │
//! │                  │         └──► Vec<ProductProfitStats>  (by profit ↓)  │
//! │                  │                                                      │
//! │                  └──► compute_cashier_stats                            │
//! │                            └──► Vec<CashierStats>        (by sales ↓)   │
//! │                                                                         │
//! │  Single pass, no I/O, inputs only borrowed. Same input = same output.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are not validated: a negative quantity or a NaN price simply flows
//! into the sums. Cleaning raw data belongs to the entry/import layer
//! (see [`crate::validation`]).

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::money::margin_percent;
use crate::types::{CashierStats, Expense, Product, ProductProfitStats, Totals, Transaction, TransactionKind};
use crate::{ADMIN_CASHIER_KEY, ADMIN_CASHIER_LABEL};

// =============================================================================
// Totals
// =============================================================================

/// Sums purchases, sales and expenses and derives the cash flow.
///
/// Pass `&[]` for `expenses` when the view has none loaded.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use stockroom_core::accounting::compute_totals;
/// use stockroom_core::{Transaction, TransactionKind};
///
/// let tx = |id: &str, kind, total| Transaction {
///     id: id.into(),
///     kind,
///     product_id: "p1".into(),
///     product_name: "Item 1".into(),
///     quantity: 1,
///     unit_price: total,
///     total_price: total,
///     date: Utc::now(),
///     note: None,
///     cashier_id: None,
///     cashier_name: None,
/// };
///
/// let totals = compute_totals(
///     &[tx("1", TransactionKind::Purchase, 100.0), tx("2", TransactionKind::Sale, 300.0)],
///     &[],
/// );
/// assert_eq!(totals.purchases, 100.0);
/// assert_eq!(totals.sales, 300.0);
/// assert_eq!(totals.cash_flow, 200.0);
/// ```
pub fn compute_totals(transactions: &[Transaction], expenses: &[Expense]) -> Totals {
    let mut purchases = 0.0;
    let mut sales = 0.0;

    for tx in transactions {
        match tx.kind {
            TransactionKind::Purchase => purchases += tx.total_price,
            TransactionKind::Sale => sales += tx.total_price,
        }
    }

    let expenses: f64 = expenses.iter().map(|e| e.amount).sum();

    Totals {
        purchases,
        sales,
        expenses,
        cash_flow: sales - purchases - expenses,
    }
}

// =============================================================================
// Product Profitability
// =============================================================================

/// Revenue, COGS and margin per sold product, most profitable first.
///
/// ## Rules
/// - Only sales count; groups are keyed by `product_id` in first-seen order.
/// - The first sale seen for a product decides `product_name`, even if the
///   product was renamed later.
/// - COGS uses the product's *current* `cost_price` from `products`. A sale
///   whose product is missing from the list adds 0 to COGS but still counts
///   toward revenue and units.
/// - Ties in gross profit keep first-seen order.
///
/// ```text
/// sale p1 qty 2 total 300   products: p1.cost_price = 50
///        │
///        ▼
/// revenue 300, units 2, cogs 2 × 50 = 100, gross 200, margin 66.67%
/// ```
pub fn compute_product_profitability(
    transactions: &[Transaction],
    products: &[Product],
) -> Vec<ProductProfitStats> {
    // First record wins on duplicate ids
    let mut cost_by_id: HashMap<&str, f64> = HashMap::with_capacity(products.len());
    for product in products {
        cost_by_id.entry(product.id.as_str()).or_insert(product.cost_price);
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<ProductProfitStats> = Vec::new();

    for tx in transactions.iter().filter(|tx| tx.is_sale()) {
        let slot = *index.entry(tx.product_id.as_str()).or_insert_with(|| {
            stats.push(ProductProfitStats {
                product_id: tx.product_id.clone(),
                product_name: tx.product_name.clone(),
                revenue: 0.0,
                units_sold: 0,
                cogs: 0.0,
                gross_profit: 0.0,
                margin: 0.0,
            });
            stats.len() - 1
        });

        let entry = &mut stats[slot];
        entry.revenue += tx.total_price;
        entry.units_sold += tx.quantity;
        if let Some(cost) = cost_by_id.get(tx.product_id.as_str()) {
            entry.cogs += tx.quantity as f64 * cost;
        }
    }

    for entry in &mut stats {
        entry.gross_profit = entry.revenue - entry.cogs;
        entry.margin = margin_percent(entry.gross_profit, entry.revenue);
    }

    stats.sort_by(|a, b| descending(a.gross_profit, b.gross_profit));
    stats
}

// =============================================================================
// Cashier Sales
// =============================================================================

/// Sales totals per cashier, biggest seller first.
///
/// Sales without a `cashier_id` were entered by an administrator and land in
/// the [`ADMIN_CASHIER_KEY`] bucket. The display name comes from the first
/// sale in each group: its `cashier_name`, or [`ADMIN_CASHIER_LABEL`].
pub fn compute_cashier_stats(transactions: &[Transaction]) -> Vec<CashierStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<CashierStats> = Vec::new();

    for tx in transactions.iter().filter(|tx| tx.is_sale()) {
        let key = tx.cashier_id.as_deref().unwrap_or(ADMIN_CASHIER_KEY);

        let slot = *index.entry(key).or_insert_with(|| {
            stats.push(CashierStats {
                cashier_key: key.to_string(),
                name: tx
                    .cashier_name
                    .clone()
                    .unwrap_or_else(|| ADMIN_CASHIER_LABEL.to_string()),
                total_sales: 0.0,
                transaction_count: 0,
            });
            stats.len() - 1
        });

        let entry = &mut stats[slot];
        entry.total_sales += tx.total_price;
        entry.transaction_count += 1;
    }

    stats.sort_by(|a, b| descending(a.total_sales, b.total_sales));
    stats
}

/// Total descending order on amounts: larger first, NaN after every number.
///
/// NaN rows compare equal to each other, so the stable sort keeps them in
/// first-seen order at the tail.
#[inline]
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
