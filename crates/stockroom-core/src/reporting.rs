//! # Reporting Helpers
//!
//! Filters and series the dashboard, inventory and accounting views derive
//! from already-loaded collections. Like [`crate::accounting`], everything
//! here is pure and only borrows its inputs.
//!
//! ## Accounting View Pipeline
//! ```text
//! all transactions
//!      │
//!      ▼
//! filter_by_date_range(from, to)   ← whole days, inclusive
//!      │
//!      ├──► compute_totals / profitability / cashier stats
//!      ├──► daily_series            (purchases vs sales chart)
//!      ├──► top_products_by_revenue (sales by product chart)
//!      └──► filter_by_kind          (history table tab)
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::accounting::descending;
use crate::types::{DailyPoint, Expense, MergePlan, Product, ProductRevenue, Transaction, TransactionKind};

// =============================================================================
// Date Range
// =============================================================================

/// An optional, inclusive range of calendar days (UTC).
///
/// `start` admits everything from 00:00:00 of that day, `end` everything up
/// to 23:59:59.999 of that day. A missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }

    /// Range that admits everything.
    pub fn all() -> Self {
        DateRange::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Checks whether an instant falls inside the range.
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            if *at < start_of_day(start) {
                return false;
            }
        }
        if let Some(end) = self.end {
            if *at > end_of_day(end) {
                return false;
            }
        }
        true
    }
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    // 23:59:59.999 always exists
    let last_ms = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&day.and_time(last_ms))
}

/// Transactions dated inside `range`, in input order.
pub fn filter_by_date_range(transactions: &[Transaction], range: &DateRange) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| range.contains(&tx.date))
        .cloned()
        .collect()
}

/// Expenses dated inside `range`, in input order.
pub fn filter_expenses_by_date_range(expenses: &[Expense], range: &DateRange) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| range.contains(&e.date))
        .cloned()
        .collect()
}

/// History tab filter: `None` keeps every transaction.
pub fn filter_by_kind(transactions: &[Transaction], kind: Option<TransactionKind>) -> Vec<Transaction> {
    match kind {
        None => transactions.to_vec(),
        Some(kind) => transactions.iter().filter(|tx| tx.kind == kind).cloned().collect(),
    }
}

// =============================================================================
// Chart Series
// =============================================================================

/// Purchases and sales summed per calendar day, oldest day first.
pub fn daily_series(transactions: &[Transaction]) -> Vec<DailyPoint> {
    let mut days: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

    for tx in transactions {
        let (purchases, sales) = days.entry(tx.day()).or_insert((0.0, 0.0));
        match tx.kind {
            TransactionKind::Purchase => *purchases += tx.total_price,
            TransactionKind::Sale => *sales += tx.total_price,
        }
    }

    days.into_iter()
        .map(|(day, (purchases, sales))| DailyPoint { day, purchases, sales })
        .collect()
}

/// Sales revenue grouped by product *name*, largest first, at most `limit`.
///
/// Grouping by name (not id) matches the sales-by-product chart: renamed
/// products show up as separate slices.
pub fn top_products_by_revenue(transactions: &[Transaction], limit: usize) -> Vec<ProductRevenue> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<ProductRevenue> = Vec::new();

    for tx in transactions.iter().filter(|tx| tx.is_sale()) {
        let slot = *index.entry(tx.product_name.as_str()).or_insert_with(|| {
            rows.push(ProductRevenue {
                product_name: tx.product_name.clone(),
                revenue: 0.0,
            });
            rows.len() - 1
        });
        rows[slot].revenue += tx.total_price;
    }

    rows.sort_by(|a, b| descending(a.revenue, b.revenue));
    rows.truncate(limit);
    rows
}

/// Revenue from sales dated on `day` (the dashboard's "today's sales").
pub fn sales_on_day(transactions: &[Transaction], day: NaiveDate) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.is_sale() && tx.day() == day)
        .map(|tx| tx.total_price)
        .sum()
}

// =============================================================================
// Inventory
// =============================================================================

/// Value of stock on hand at sell price: `Σ stock × price`.
pub fn stock_value(products: &[Product]) -> f64 {
    products.iter().map(|p| p.stock as f64 * p.price).sum()
}

/// Products at or below `threshold` units, in input order.
pub fn low_stock(products: &[Product], threshold: i64) -> Vec<&Product> {
    products.iter().filter(|p| p.stock <= threshold).collect()
}

/// Plans how to collapse products that share a name.
///
/// Names are compared trimmed and case-insensitively. Within a group the
/// first record that has a category survives (or simply the first record),
/// all others become duplicates, and the survivor receives the group's total
/// stock. Groups of one produce no plan. Plans follow first-seen order.
pub fn plan_duplicate_merges(products: &[Product]) -> Vec<MergePlan> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Product>> = Vec::new();

    for product in products {
        let key = product.name.trim().to_lowercase();
        match index.get(&key) {
            Some(&slot) => groups[slot].push(product),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![product]);
            }
        }
    }

    groups
        .into_iter()
        .filter(|group| group.len() > 1)
        .map(|group| {
            let canonical = group
                .iter()
                .position(|p| p.category_id.is_some())
                .unwrap_or(0);

            MergePlan {
                canonical_id: group[canonical].id.clone(),
                duplicate_ids: group
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != canonical)
                    .map(|(_, p)| p.id.clone())
                    .collect(),
                total_stock: group.iter().map(|p| p.stock).sum(),
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(kind: TransactionKind, name: &str, total: f64, date: DateTime<Utc>) -> Transaction {
        Transaction {
            id: format!("{}-{}", name, date.timestamp()),
            kind,
            product_id: name.to_lowercase(),
            product_name: name.to_string(),
            quantity: 1,
            unit_price: total,
            total_price: total,
            date,
            note: None,
            cashier_id: None,
            cashier_name: None,
        }
    }

    fn product(id: &str, name: &str, stock: i64, price: f64, category: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            category_id: category.map(str::to_string),
            price,
            cost_price: price / 2.0,
            stock,
            unit: "pcs".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_date_range_is_inclusive_of_whole_days() {
        let range = DateRange::new(Some(day(2024, 3, 1)), Some(day(2024, 3, 2)));

        assert!(range.contains(&at(2024, 3, 1, 0, 0, 0)));
        assert!(range.contains(&at(2024, 3, 2, 23, 59, 59)));
        assert!(!range.contains(&at(2024, 2, 29, 23, 59, 59)));
        assert!(!range.contains(&at(2024, 3, 3, 0, 0, 0)));
    }

    #[test]
    fn test_date_range_open_sides() {
        let from_only = DateRange::new(Some(day(2024, 3, 1)), None);
        assert!(from_only.contains(&at(2030, 1, 1, 0, 0, 0)));
        assert!(!from_only.contains(&at(2024, 2, 1, 0, 0, 0)));

        assert!(DateRange::all().is_unbounded());
        assert!(DateRange::all().contains(&at(1999, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_filter_by_date_range_keeps_order() {
        let transactions = vec![
            tx(TransactionKind::Sale, "A", 1.0, at(2024, 3, 5, 10, 0, 0)),
            tx(TransactionKind::Sale, "B", 2.0, at(2024, 2, 5, 10, 0, 0)),
            tx(TransactionKind::Purchase, "C", 3.0, at(2024, 3, 1, 8, 0, 0)),
        ];
        let range = DateRange::new(Some(day(2024, 3, 1)), None);

        let names: Vec<_> = filter_by_date_range(&transactions, &range)
            .into_iter()
            .map(|t| t.product_name)
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_filter_by_kind() {
        let transactions = vec![
            tx(TransactionKind::Sale, "A", 1.0, at(2024, 3, 5, 10, 0, 0)),
            tx(TransactionKind::Purchase, "B", 2.0, at(2024, 3, 5, 11, 0, 0)),
        ];
        assert_eq!(filter_by_kind(&transactions, None).len(), 2);
        let purchases = filter_by_kind(&transactions, Some(TransactionKind::Purchase));
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].product_name, "B");
    }

    #[test]
    fn test_daily_series_groups_and_sorts() {
        let transactions = vec![
            tx(TransactionKind::Sale, "A", 10.0, at(2024, 3, 2, 18, 0, 0)),
            tx(TransactionKind::Purchase, "A", 4.0, at(2024, 3, 1, 9, 0, 0)),
            tx(TransactionKind::Sale, "B", 5.0, at(2024, 3, 2, 9, 0, 0)),
        ];

        let series = daily_series(&transactions);
        assert_eq!(
            series,
            vec![
                DailyPoint { day: day(2024, 3, 1), purchases: 4.0, sales: 0.0 },
                DailyPoint { day: day(2024, 3, 2), purchases: 0.0, sales: 15.0 },
            ]
        );
    }

    #[test]
    fn test_top_products_by_revenue() {
        let when = at(2024, 3, 2, 12, 0, 0);
        let transactions = vec![
            tx(TransactionKind::Sale, "Flour", 10.0, when),
            tx(TransactionKind::Sale, "Sugar", 30.0, when),
            tx(TransactionKind::Sale, "Flour", 25.0, when),
            tx(TransactionKind::Purchase, "Oil", 500.0, when),
            tx(TransactionKind::Sale, "Salt", 1.0, when),
        ];

        let top = top_products_by_revenue(&transactions, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], ProductRevenue { product_name: "Flour".into(), revenue: 35.0 });
        assert_eq!(top[1].product_name, "Sugar");
    }

    #[test]
    fn test_top_products_with_nan_revenue() {
        let when = at(2024, 3, 2, 12, 0, 0);
        let transactions: Vec<Transaction> = (0..40)
            .map(|i| {
                let total = if i % 3 == 0 { f64::NAN } else { i as f64 };
                tx(TransactionKind::Sale, &format!("Item {}", i), total, when)
            })
            .collect();

        let top = top_products_by_revenue(&transactions, 40);
        assert_eq!(top.len(), 40);
        assert_eq!(top[0].product_name, "Item 38");
        assert!(top[..26].windows(2).all(|w| w[0].revenue > w[1].revenue));
        assert!(top[26..].iter().all(|r| r.revenue.is_nan()));
    }

    #[test]
    fn test_sales_on_day() {
        let transactions = vec![
            tx(TransactionKind::Sale, "A", 10.0, at(2024, 3, 2, 0, 0, 1)),
            tx(TransactionKind::Sale, "B", 5.0, at(2024, 3, 2, 23, 0, 0)),
            tx(TransactionKind::Purchase, "C", 7.0, at(2024, 3, 2, 12, 0, 0)),
            tx(TransactionKind::Sale, "D", 99.0, at(2024, 3, 3, 0, 0, 0)),
        ];
        assert_eq!(sales_on_day(&transactions, day(2024, 3, 2)), 15.0);
        assert_eq!(sales_on_day(&[], day(2024, 3, 2)), 0.0);
    }

    #[test]
    fn test_stock_value_and_low_stock() {
        let products = vec![
            product("1", "Flour", 20, 2.5, None),
            product("2", "Sugar", 10, 3.0, None),
            product("3", "Salt", 0, 1.0, None),
        ];

        assert_eq!(stock_value(&products), 80.0);

        let low: Vec<_> = low_stock(&products, crate::LOW_STOCK_THRESHOLD)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(low, vec!["2", "3"]);
    }

    #[test]
    fn test_plan_duplicate_merges_prefers_categorized_record() {
        let products = vec![
            product("a1", "Flour", 5, 2.0, None),
            product("b1", "Sugar", 1, 3.0, None),
            product("a2", " flour ", 7, 2.0, Some("cat-1")),
            product("a3", "FLOUR", 3, 2.0, None),
        ];

        let plans = plan_duplicate_merges(&products);
        assert_eq!(
            plans,
            vec![MergePlan {
                canonical_id: "a2".into(),
                duplicate_ids: vec!["a1".into(), "a3".into()],
                total_stock: 15,
            }]
        );
    }

    #[test]
    fn test_plan_duplicate_merges_without_category_keeps_first() {
        let products = vec![product("x", "Oil", 1, 5.0, None), product("y", "oil", 2, 5.0, None)];
        let plans = plan_duplicate_merges(&products);
        assert_eq!(plans[0].canonical_id, "x");
        assert_eq!(plans[0].duplicate_ids, vec!["y".to_string()]);
        assert!(plan_duplicate_merges(&products[..1]).is_empty());
    }
}
