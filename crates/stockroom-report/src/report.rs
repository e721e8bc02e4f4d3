//! # Accounting Report
//!
//! Assembles everything the accounting view shows from one snapshot.
//!
//! ```text
//! Snapshot ──► date range ──► engine calls ──► AccountingReport ──► render
//! ```
//!
//! Stock value, low-stock items and duplicate names describe the catalog as
//! it is now, so they ignore the date range. So does the export-day sales
//! figure, which reads the day the snapshot was taken. Everything else only
//! sees the transactions and expenses inside the range.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use stockroom_core::reporting::{
    daily_series, filter_by_date_range, filter_by_kind, filter_expenses_by_date_range, low_stock,
    plan_duplicate_merges, sales_on_day, stock_value, top_products_by_revenue,
};
use stockroom_core::{
    compute_cashier_stats, compute_product_profitability, compute_totals, CashierStats, DailyPoint,
    DateRange, MergePlan, ProductProfitStats, ProductRevenue, Totals, Transaction, TransactionKind,
};

use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};
use crate::snapshot::Snapshot;

/// Knobs for one report run.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub range: DateRange,
    /// `Some(None)` lists every transaction, `Some(Some(kind))` one kind,
    /// `None` omits the history section.
    pub history: Option<Option<TransactionKind>>,
    pub top_products: usize,
    pub low_stock_threshold: i64,
}

impl ReportOptions {
    /// Options taken from config, no date range, no history.
    pub fn from_config(config: &ReportConfig) -> Self {
        ReportOptions {
            range: DateRange::all(),
            history: None,
            top_products: config.report.top_products,
            low_stock_threshold: config.report.low_stock_threshold,
        }
    }

    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> ReportResult<Self> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ReportError::InvalidRange(format!(
                    "start {} is after end {}",
                    start, end
                )));
            }
        }
        self.range = DateRange::new(start, end);
        Ok(self)
    }
}

/// Parses the history selector: `all`, `purchase` or `sale`.
pub fn parse_history(value: &str) -> ReportResult<Option<TransactionKind>> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    Ok(Some(value.parse()?))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub product_id: String,
    pub name: String,
    pub stock: i64,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountingReport {
    pub company: Option<String>,
    pub currency: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub transaction_count: usize,
    pub totals: Totals,
    pub stock_value: f64,
    pub low_stock: Vec<LowStockItem>,
    /// Products sharing a name that the admin panel would merge.
    pub duplicates: Vec<MergePlan>,
    /// Sales on the snapshot's export day, when the export date is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_day_sales: Option<f64>,
    pub daily: Vec<DailyPoint>,
    pub top_products: Vec<ProductRevenue>,
    pub profitability: Vec<ProductProfitStats>,
    pub cashiers: Vec<CashierStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<Transaction>>,
}

impl AccountingReport {
    /// Runs every aggregation over the snapshot.
    pub fn build(snapshot: &Snapshot, config: &ReportConfig, options: &ReportOptions) -> Self {
        let transactions = if options.range.is_unbounded() {
            snapshot.transactions.clone()
        } else {
            filter_by_date_range(&snapshot.transactions, &options.range)
        };
        let expenses = filter_expenses_by_date_range(&snapshot.expenses, &options.range);

        debug!(
            kept = transactions.len(),
            total = snapshot.transactions.len(),
            expenses = expenses.len(),
            "Applied date range"
        );

        let mut history = options
            .history
            .map(|kind| filter_by_kind(&transactions, kind));
        // Newest first, like the history table
        if let Some(rows) = history.as_mut() {
            rows.sort_by(|a, b| b.date.cmp(&a.date));
        }

        let report = AccountingReport {
            company: snapshot.company_name().map(str::to_string),
            currency: config.currency().to_string(),
            from: options.range.start,
            to: options.range.end,
            transaction_count: transactions.len(),
            totals: compute_totals(&transactions, &expenses),
            stock_value: stock_value(&snapshot.products),
            low_stock: low_stock(&snapshot.products, options.low_stock_threshold)
                .into_iter()
                .map(|p| LowStockItem {
                    product_id: p.id.clone(),
                    name: p.name.clone(),
                    stock: p.stock,
                    unit: p.unit.clone(),
                })
                .collect(),
            duplicates: plan_duplicate_merges(&snapshot.products),
            export_day_sales: snapshot
                .export_date
                .map(|at| sales_on_day(&snapshot.transactions, at.date_naive())),
            daily: daily_series(&transactions),
            top_products: top_products_by_revenue(&transactions, options.top_products),
            profitability: compute_product_profitability(&transactions, &snapshot.products),
            cashiers: compute_cashier_stats(&transactions),
            history,
        };

        info!(
            transactions = report.transaction_count,
            products = report.profitability.len(),
            cashiers = report.cashiers.len(),
            cash_flow = report.totals.cash_flow,
            "Report built"
        );
        report
    }
}
