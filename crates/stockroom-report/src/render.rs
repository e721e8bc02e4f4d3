//! Plain-text rendering of an [`AccountingReport`].

use std::fmt::Write;

use stockroom_core::money::format_currency;

use crate::report::AccountingReport;

/// Renders the report as aligned text sections.
pub fn render_text(report: &AccountingReport) -> String {
    let money = |amount: f64| format_currency(amount, &report.currency);
    let mut out = String::new();

    let title = report.company.as_deref().unwrap_or("Accounting report");
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    let from = report.from.map_or_else(|| "…".to_string(), |d| d.to_string());
    let to = report.to.map_or_else(|| "…".to_string(), |d| d.to_string());
    let _ = writeln!(out, "Period: {} – {} ({} transactions)", from, to, report.transaction_count);
    out.push('\n');

    let _ = writeln!(out, "Totals");
    let _ = writeln!(out, "  Purchases    {:>16}", money(report.totals.purchases));
    let _ = writeln!(out, "  Sales        {:>16}", money(report.totals.sales));
    let _ = writeln!(out, "  Expenses     {:>16}", money(report.totals.expenses));
    let _ = writeln!(out, "  Cash flow    {:>16}", money(report.totals.cash_flow));
    let _ = writeln!(out, "  Stock value  {:>16}", money(report.stock_value));
    if let Some(sales) = report.export_day_sales {
        let _ = writeln!(out, "  Export day   {:>16}", money(sales));
    }

    if !report.profitability.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Product profitability");
        let _ = writeln!(
            out,
            "  {:<24} {:>6} {:>14} {:>14} {:>14} {:>8}",
            "Product", "Units", "Revenue", "COGS", "Profit", "Margin"
        );
        for row in &report.profitability {
            let _ = writeln!(
                out,
                "  {:<24} {:>6} {:>14} {:>14} {:>14} {:>7.2}%",
                row.product_name,
                row.units_sold,
                money(row.revenue),
                money(row.cogs),
                money(row.gross_profit),
                row.margin
            );
        }
    }

    if !report.top_products.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Top products by revenue");
        for (rank, row) in report.top_products.iter().enumerate() {
            let _ = writeln!(out, "  {}. {:<24} {:>14}", rank + 1, row.product_name, money(row.revenue));
        }
    }

    if !report.cashiers.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Sales by cashier");
        for row in &report.cashiers {
            let _ = writeln!(
                out,
                "  {:<24} {:>14} ({} sales)",
                row.name,
                money(row.total_sales),
                row.transaction_count
            );
        }
    }

    if !report.daily.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Daily");
        for point in &report.daily {
            let _ = writeln!(
                out,
                "  {}  purchases {:>14}  sales {:>14}",
                point.day.format("%d/%m/%Y"),
                money(point.purchases),
                money(point.sales)
            );
        }
    }

    if !report.low_stock.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Low stock");
        for item in &report.low_stock {
            let _ = writeln!(out, "  {:<24} {:>6} {}", item.name, item.stock, item.unit);
        }
    }

    if !report.duplicates.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Duplicate products");
        for plan in &report.duplicates {
            let _ = writeln!(
                out,
                "  keep {}  merge {}  stock {}",
                plan.canonical_id,
                plan.duplicate_ids.join(", "),
                plan.total_stock
            );
        }
    }

    if let Some(history) = &report.history {
        out.push('\n');
        let _ = writeln!(out, "History");
        for tx in history {
            let _ = writeln!(
                out,
                "  {}  {:<8} {:<24} {:>5} × {:>12} = {:>14}{}",
                tx.date.format("%d/%m/%Y %H:%M"),
                tx.kind,
                tx.product_name,
                tx.quantity,
                money(tx.unit_price),
                money(tx.total_price),
                tx.note.as_deref().map(|n| format!("  ({})", n)).unwrap_or_default()
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::report::{AccountingReport, ReportOptions};
    use crate::snapshot::Snapshot;
    use std::path::Path;

    fn render(json: &str) -> String {
        let snapshot = Snapshot::parse(json, Path::new("t.json")).unwrap();
        let mut config = ReportConfig::default();
        config.adopt_snapshot_currency(snapshot.currency());
        let mut options = ReportOptions::from_config(&config);
        options.history = Some(None);
        render_text(&AccountingReport::build(&snapshot, &config, &options))
    }

    #[test]
    fn test_render_sections() {
        let text = render(
            r#"{
            "products": [{"id":"p1","name":"Flour","price":4,"costPrice":2,"stock":3,"unit":"kg"}],
            "transactions": [
                {"id":"t1","type":"sale","productId":"p1","productName":"Flour","quantity":2,
                 "unitPrice":4,"totalPrice":8,"date":"2024-05-01T10:00:00Z","note":"walk-in"}
            ],
            "settings": {"companyName":"Depot","currency":"$"}
        }"#,
        );

        assert!(text.starts_with("Depot\n=====\n"));
        assert!(text.contains("8.00 $"));
        assert!(text.contains("Product profitability"));
        assert!(text.contains("50.00%"));
        assert!(text.contains("Low stock"));
        assert!(text.contains("01/05/2024"));
        assert!(text.contains("(walk-in)"));
    }

    #[test]
    fn test_render_empty_snapshot() {
        let text = render(r#"{"products": []}"#);
        assert!(text.starts_with("Accounting report"));
        assert!(text.contains("0.00 ₾"));
        assert!(!text.contains("Product profitability"));
        assert!(!text.contains("Duplicate products"));
        assert!(!text.contains("Export day"));
    }
}
