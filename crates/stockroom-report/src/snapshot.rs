//! # Snapshot Loading
//!
//! A snapshot is the JSON backup the admin panel exports:
//!
//! ```json
//! {
//!   "products":     [ ... ],          // required
//!   "transactions": [ ... ],          // optional, defaults to []
//!   "expenses":     [ ... ],          // optional, defaults to []
//!   "categories":   [ ... ],          // optional, defaults to []
//!   "settings":     { "currency": "₾", ... },
//!   "exportDate":   "2024-05-01T10:00:00.000Z"
//! }
//! ```
//!
//! Rows are kept exactly as stored. [`Snapshot::audit`] flags rows that would
//! fail data-entry validation so the operator can see them in the log, but
//! they still go into the report unchanged.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use stockroom_core::validation::{validate_expense, validate_product, validate_transaction};
use stockroom_core::{Category, Expense, Product, Settings, Transaction, ValidationError};

use crate::error::{ReportError, ReportResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub products: Vec<Product>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub settings: Option<Settings>,

    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
}

/// A snapshot row that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RowIssue {
    /// "product", "transaction" or "expense".
    pub entity: &'static str,
    pub id: String,
    pub error: ValidationError,
}

impl Snapshot {
    /// Reads and parses a snapshot file.
    pub fn load(path: &Path) -> ReportResult<Self> {
        info!(?path, "Loading snapshot");
        let contents = std::fs::read_to_string(path)?;
        let snapshot = Self::parse(&contents, path)?;

        debug!(
            products = snapshot.products.len(),
            transactions = snapshot.transactions.len(),
            expenses = snapshot.expenses.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Parses snapshot JSON; `origin` is only used in error messages.
    pub fn parse(contents: &str, origin: &Path) -> ReportResult<Self> {
        let value: serde_json::Value = serde_json::from_str(contents)?;

        // Same guard as the import screen: no product list, no data
        if !value.get("products").map_or(false, serde_json::Value::is_array) {
            return Err(ReportError::invalid_snapshot(origin, "no products list found"));
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Writes the snapshot as pretty JSON.
    pub fn save(&self, path: &Path) -> ReportResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        info!(?path, "Snapshot written");
        Ok(())
    }

    /// Currency symbol from the embedded settings, if any.
    pub fn currency(&self) -> Option<&str> {
        self.settings.as_ref().map(|s| s.currency.as_str())
    }

    /// Company name from the embedded settings, if any.
    pub fn company_name(&self) -> Option<&str> {
        self.settings
            .as_ref()
            .map(|s| s.company_name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Runs data-entry validation over every row and logs each failure.
    pub fn audit(&self) -> Vec<RowIssue> {
        let products = self
            .products
            .iter()
            .filter_map(|p| validate_product(p).err().map(|e| issue("product", &p.id, e)));
        let transactions = self
            .transactions
            .iter()
            .filter_map(|t| validate_transaction(t).err().map(|e| issue("transaction", &t.id, e)));
        let expenses = self
            .expenses
            .iter()
            .filter_map(|x| validate_expense(x).err().map(|e| issue("expense", &x.id, e)));

        let issues: Vec<RowIssue> = products.chain(transactions).chain(expenses).collect();

        for issue in &issues {
            warn!(
                entity = issue.entity,
                id = %issue.id,
                error = %issue.error,
                "Snapshot row fails validation; aggregating as stored"
            );
        }
        issues
    }
}

fn issue(entity: &'static str, id: &str, error: ValidationError) -> RowIssue {
    RowIssue {
        entity,
        id: id.to_string(),
        error,
    }
}
