//! # Domain Types
//!
//! Input records the reporting views load from the backend, plus the derived
//! records the engine hands back.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUTS (borrowed read-only)          OUTPUTS (fresh per call)         │
//! │  ┌─────────────────┐                  ┌──────────────────────┐         │
//! │  │  Transaction    │ ───────────────► │  Totals              │         │
//! │  │  kind, qty,     │        │         └──────────────────────┘         │
//! │  │  total_price    │        │         ┌──────────────────────┐         │
//! │  └─────────────────┘        ├───────► │  ProductProfitStats  │         │
//! │  ┌─────────────────┐        │         └──────────────────────┘         │
//! │  │  Product        │ ───────┘         ┌──────────────────────┐         │
//! │  │  cost_price     │                  │  CashierStats        │         │
//! │  └─────────────────┘                  └──────────────────────┘         │
//! │  ┌─────────────────┐                                                    │
//! │  │  Expense        │ ──► Totals.expenses                                │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Records serialize as camelCase JSON, the same shape the application's
//! backup export writes. Optional fields treat a missing key and `null` the
//! same way.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

/// Backend rows may carry `null` for text columns the UI treats as "".
mod null_as_empty {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Settings rows are exported as stored, so `currency` can be `null`.
mod null_as_default_currency {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(super::default_currency))
    }
}

// =============================================================================
// Transaction Kind
// =============================================================================

/// Whether stock came in (purchase) or went out (sale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Stock bought from a supplier.
    Purchase,
    /// Stock sold to a customer.
    Sale,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() honours width and alignment flags
        f.pad(match self {
            TransactionKind::Purchase => "purchase",
            TransactionKind::Sale => "sale",
        })
    }
}

impl FromStr for TransactionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "purchase" => Ok(TransactionKind::Purchase),
            "sale" => Ok(TransactionKind::Sale),
            other => Err(CoreError::UnknownTransactionKind(other.to_string())),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A recorded purchase or sale of a single product.
///
/// `total_price` is stored as entered and is expected to be close to
/// `quantity × unit_price`; nothing here re-checks that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,

    /// Serialized as `type` to match the stored records.
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub product_id: String,

    /// Product name at the time the transaction was recorded.
    pub product_name: String,

    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,

    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    #[serde(default)]
    pub note: Option<String>,

    /// Absent for sales recorded by an administrator.
    #[serde(default)]
    pub cashier_id: Option<String>,

    #[serde(default)]
    pub cashier_name: Option<String>,
}

impl Transaction {
    #[inline]
    pub fn is_sale(&self) -> bool {
        self.kind == TransactionKind::Sale
    }

    #[inline]
    pub fn is_purchase(&self) -> bool {
        self.kind == TransactionKind::Purchase
    }

    /// Calendar day (UTC) the transaction falls on.
    #[inline]
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry with its live sell price, cost price and stock level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,

    #[serde(default, with = "null_as_empty")]
    #[ts(type = "string")]
    pub description: String,

    #[serde(default)]
    pub category_id: Option<String>,

    /// Sell price per unit.
    pub price: f64,

    /// Current cost price per unit. Profitability always reads this value,
    /// so editing it changes historical COGS.
    pub cost_price: f64,

    pub stock: i64,

    /// Unit of measure label ("pcs", "kg", ...).
    #[serde(default, with = "null_as_empty")]
    #[ts(type = "string")]
    pub unit: String,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Expense
// =============================================================================

/// A general business expense (rent, utilities, ...), not tied to stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub amount: f64,

    #[serde(default, with = "null_as_empty")]
    #[ts(type = "string")]
    pub category: String,

    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    #[serde(default)]
    pub note: Option<String>,
}

impl Expense {
    #[inline]
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

// =============================================================================
// Catalog Metadata
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Company-wide settings. Only `currency` matters to reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, with = "null_as_empty")]
    #[ts(type = "string")]
    pub company_name: String,

    /// Currency symbol shown next to amounts. Missing or `null` falls back
    /// to the default symbol.
    #[serde(default = "default_currency", with = "null_as_default_currency")]
    #[ts(type = "string")]
    pub currency: String,

    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub iban: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

fn default_currency() -> String {
    crate::money::DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            company_name: String::new(),
            currency: default_currency(),
            phone: None,
            email: None,
            iban: None,
            address: None,
        }
    }
}

// =============================================================================
// Derived Records
// =============================================================================

/// Period totals shown at the top of the accounting view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub purchases: f64,
    pub sales: f64,
    pub expenses: f64,
    /// `sales - purchases - expenses`.
    pub cash_flow: f64,
}

/// Profitability of one product across the sales in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductProfitStats {
    pub product_id: String,
    pub product_name: String,
    pub revenue: f64,
    pub units_sold: i64,
    pub cogs: f64,
    pub gross_profit: f64,
    /// Percent of revenue; 0 when revenue is 0.
    pub margin: f64,
}

/// Sales attributed to one cashier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CashierStats {
    /// `cashier_id`, or [`crate::ADMIN_CASHIER_KEY`] for unattributed sales.
    pub cashier_key: String,
    pub name: String,
    pub total_sales: f64,
    pub transaction_count: usize,
}

/// One bar of the purchases-vs-sales chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    #[ts(as = "String")]
    pub day: NaiveDate,
    pub purchases: f64,
    pub sales: f64,
}

/// One slice of the sales-by-product chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductRevenue {
    pub product_name: String,
    pub revenue: f64,
}

/// How to collapse a group of same-named product records into one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MergePlan {
    /// Record that survives and receives the summed stock.
    pub canonical_id: String,
    /// Records to delete, in input order.
    pub duplicate_ids: Vec<String>,
    pub total_stock: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
