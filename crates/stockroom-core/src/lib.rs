//! # stockroom-core: Pure Accounting Logic for Stockroom
//!
//! The financial aggregation engine behind the warehouse app's accounting
//! views, plus the smaller derivations those views need.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stockroom Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Hosted backend (auth, storage, row-level security)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ already-fetched snapshot               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Reporting views (stockroom-report, web UI)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &[Transaction], &[Product], &[Expense] │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐ │   │
//! │  │   │   types   │  │ accounting │  │ reporting │  │validation │ │   │
//! │  │   │Transaction│  │  Totals    │  │  series   │  │  rules    │ │   │
//! │  │   │  Product  │  │  Profit    │  │  filters  │  │           │ │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Input records and derived report records
//! - [`accounting`] - Totals, product profitability, cashier sales
//! - [`reporting`] - Date filters, chart series, stock valuation
//! - [`money`] - Currency formatting and display rounding
//! - [`validation`] - Data-entry checks (never applied by aggregators)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use stockroom_core::accounting::compute_product_profitability;
//! use stockroom_core::money::round_to_cents;
//! use stockroom_core::{Product, Transaction, TransactionKind};
//!
//! let products = vec![Product {
//!     id: "p1".into(),
//!     name: "Flour".into(),
//!     description: String::new(),
//!     category_id: None,
//!     price: 200.0,
//!     cost_price: 50.0,
//!     stock: 10,
//!     unit: "bag".into(),
//!     created_at: None,
//! }];
//! let sales = vec![Transaction {
//!     id: "t1".into(),
//!     kind: TransactionKind::Sale,
//!     product_id: "p1".into(),
//!     product_name: "Flour".into(),
//!     quantity: 2,
//!     unit_price: 150.0,
//!     total_price: 300.0,
//!     date: Utc::now(),
//!     note: None,
//!     cashier_id: None,
//!     cashier_name: None,
//! }];
//!
//! let stats = compute_product_profitability(&sales, &products);
//! assert_eq!(stats[0].cogs, 100.0);
//! assert_eq!(stats[0].gross_profit, 200.0);
//! assert_eq!(round_to_cents(stats[0].margin), 66.67);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accounting;
pub mod error;
pub mod money;
pub mod reporting;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use accounting::{compute_cashier_stats, compute_product_profitability, compute_totals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use reporting::DateRange;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Cashier bucket for sales recorded without a cashier (entered by an admin).
pub const ADMIN_CASHIER_KEY: &str = "admin";

/// Display name of the [`ADMIN_CASHIER_KEY`] bucket ("administrator").
pub const ADMIN_CASHIER_LABEL: &str = "ადმინისტრატორი";

/// Stock level at or below which a product is flagged as running low.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Slices shown in the sales-by-product chart.
pub const DEFAULT_TOP_PRODUCTS: usize = 6;
