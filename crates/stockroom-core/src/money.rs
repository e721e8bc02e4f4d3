//! # Money Module
//!
//! Display helpers for monetary amounts.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Aggregators ──► raw f64 sums (no rounding, no fixed point)             │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  Report views ──► format_currency(amount, "₾") ──► "1234.50 ₾"         │
//! │                                                                         │
//! │  Rounding to 2 decimals happens ONLY at display time.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::{format_currency, DEFAULT_CURRENCY_SYMBOL};
//!
//! assert_eq!(format_currency(1234.5, DEFAULT_CURRENCY_SYMBOL), "1234.50 ₾");
//! assert_eq!(format_currency(-3.0, "$"), "-3.00 $");
//! ```

/// Georgian lari, the symbol the application ships with.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₾";

/// Formats an amount with exactly two decimals followed by the symbol.
///
/// Negative zero prints as `0.00`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let amount = if amount == 0.0 { 0.0 } else { amount };
    format!("{:.2} {}", amount, symbol)
}

/// Rounds to the nearest hundredth (half away from zero).
///
/// ```rust
/// use stockroom_core::money::round_to_cents;
///
/// assert_eq!(round_to_cents(66.666_666), 66.67);
/// assert_eq!(round_to_cents(-1.234), -1.23);
/// ```
#[inline]
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Profit as a percentage of revenue, guarded against division by zero.
///
/// Returns `0.0` whenever `revenue` is zero, so a product that was only
/// ever given away reports a 0% margin instead of NaN.
#[inline]
pub fn margin_percent(profit: f64, revenue: f64) -> f64 {
    if revenue > 0.0 {
        profit / revenue * 100.0
    } else {
        0.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
