//! # Validation Module
//!
//! Checks for records typed in by users or read from an import file.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Lives                             │
//! │                                                                         │
//! │  Data entry / import (forms, JSON backup restore)                      │
//! │  └── THIS MODULE: reject or flag bad rows                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Backend storage                                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Aggregators (accounting, reporting)                                   │
//! │  └── NO validation: values are summed exactly as stored                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_quantity, validate_amount};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_quantity(0).is_err());
//! assert!(validate_amount("unitPrice", 0.0).is_ok());
//! assert!(validate_amount("unitPrice", f64::NAN).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Expense, Product, Transaction};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name the catalog accepts.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a transaction quantity: must be a positive integer.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a monetary amount: finite and not negative. Zero is allowed.
pub fn validate_amount(field: &str, amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if amount < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a transaction row. Stops at the first problem found.
pub fn validate_transaction(tx: &Transaction) -> ValidationResult<()> {
    if tx.product_id.trim().is_empty() {
        return Err(ValidationError::required("productId"));
    }
    validate_product_name(&tx.product_name)?;
    validate_quantity(tx.quantity)?;
    validate_amount("unitPrice", tx.unit_price)?;
    validate_amount("totalPrice", tx.total_price)?;
    Ok(())
}

/// Validates a catalog product. Negative stock is allowed (oversold items).
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_amount("price", product.price)?;
    validate_amount("costPrice", product.cost_price)?;
    Ok(())
}

/// Validates an expense entry.
pub fn validate_expense(expense: &Expense) -> ValidationResult<()> {
    if expense.title.trim().is_empty() {
        return Err(ValidationError::required("title"));
    }
    validate_amount("amount", expense.amount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;
    use chrono::Utc;

    fn sample_tx() -> Transaction {
        Transaction {
            id: "t1".to_string(),
            kind: TransactionKind::Sale,
            product_id: "p1".to_string(),
            product_name: "Flour 1kg".to_string(),
            quantity: 2,
            unit_price: 2.5,
            total_price: 5.0,
            date: Utc::now(),
            note: None,
            cashier_id: None,
            cashier_name: None,
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Coca-Cola 330ml").is_ok());
        assert!(validate_product_name("ფქვილი").is_ok());
        assert_eq!(validate_product_name("   "), Err(ValidationError::required("name")));
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("price", 0.0).is_ok());
        assert!(validate_amount("price", 10.99).is_ok());
        assert!(matches!(
            validate_amount("price", -0.01),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            validate_amount("price", f64::INFINITY),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_validate_transaction() {
        assert!(validate_transaction(&sample_tx()).is_ok());

        let mut tx = sample_tx();
        tx.quantity = 0;
        assert!(validate_transaction(&tx).is_err());

        let mut tx = sample_tx();
        tx.total_price = f64::NAN;
        assert_eq!(
            validate_transaction(&tx),
            Err(ValidationError::NotFinite {
                field: "totalPrice".to_string()
            })
        );

        let mut tx = sample_tx();
        tx.product_id = String::new();
        assert_eq!(validate_transaction(&tx), Err(ValidationError::required("productId")));
    }

    #[test]
    fn test_validate_product_and_expense() {
        let product = Product {
            id: "p1".to_string(),
            name: "Sugar".to_string(),
            description: String::new(),
            category_id: None,
            price: 3.0,
            cost_price: 2.0,
            stock: -2,
            unit: "kg".to_string(),
            created_at: None,
        };
        assert!(validate_product(&product).is_ok());

        let expense = Expense {
            id: "e1".to_string(),
            title: "".to_string(),
            amount: 10.0,
            category: "rent".to_string(),
            date: Utc::now(),
            note: None,
        };
        assert_eq!(validate_expense(&expense), Err(ValidationError::required("title")));
    }
}
