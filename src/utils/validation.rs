//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Categories offered when recording a transaction
pub const KNOWN_CATEGORIES: [&str; 9] = [
    "Food",
    "Housing",
    "Transportation",
    "Utilities",
    "Healthcare",
    "Entertainment",
    "Education",
    "Income",
    "Other",
];

/// Validate that an amount is present and not negative
pub fn validate_amount(amount: Option<&BigDecimal>) -> LedgerResult<()> {
    match amount {
        None => Err(LedgerError::Validation(
            "Amount is missing or not numeric".to_string(),
        )),
        Some(value) if *value < BigDecimal::from(0) => Err(LedgerError::Validation(
            "Amount cannot be negative".to_string(),
        )),
        Some(_) => Ok(()),
    }
}

/// Validate that a transaction reason is valid
pub fn validate_reason(reason: &str) -> LedgerResult<()> {
    if reason.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Transaction reason cannot be empty".to_string(),
        ));
    }

    if reason.len() > 500 {
        return Err(LedgerError::Validation(
            "Transaction reason cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a category is one of the known categories
pub fn validate_category(category: &str) -> LedgerResult<()> {
    if KNOWN_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(LedgerError::Validation(format!(
            "Unknown category '{}'; expected one of {}",
            category,
            KNOWN_CATEGORIES.join(", ")
        )))
    }
}

/// Enhanced transaction validator with detailed checks
pub struct EnhancedTransactionValidator;

impl TransactionValidator for EnhancedTransactionValidator {
    fn validate_transaction(&self, transaction: &Transaction) -> LedgerResult<()> {
        // Basic validation
        DefaultTransactionValidator.validate_transaction(transaction)?;

        validate_reason(&transaction.reason)?;
        validate_amount(transaction.amount.as_ref())?;

        if let Some(category) = &transaction.category {
            validate_category(category)?;
        }

        if transaction.id <= 0 {
            return Err(LedgerError::Validation(
                "Transaction ID must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
