//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;

use crate::types::*;

/// Storage abstraction for the ledger's long-lived state
///
/// Only two collections outlive a single computation: the transactions (whose
/// `matched` flags change on user confirmation) and the append-only report log.
/// Implementations must apply each mutating call as one indivisible update.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Save a new transaction; fails if the ID is already taken
    async fn save_transaction(&mut self, transaction: &Transaction) -> LedgerResult<()>;

    /// Get a transaction by ID
    async fn get_transaction(&self, transaction_id: TransactionId)
        -> LedgerResult<Option<Transaction>>;

    /// List all transactions in ID order
    async fn list_transactions(&self) -> LedgerResult<Vec<Transaction>>;

    /// Next free transaction ID
    async fn next_transaction_id(&self) -> LedgerResult<TransactionId>;

    /// Set the `matched` flag of a transaction and return the updated record
    async fn mark_matched(&mut self, transaction_id: TransactionId) -> LedgerResult<Transaction>;

    /// Append a report to the report log
    async fn append_report(&mut self, report: &Report) -> LedgerResult<()>;

    /// List reports in the order they were generated
    async fn list_reports(&self) -> LedgerResult<Vec<Report>>;
}

/// Trait for implementing custom transaction validation rules
pub trait TransactionValidator: Send + Sync {
    /// Validate a transaction before it is recorded
    fn validate_transaction(&self, transaction: &Transaction) -> LedgerResult<()>;
}

/// Default validator: a reason and a non-negative amount are required
pub struct DefaultTransactionValidator;

impl TransactionValidator for DefaultTransactionValidator {
    fn validate_transaction(&self, transaction: &Transaction) -> LedgerResult<()> {
        if transaction.reason.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Transaction reason cannot be empty".to_string(),
            ));
        }

        match &transaction.amount {
            None => Err(LedgerError::Validation(
                "Transaction amount is missing or not numeric".to_string(),
            )),
            Some(amount) if *amount < BigDecimal::from(0) => Err(LedgerError::Validation(
                "Transaction amount cannot be negative; use the transaction type for direction"
                    .to_string(),
            )),
            Some(_) => Ok(()),
        }
    }
}

/// Source of the current instant for period and report logic
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the machine's local time zone
///
/// Periods are calendar days, weeks and months as the user sees them, so
/// "today" is the local date rather than the UTC one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock frozen at one instant, for tests and replays
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_system_clock_reads_local_time() {
        let before = Local::now().naive_local();
        let now = SystemClock.now();
        let after = Local::now().naive_local();

        assert!(before <= now && now <= after);
    }

    #[test]
    fn test_fixed_clock_is_frozen() {
        let instant = chrono::NaiveDate::from_ymd_opt(2024, 1, 20)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let clock = FixedClock(instant);

        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }
}
