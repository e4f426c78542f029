//! Exact matching of ledger transactions against bank records

use serde::{Deserialize, Serialize};

use crate::types::{BankRecord, Transaction};
use crate::utils::amount;

/// Result of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    /// Transactions with no bank record on the same date, type and amount, in input order
    pub unmatched: Vec<Transaction>,
    /// Number of transactions that found a bank record
    pub matched_count: usize,
}

impl ReconciliationOutcome {
    pub fn unmatched_count(&self) -> usize {
        self.unmatched.len()
    }

    /// True when every transaction found a bank record
    pub fn is_fully_matched(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// Whether `record` is an exact counterpart of `transaction`
///
/// Date and type must be identical and the amounts numerically equal; the
/// reason text plays no part.
pub fn is_exact_match(transaction: &Transaction, record: &BankRecord) -> bool {
    record.date == transaction.date
        && record.transaction_type == transaction.transaction_type
        && amount::agree(record.amount.as_ref(), transaction.amount.as_ref())
}

/// First bank record that exactly matches `transaction`
///
/// Bank records are never consumed, so several transactions may resolve to
/// the same record. When several records qualify the earliest one wins.
pub fn find_exact_match<'a>(
    transaction: &Transaction,
    bank_records: &'a [BankRecord],
) -> Option<&'a BankRecord> {
    bank_records
        .iter()
        .find(|record| is_exact_match(transaction, record))
}

/// Split transactions into bank-matched and unmatched
///
/// This pass ignores the stored `matched` flag; it reflects only the bank
/// records supplied.
pub fn reconcile(transactions: &[Transaction], bank_records: &[BankRecord]) -> ReconciliationOutcome {
    let mut outcome = ReconciliationOutcome::default();

    for transaction in transactions {
        match find_exact_match(transaction, bank_records) {
            Some(_) => outcome.matched_count += 1,
            None => outcome.unmatched.push(transaction.clone()),
        }
    }

    tracing::debug!(
        transactions = transactions.len(),
        bank_records = bank_records.len(),
        matched = outcome.matched_count,
        unmatched = outcome.unmatched.len(),
        "Reconciled ledger against bank records"
    );

    outcome
}
