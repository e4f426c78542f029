//! Reconciliation of the ledger against an imported bank statement
//!
//! Two independent passes run over the same snapshots:
//!
//! - [`matcher`] pairs transactions with bank records on date, type and amount
//!   and reports what stays unmatched.
//! - [`discrepancy`] pairs them on date, reason and type and reports amount
//!   disagreements.
//!
//! Neither pass touches the user-confirmed `matched` flag on a transaction.

pub mod discrepancy;
pub mod matcher;

pub use discrepancy::*;
pub use matcher::*;

use serde::{Deserialize, Serialize};

use crate::types::{BankRecord, Discrepancy, Transaction};

/// Counters for a reconciliation dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationStatus {
    /// Transactions in the ledger
    pub total: usize,
    /// Transactions the user has confirmed
    pub confirmed: usize,
    /// Transactions not yet confirmed
    pub unconfirmed: usize,
    /// Transactions without an exact bank counterpart
    pub bank_unmatched: usize,
    /// Transactions whose bank counterpart disagrees on amount
    pub discrepancies: usize,
}

/// Both reconciliation passes over one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationRun {
    pub outcome: ReconciliationOutcome,
    pub discrepancies: Vec<Discrepancy>,
    pub status: ReconciliationStatus,
}

/// Runs the matcher and the discrepancy detector together
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Recompute reconciliation state from scratch
    #[tracing::instrument(skip_all, fields(transactions = transactions.len(), bank_records = bank_records.len()))]
    pub fn run(&self, transactions: &[Transaction], bank_records: &[BankRecord]) -> ReconciliationRun {
        let outcome = reconcile(transactions, bank_records);
        let discrepancies = find_discrepancies(transactions, bank_records);
        let status = status_from(transactions, &outcome, &discrepancies);

        ReconciliationRun {
            outcome,
            discrepancies,
            status,
        }
    }
}

/// Dashboard counters for a ledger snapshot against a bank statement
pub fn reconciliation_status(
    transactions: &[Transaction],
    bank_records: &[BankRecord],
) -> ReconciliationStatus {
    ReconciliationEngine::new().run(transactions, bank_records).status
}

fn status_from(
    transactions: &[Transaction],
    outcome: &ReconciliationOutcome,
    discrepancies: &[Discrepancy],
) -> ReconciliationStatus {
    let confirmed = transactions.iter().filter(|t| t.matched).count();

    ReconciliationStatus {
        total: transactions.len(),
        confirmed,
        unconfirmed: transactions.len() - confirmed,
        bank_unmatched: outcome.unmatched.len(),
        discrepancies: discrepancies.len(),
    }
}
