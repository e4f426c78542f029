//! Amount discrepancies between the ledger and the bank statement

use crate::types::{BankRecord, Discrepancy, Transaction};
use crate::utils::amount;

/// Whether `record` describes the same event as `transaction`
///
/// Looser than the exact matcher: date, reason and type must be
/// identical, the amount is free to differ.
pub fn is_reason_match(transaction: &Transaction, record: &BankRecord) -> bool {
    record.date == transaction.date
        && record.reason == transaction.reason
        && record.transaction_type == transaction.transaction_type
}

/// First bank record sharing the transaction's date, reason and type
pub fn find_reason_match<'a>(
    transaction: &Transaction,
    bank_records: &'a [BankRecord],
) -> Option<&'a BankRecord> {
    bank_records
        .iter()
        .find(|record| is_reason_match(transaction, record))
}

/// Transactions whose reason-matched bank record reports a different amount
///
/// At most one discrepancy per transaction, in transaction order. A
/// transaction without any reason-matched record yields nothing here; that
/// case is an unmatched transaction, not a discrepancy.
pub fn find_discrepancies(
    transactions: &[Transaction],
    bank_records: &[BankRecord],
) -> Vec<Discrepancy> {
    let discrepancies: Vec<Discrepancy> = transactions
        .iter()
        .filter_map(|transaction| {
            let record = find_reason_match(transaction, bank_records)?;
            if amount::agree(transaction.amount.as_ref(), record.amount.as_ref()) {
                return None;
            }
            Some(Discrepancy {
                transaction: transaction.clone(),
                bank_amount: record.amount.clone(),
            })
        })
        .collect();

    if !discrepancies.is_empty() {
        tracing::info!(
            count = discrepancies.len(),
            "Ledger amounts disagree with the bank statement"
        );
    }

    discrepancies
}
