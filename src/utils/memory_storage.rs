//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    transactions: Arc<RwLock<BTreeMap<TransactionId, Transaction>>>,
    reports: Arc<RwLock<Vec<Report>>>,
}

fn poisoned<T>(_: PoisonError<T>) -> LedgerError {
    LedgerError::Storage("memory storage lock poisoned".to_string())
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-loaded with transactions, e.g. from a fetched snapshot
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        let storage = Self::new();
        if let Ok(mut map) = storage.transactions.write() {
            map.extend(transactions.into_iter().map(|t| (t.id, t)));
        }
        storage
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> LedgerResult<()> {
        self.transactions.write().map_err(poisoned)?.clear();
        self.reports.write().map_err(poisoned)?.clear();
        Ok(())
    }
}

#[async_trait]
impl LedgerStorage for MemoryStorage {
    async fn save_transaction(&mut self, transaction: &Transaction) -> LedgerResult<()> {
        let mut transactions = self.transactions.write().map_err(poisoned)?;
        if transactions.contains_key(&transaction.id) {
            return Err(LedgerError::DuplicateTransaction(transaction.id));
        }
        transactions.insert(transaction.id, transaction.clone());
        Ok(())
    }

    async fn get_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> LedgerResult<Option<Transaction>> {
        Ok(self
            .transactions
            .read()
            .map_err(poisoned)?
            .get(&transaction_id)
            .cloned())
    }

    async fn list_transactions(&self) -> LedgerResult<Vec<Transaction>> {
        Ok(self
            .transactions
            .read()
            .map_err(poisoned)?
            .values()
            .cloned()
            .collect())
    }

    async fn next_transaction_id(&self) -> LedgerResult<TransactionId> {
        let transactions = self.transactions.read().map_err(poisoned)?;
        Ok(transactions.keys().next_back().map_or(1, |last| last + 1))
    }

    async fn mark_matched(&mut self, transaction_id: TransactionId) -> LedgerResult<Transaction> {
        let mut transactions = self.transactions.write().map_err(poisoned)?;
        let transaction = transactions
            .get_mut(&transaction_id)
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
        transaction.matched = true;
        Ok(transaction.clone())
    }

    async fn append_report(&mut self, report: &Report) -> LedgerResult<()> {
        self.reports.write().map_err(poisoned)?.push(report.clone());
        Ok(())
    }

    async fn list_reports(&self) -> LedgerResult<Vec<Report>> {
        Ok(self.reports.read().map_err(poisoned)?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    fn txn(id: TransactionId) -> Transaction {
        Transaction::new(
            id,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            BigDecimal::from(25),
            "Pharmacy".to_string(),
            Some("Healthcare".to_string()),
            TransactionType::Expense,
        )
    }

    #[tokio::test]
    async fn test_save_and_list_in_id_order() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.next_transaction_id().await.unwrap(), 1);

        storage.save_transaction(&txn(5)).await.unwrap();
        storage.save_transaction(&txn(2)).await.unwrap();

        let ids: Vec<TransactionId> = storage
            .list_transactions()
            .await
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![2, 5]);
        assert_eq!(storage.next_transaction_id().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_rejected() {
        let mut storage = MemoryStorage::new();
        storage.save_transaction(&txn(1)).await.unwrap();
        let result = storage.save_transaction(&txn(1)).await;
        assert!(matches!(result, Err(LedgerError::DuplicateTransaction(1))));
    }

    #[tokio::test]
    async fn test_mark_matched() {
        let mut storage = MemoryStorage::with_transactions(vec![txn(1), txn(2)]);

        let updated = storage.mark_matched(2).await.unwrap();
        assert!(updated.matched);
        assert!(storage.get_transaction(2).await.unwrap().unwrap().matched);
        assert!(!storage.get_transaction(1).await.unwrap().unwrap().matched);

        assert!(matches!(
            storage.mark_matched(99).await,
            Err(LedgerError::TransactionNotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();
        writer.save_transaction(&txn(1)).await.unwrap();

        assert_eq!(storage.list_transactions().await.unwrap().len(), 1);
        storage.clear().unwrap();
        assert!(writer.list_transactions().await.unwrap().is_empty());
    }
}
