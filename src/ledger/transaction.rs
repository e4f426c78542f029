//! Transaction recording and confirmation

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::traits::*;
use crate::types::*;

/// Transaction manager for handling transaction operations
pub struct TransactionManager<S: LedgerStorage> {
    pub(crate) storage: S,
    validator: Box<dyn TransactionValidator>,
}

impl<S: LedgerStorage> TransactionManager<S> {
    /// Create a new transaction manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultTransactionValidator),
        }
    }

    /// Create a new transaction manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn TransactionValidator>) -> Self {
        Self { storage, validator }
    }

    /// Record a new transaction
    pub async fn record_transaction(&mut self, transaction: Transaction) -> LedgerResult<Transaction> {
        self.validator.validate_transaction(&transaction)?;
        self.storage.save_transaction(&transaction).await?;

        tracing::info!(
            transaction_id = transaction.id,
            transaction_type = %transaction.transaction_type,
            "Recorded transaction"
        );
        Ok(transaction)
    }

    /// Get a transaction by ID
    pub async fn get_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> LedgerResult<Option<Transaction>> {
        self.storage.get_transaction(transaction_id).await
    }

    /// Get a transaction by ID, returning an error if not found
    pub async fn get_transaction_required(
        &self,
        transaction_id: TransactionId,
    ) -> LedgerResult<Transaction> {
        self.storage
            .get_transaction(transaction_id)
            .await?
            .ok_or(LedgerError::TransactionNotFound(transaction_id))
    }

    /// All transactions in ID order
    pub async fn list_transactions(&self) -> LedgerResult<Vec<Transaction>> {
        self.storage.list_transactions().await
    }

    /// Next free transaction ID
    pub async fn next_transaction_id(&self) -> LedgerResult<TransactionId> {
        self.storage.next_transaction_id().await
    }

    /// Record the user's confirmation that a transaction appears on the bank statement
    ///
    /// Confirming twice is a no-op; an unknown ID is an error.
    pub async fn confirm_match(&mut self, transaction_id: TransactionId) -> LedgerResult<Transaction> {
        let existing = self.get_transaction_required(transaction_id).await?;
        if existing.matched {
            tracing::debug!(transaction_id, "Transaction already confirmed");
            return Ok(existing);
        }

        let transaction = self.storage.mark_matched(transaction_id).await?;
        tracing::info!(transaction_id, "Transaction confirmed against bank statement");
        Ok(transaction)
    }
}

/// Transaction builder for assembling ledger entries
#[derive(Debug)]
pub struct TransactionBuilder {
    transaction: Transaction,
}

impl TransactionBuilder {
    /// Create a new transaction builder; the amount starts at zero
    pub fn new(
        id: TransactionId,
        date: NaiveDate,
        reason: String,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            transaction: Transaction::new(
                id,
                date,
                BigDecimal::from(0),
                reason,
                None,
                transaction_type,
            ),
        }
    }

    /// Set the amount
    pub fn amount(mut self, amount: BigDecimal) -> Self {
        self.transaction.amount = Some(amount);
        self
    }

    /// Set the category
    pub fn category(mut self, category: String) -> Self {
        self.transaction.category = Some(category);
        self
    }

    /// Mark the transaction as already confirmed, e.g. when re-importing confirmed history
    pub fn matched(mut self, matched: bool) -> Self {
        self.transaction.matched = matched;
        self
    }

    /// Build the transaction
    pub fn build(self) -> LedgerResult<Transaction> {
        DefaultTransactionValidator.validate_transaction(&self.transaction)?;
        Ok(self.transaction)
    }
}

/// Common transaction patterns
pub mod patterns {
    use super::*;

    /// An expense under a spending category
    pub fn create_expense(
        id: TransactionId,
        date: NaiveDate,
        reason: String,
        category: String,
        amount: BigDecimal,
    ) -> LedgerResult<Transaction> {
        TransactionBuilder::new(id, date, reason, TransactionType::Expense)
            .amount(amount)
            .category(category)
            .build()
    }

    /// Income filed under the "Income" category
    pub fn create_income(
        id: TransactionId,
        date: NaiveDate,
        reason: String,
        amount: BigDecimal,
    ) -> LedgerResult<Transaction> {
        TransactionBuilder::new(id, date, reason, TransactionType::Income)
            .amount(amount)
            .category("Income".to_string())
            .build()
    }
}
