//! Free-text search over ledger transactions

use serde::{Deserialize, Serialize};

use crate::types::{Transaction, TransactionType};

/// Type restriction applied alongside the search term
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn accepts(&self, transaction_type: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => transaction_type == TransactionType::Income,
            TypeFilter::Expense => transaction_type == TransactionType::Expense,
        }
    }
}

/// Search term plus type filter, as entered in a transaction list view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionQuery {
    /// Case-insensitive substring of reason, category or amount; empty matches everything
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub type_filter: TypeFilter,
}

impl TransactionQuery {
    pub fn new(search: impl Into<String>, type_filter: TypeFilter) -> Self {
        Self {
            search: search.into(),
            type_filter,
        }
    }

    /// Whether a transaction satisfies both the term and the type filter
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if !self.type_filter.accepts(transaction.transaction_type) {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        transaction.reason.to_lowercase().contains(&needle)
            || transaction
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
            || transaction
                .amount
                .as_ref()
                .is_some_and(|a| a.to_string().contains(&needle))
    }

    /// Matching transactions in input order
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}
