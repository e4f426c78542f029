//! Core types and data structures for the reconciliation engine

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::amount;

/// Identifier of a ledger transaction
pub type TransactionId = i64;

/// Direction of money movement. Amounts are never negative; the sign lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in (salary, refunds, ...)
    Income,
    /// Money going out
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(LedgerError::Validation(format!(
                "Unknown transaction type '{}'",
                other
            ))),
        }
    }
}

/// Reporting window relative to a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// The reference calendar day
    Day,
    /// Trailing seven days ending on the reference day
    Week,
    /// The reference calendar month
    Month,
    /// The reference calendar year
    Year,
    /// No filtering
    All,
}

impl Period {
    /// Every period, narrowest first
    pub const ALL_PERIODS: [Period; 5] = [
        Period::Day,
        Period::Week,
        Period::Month,
        Period::Year,
        Period::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            other => Err(LedgerError::Validation(format!("Unknown period '{}'", other))),
        }
    }
}

/// A ledger-side transaction recorded by the user or imported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier within the ledger
    pub id: TransactionId,
    /// Calendar date of the transaction
    pub date: NaiveDate,
    /// Non-negative amount; `None` when the supplied value was missing or not numeric
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub amount: Option<BigDecimal>,
    /// Free-text description ("Grocery", "Salary", ...)
    #[serde(default)]
    pub reason: String,
    /// Spending category; absent categories are reported under the fallback label
    #[serde(default)]
    pub category: Option<String>,
    /// Income or expense
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Whether the user has confirmed this transaction against the bank
    #[serde(default)]
    pub matched: bool,
}

impl Transaction {
    /// Create a new, unconfirmed transaction
    pub fn new(
        id: TransactionId,
        date: NaiveDate,
        amount: BigDecimal,
        reason: String,
        category: Option<String>,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            id,
            date,
            amount: Some(amount),
            reason,
            category,
            transaction_type,
            matched: false,
        }
    }

    /// Amount used in sums; missing or non-numeric amounts count as zero
    pub fn amount_or_zero(&self) -> BigDecimal {
        amount::or_zero(self.amount.as_ref())
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// A single line of an imported bank statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRecord {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub amount: Option<BigDecimal>,
    #[serde(default)]
    pub reason: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl BankRecord {
    /// Create a new bank record
    pub fn new(
        date: NaiveDate,
        amount: BigDecimal,
        reason: String,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            date,
            amount: Some(amount),
            reason,
            transaction_type,
        }
    }
}

/// The records of one completed bank statement import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankStatement {
    /// Identifier of the import
    pub id: Uuid,
    /// When the import completed
    pub imported_at: NaiveDateTime,
    /// Parsed statement lines, in file order
    pub records: Vec<BankRecord>,
}

impl BankStatement {
    /// Wrap freshly imported records
    pub fn new(records: Vec<BankRecord>, imported_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            imported_at,
            records,
        }
    }
}

/// A transaction whose bank counterpart (same date, reason and type) disagrees on amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Amount reported by the bank
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub bank_amount: Option<BigDecimal>,
}

impl Discrepancy {
    /// Ledger amount minus bank amount, with missing amounts taken as zero
    pub fn difference(&self) -> BigDecimal {
        self.transaction.amount_or_zero() - amount::or_zero(self.bank_amount.as_ref())
    }
}

/// Income, expense and balance totals over a set of transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub income: BigDecimal,
    pub expenses: BigDecimal,
    /// `income - expenses`; negative when spending exceeds income
    pub balance: BigDecimal,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            income: BigDecimal::from(0),
            expenses: BigDecimal::from(0),
            balance: BigDecimal::from(0),
        }
    }
}

/// Immutable snapshot produced by the report generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Sequential number within the report log, starting at 1
    pub id: u64,
    /// Generation date formatted for display
    pub date: String,
    /// Exact generation timestamp
    pub generated_at: NaiveDateTime,
    /// Period the totals cover
    pub period: Period,
    pub income: BigDecimal,
    pub expenses: BigDecimal,
    pub balance: BigDecimal,
    /// Highest-spending categories, largest first
    pub top_categories: Vec<String>,
    /// Number of amount discrepancies against the bank statement at generation time
    #[serde(default)]
    pub discrepancy_count: usize,
}

impl Report {
    /// Totals carried by this report
    pub fn summary(&self) -> Summary {
        Summary {
            income: self.income.clone(),
            expenses: self.expenses.clone(),
            balance: self.balance.clone(),
        }
    }

    /// Whether the period closed with a surplus (or broke even)
    pub fn is_surplus(&self) -> bool {
        self.balance >= BigDecimal::from(0)
    }
}

/// Errors that can occur in the ledger system
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),
    #[error("Report not found: {0}")]
    ReportNotFound(u64),
    #[error("Transaction already exists: {0}")]
    DuplicateTransaction(TransactionId),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
