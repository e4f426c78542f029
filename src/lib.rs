//! # Ledger Recon
//!
//! Household bookkeeping engine that reconciles a ledger of income and
//! expense transactions against an imported bank statement and produces
//! period summaries and financial reports.
//!
//! ## Features
//!
//! - **Period filtering**: day, trailing week, calendar month, calendar year or everything
//! - **Aggregation**: income/expense/balance totals, category breakdowns, monthly trends
//! - **Reconciliation**: exact date/type/amount matching against bank records
//! - **Discrepancy detection**: same date/reason/type but a different amount
//! - **Reports**: immutable, sequentially numbered snapshots ready for export
//! - **Storage abstraction**: the stateful [`Ledger`] works over any [`LedgerStorage`]
//!
//! Every computation is a pure function over explicit snapshots; "now" is
//! always passed in, either directly or through a [`Clock`].
//!
//! ## Quick Start
//!
//! ```rust
//! use ledger_recon::{filter_by_period, summarize, Period, Transaction, TransactionType};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
//! let transactions = vec![Transaction::new(
//!     1,
//!     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
//!     BigDecimal::from(150),
//!     "Grocery".to_string(),
//!     Some("Food".to_string()),
//!     TransactionType::Expense,
//! )];
//!
//! let summary = summarize(&filter_by_period(&transactions, Period::Month, today));
//! assert_eq!(summary.balance, BigDecimal::from(-150));
//! ```

pub mod config;
pub mod ledger;
pub mod reconciliation;
pub mod reporting;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::EngineConfig;
pub use ledger::*;
pub use reconciliation::*;
pub use reporting::*;
pub use traits::*;
pub use types::*;

// Re-export transaction patterns for convenience
pub use ledger::transaction::patterns;
