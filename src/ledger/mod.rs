//! Ledger orchestration: recording, confirming and reporting

pub mod core;
pub mod transaction;

pub use self::core::*;
pub use transaction::*;
