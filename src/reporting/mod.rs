//! Period summaries, category breakdowns and financial reports

pub mod aggregate;
pub mod period;
pub mod report;
pub mod search;

pub use aggregate::*;
pub use period::*;
pub use report::*;
pub use search::*;
