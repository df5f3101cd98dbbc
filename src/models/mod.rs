//! Core data models for the finance tracker
//!
//! Transactions, the money type they carry, and calendar months used for
//! monthly totals.

pub mod money;
pub mod period;
pub mod transaction;

pub use money::{Money, MoneyParseError};
pub use period::YearMonth;
pub use transaction::{LineParseError, Transaction, TransactionType};
