//! Service layer for the finance tracker
//!
//! Input validation and the query/aggregation layer on top of the store.

pub mod query;
pub mod transaction;

pub use query::{
    filter_by_type, filter_last_n_days, monthly_totals, MonthlyTotals, TransactionFilter,
    DEFAULT_RECENT_DAYS,
};
pub use transaction::{CreateTransactionInput, TransactionService};
