//! Display formatting for terminal output

pub mod transaction;

pub use transaction::{
    format_amount, format_created, format_monthly_summary, format_transaction_table,
};
