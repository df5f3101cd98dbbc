//! Transaction service
//!
//! Validates user input before anything reaches the store, and combines
//! store reads with the query layer for the shells.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::models::transaction::{DATE_FORMAT, FIELD_DELIMITER};
use crate::models::{Money, Transaction, TransactionType, YearMonth};
use crate::storage::Storage;

use super::query::{monthly_totals, MonthlyTotals, TransactionFilter};

/// Raw input for a new transaction, as typed by the user
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionType,
    /// Amount in major units, e.g. "12.50"
    pub amount: String,
    pub category_or_source: String,
    pub description: String,
    /// `YYYY-MM-DD`; empty or `None` means today
    pub date: Option<String>,
}

impl CreateTransactionInput {
    /// Turn the input into a record, or explain why it is rejected
    pub fn validate(&self, today: NaiveDate) -> TrackerResult<Transaction> {
        let amount = Money::parse_positive(&self.amount)
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => today,
            Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| {
                TrackerError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
            })?,
        };

        let label = self.category_or_source.trim();
        if label.is_empty() {
            return Err(TrackerError::Validation(format!(
                "{} is required",
                self.kind.label_field_name()
            )));
        }
        check_free_text(self.kind.label_field_name(), label)?;

        let description = self.description.trim();
        check_free_text("Description", description)?;

        Ok(Transaction::new(date, self.kind, amount, label, description))
    }
}

/// The store format cannot carry the delimiter or line breaks in text fields
fn check_free_text(field: &str, value: &str) -> TrackerResult<()> {
    if value.contains(FIELD_DELIMITER) {
        return Err(TrackerError::Validation(format!(
            "{} cannot contain '{}'",
            field, FIELD_DELIMITER
        )));
    }
    if value.contains(['\n', '\r']) {
        return Err(TrackerError::Validation(format!(
            "{} cannot contain line breaks",
            field
        )));
    }
    Ok(())
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and append a new transaction. Nothing is written on rejection.
    pub fn create(&self, input: CreateTransactionInput, today: NaiveDate) -> TrackerResult<Transaction> {
        let txn = input.validate(today)?;
        self.storage.transactions.append(&txn)?;

        info!(
            date = %txn.date,
            kind = txn.kind.as_str(),
            amount = txn.amount.minor(),
            "recorded transaction"
        );

        Ok(txn)
    }

    /// All transactions, newest first
    pub fn list_all(&self) -> TrackerResult<Vec<Transaction>> {
        self.storage.transactions.load_sorted()
    }

    /// Transactions matching `filter`, newest first
    pub fn list(&self, filter: TransactionFilter, today: NaiveDate) -> TrackerResult<Vec<Transaction>> {
        let records = self.list_all()?;
        Ok(filter.apply(&records, today))
    }

    /// Income, expenses and balance for one month
    pub fn monthly_summary(&self, month: YearMonth) -> TrackerResult<MonthlyTotals> {
        let records = self.storage.transactions.load_all()?;
        Ok(monthly_totals(&records, month))
    }
}
