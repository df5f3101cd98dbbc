//! Transaction model
//!
//! A transaction is one immutable line in the store:
//! `date,type,amount,category_or_source,description`. The amount is always
//! positive; direction comes from [`TransactionType`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Field separator of the store format
pub const FIELD_DELIMITER: char = ',';

/// Number of fields in one stored line
pub const FIELD_COUNT: usize = 5;

/// Date format used on disk and in user input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default expense categories offered by the shells
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Other",
];

/// Default income sources offered by the shells
pub const INCOME_SOURCES: &[&str] = &[
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Gift",
    "Other",
];

/// Whether money left or arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    /// The token written to the store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    /// Parse user input, ignoring case and surrounding whitespace
    pub fn parse_loose(s: &str) -> Option<Self> {
        s.trim().to_ascii_lowercase().parse().ok()
    }

    /// Label for the free-text field that goes with this type
    pub fn label_field_name(&self) -> &'static str {
        match self {
            Self::Expense => "Category",
            Self::Income => "Source",
        }
    }

    /// Suggested labels for this type
    pub fn default_labels(&self) -> &'static [&'static str] {
        match self {
            Self::Expense => EXPENSE_CATEGORIES,
            Self::Income => INCOME_SOURCES,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Expense => Self::Income,
            Self::Income => Self::Expense,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = LineParseError;

    /// Exact, case-sensitive parse of the stored token
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(LineParseError::UnknownType(other.to_string())),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Always positive, in minor units
    pub amount: Money,
    /// A category for expenses, a source for income
    pub category_or_source: String,
    pub description: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        kind: TransactionType,
        amount: Money,
        category_or_source: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind,
            amount,
            category_or_source: category_or_source.into(),
            description: description.into(),
        }
    }

    /// Amount with direction applied: negative for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Expense => -self.amount,
            TransactionType::Income => self.amount,
        }
    }

    /// Serialize as one store line, without the trailing newline.
    ///
    /// No escaping is done; a delimiter inside a free-text field will make
    /// the line unreadable on load.
    pub fn to_line(&self) -> String {
        format!(
            "{}{d}{}{d}{}{d}{}{d}{}",
            self.date.format(DATE_FORMAT),
            self.kind.as_str(),
            self.amount.minor(),
            self.category_or_source,
            self.description,
            d = FIELD_DELIMITER,
        )
    }

    /// Parse one store line (without its newline)
    pub fn from_line(line: &str) -> Result<Self, LineParseError> {
        let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if parts.len() != FIELD_COUNT {
            return Err(LineParseError::FieldCount(parts.len()));
        }

        let date = NaiveDate::parse_from_str(parts[0], DATE_FORMAT)
            .map_err(|_| LineParseError::InvalidDate(parts[0].to_string()))?;
        let kind: TransactionType = parts[1].parse()?;
        let amount = parts[2]
            .parse::<i64>()
            .map(Money::from_minor)
            .map_err(|_| LineParseError::InvalidAmount(parts[2].to_string()))?;
        if !amount.is_valid_transaction_amount() {
            return Err(LineParseError::AmountOutOfRange(amount.minor()));
        }

        Ok(Self {
            date,
            kind,
            amount,
            category_or_source: parts[3].to_string(),
            description: parts[4].to_string(),
        })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format(DATE_FORMAT),
            self.kind,
            self.category_or_source,
            self.signed_amount()
        )
    }
}

/// Why a stored line could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineParseError {
    FieldCount(usize),
    InvalidDate(String),
    UnknownType(String),
    InvalidAmount(String),
    /// Zero, negative, or above the per-record ceiling
    AmountOutOfRange(i64),
}

impl fmt::Display for LineParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount(n) => write!(f, "expected {} fields, found {}", FIELD_COUNT, n),
            Self::InvalidDate(s) => write!(f, "invalid date '{}'", s),
            Self::UnknownType(s) => write!(f, "unknown transaction type '{}'", s),
            Self::InvalidAmount(s) => write!(f, "invalid amount '{}'", s),
            Self::AmountOutOfRange(n) => write!(
                f,
                "amount {} is outside 1..={}",
                n,
                Money::MAX_TRANSACTION
            ),
        }
    }
}

impl std::error::Error for LineParseError {}
