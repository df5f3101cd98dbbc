//! Filters and monthly totals over loaded transactions
//!
//! Everything here is pure computation over a slice already loaded from the
//! store. No function in this module does I/O.

use chrono::{Days, NaiveDate};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use crate::models::{Money, Transaction, TransactionType, YearMonth};

/// Days covered by the "recent" filter unless configured otherwise
pub const DEFAULT_RECENT_DAYS: u32 = 7;

/// Keep records dated on or after `reference_date - n` days
pub fn filter_last_n_days(
    records: &[Transaction],
    n: u32,
    reference_date: NaiveDate,
) -> Vec<Transaction> {
    match reference_date.checked_sub_days(Days::new(u64::from(n))) {
        Some(cutoff) => records.iter().filter(|t| t.date >= cutoff).cloned().collect(),
        None => records.to_vec(),
    }
}

/// Keep records of exactly the given type, in input order
pub fn filter_by_type(records: &[Transaction], kind: TransactionType) -> Vec<Transaction> {
    records.iter().filter(|t| t.kind == kind).cloned().collect()
}

/// Income, expenses and their difference for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlyTotals {
    pub total_income: Money,
    pub total_expenses: Money,
    /// `total_income - total_expenses`; negative when overspent
    pub balance: Money,
}

impl MonthlyTotals {
    pub fn new(total_income: Money, total_expenses: Money) -> Self {
        Self {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
        }
    }

    pub fn is_overspent(&self) -> bool {
        self.balance.is_negative()
    }
}

impl Add for MonthlyTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.total_income + other.total_income,
            self.total_expenses + other.total_expenses,
        )
    }
}

impl Sum for MonthlyTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, t| acc + t)
    }
}

/// Sum income and expenses of the records falling in `month`
pub fn monthly_totals(records: &[Transaction], month: YearMonth) -> MonthlyTotals {
    let in_month = records.iter().filter(|t| month.contains(t.date));

    let (income, expenses) = in_month.fold(
        (Money::zero(), Money::zero()),
        |(income, expenses), t| match t.kind {
            TransactionType::Income => (income + t.amount, expenses),
            TransactionType::Expense => (income, expenses + t.amount),
        },
    );

    MonthlyTotals::new(income, expenses)
}

/// The view filters offered by the shells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionFilter {
    #[default]
    All,
    LastDays(u32),
    Expenses,
    Income,
}

impl TransactionFilter {
    /// All filters in menu order, with the given recent window
    pub fn choices(recent_days: u32) -> [Self; 4] {
        [
            Self::All,
            Self::LastDays(recent_days),
            Self::Expenses,
            Self::Income,
        ]
    }

    /// Apply the filter; `today` anchors the recent window
    pub fn apply(&self, records: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
        match self {
            Self::All => records.to_vec(),
            Self::LastDays(n) => filter_last_n_days(records, *n, today),
            Self::Expenses => filter_by_type(records, TransactionType::Expense),
            Self::Income => filter_by_type(records, TransactionType::Income),
        }
    }

    /// The next filter in menu order, wrapping around
    pub fn cycle(&self, recent_days: u32) -> Self {
        match self {
            Self::All => Self::LastDays(recent_days),
            Self::LastDays(_) => Self::Expenses,
            Self::Expenses => Self::Income,
            Self::Income => Self::All,
        }
    }

    /// Replace the window of a recent filter
    pub fn with_days(self, days: u32) -> Self {
        match self {
            Self::LastDays(_) => Self::LastDays(days),
            other => other,
        }
    }
}

impl fmt::Display for TransactionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::LastDays(n) => write!(f, "Last {} Days", n),
            Self::Expenses => write!(f, "Only Expenses"),
            Self::Income => write!(f, "Only Income"),
        }
    }
}

impl FromStr for TransactionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "recent" | "last-7-days" | "week" => Ok(Self::LastDays(DEFAULT_RECENT_DAYS)),
            "expenses" | "expense" => Ok(Self::Expenses),
            "income" => Ok(Self::Income),
            other => Err(format!(
                "Unknown filter '{}'. Use all, recent, expenses or income",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn txn(d: &str, kind: TransactionType, minor: i64, desc: &str) -> Transaction {
        Transaction::new(date(d), kind, Money::from_minor(minor), "Other", desc)
    }

    fn mixed() -> Vec<Transaction> {
        vec![
            txn("2024-03-10", TransactionType::Expense, 100, "e1"),
            txn("2024-03-09", TransactionType::Income, 1000, "i1"),
            txn("2024-03-05", TransactionType::Expense, 200, "e2"),
            txn("2024-02-28", TransactionType::Income, 2000, "i2"),
            txn("2024-02-27", TransactionType::Expense, 300, "e3"),
        ]
    }

    fn descriptions(records: &[Transaction]) -> Vec<&str> {
        records.iter().map(|t| t.description.as_str()).collect()
    }

    #[test]
    fn test_filter_by_type_preserves_order() {
        let expenses = filter_by_type(&mixed(), TransactionType::Expense);
        assert_eq!(descriptions(&expenses), vec!["e1", "e2", "e3"]);

        let income = filter_by_type(&mixed(), TransactionType::Income);
        assert_eq!(descriptions(&income), vec!["i1", "i2"]);
    }

    #[test]
    fn test_filter_last_n_days_is_inclusive() {
        let recent = filter_last_n_days(&mixed(), 7, date("2024-03-12"));
        // cutoff 2024-03-05 is kept
        assert_eq!(descriptions(&recent), vec!["e1", "i1", "e2"]);

        let none = filter_last_n_days(&mixed(), 0, date("2024-03-11"));
        assert!(none.is_empty());

        let all = filter_last_n_days(&mixed(), 365, date("2024-03-12"));
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_monthly_totals_scenario() {
        let records = vec![
            Transaction::new(
                date("2024-03-02"),
                TransactionType::Income,
                Money::from_minor(500000),
                "Salary",
                "March pay",
            ),
            Transaction::new(
                date("2024-03-01"),
                TransactionType::Expense,
                Money::from_minor(1250),
                "Food",
                "Lunch",
            ),
        ];

        let totals = monthly_totals(&records, "2024-03".parse().unwrap());
        assert_eq!(totals.total_income.minor(), 500000);
        assert_eq!(totals.total_expenses.minor(), 1250);
        assert_eq!(totals.balance.minor(), 498750);
        assert!(!totals.is_overspent());
    }

    #[test]
    fn test_monthly_totals_ignores_other_months_and_goes_negative() {
        let totals = monthly_totals(&mixed(), "2024-02".parse().unwrap());
        assert_eq!(totals, MonthlyTotals::new(Money::from_minor(2000), Money::from_minor(300)));

        let overspent = vec![txn("2024-04-01", TransactionType::Expense, 700, "rent")];
        let totals = monthly_totals(&overspent, "2024-04".parse().unwrap());
        assert_eq!(totals.balance.minor(), -700);
        assert!(totals.is_overspent());

        assert_eq!(monthly_totals(&[], "2024-04".parse().unwrap()), MonthlyTotals::default());
    }

    #[test]
    fn test_monthly_totals_additive_over_disjoint_sets() {
        let month: YearMonth = "2024-03".parse().unwrap();
        let records = mixed();
        let (left, right) = records.split_at(2);

        let separate = monthly_totals(left, month) + monthly_totals(right, month);
        assert_eq!(monthly_totals(&records, month), separate);

        let summed: MonthlyTotals = records
            .chunks(1)
            .map(|chunk| monthly_totals(chunk, month))
            .sum();
        assert_eq!(monthly_totals(&records, month), summed);
    }

    #[test]
    fn test_monthly_totals_saturate_on_huge_amounts() {
        let records = vec![
            txn("2024-03-01", TransactionType::Income, i64::MAX, "a"),
            txn("2024-03-02", TransactionType::Income, i64::MAX, "b"),
            txn("2024-03-03", TransactionType::Expense, i64::MAX, "c"),
            txn("2024-03-04", TransactionType::Expense, i64::MAX, "d"),
        ];

        let totals = monthly_totals(&records, "2024-03".parse().unwrap());
        assert_eq!(totals.total_income.minor(), i64::MAX);
        assert_eq!(totals.total_expenses.minor(), i64::MAX);
        assert_eq!(totals.balance.minor(), 0);
    }

    #[test]
    fn test_filter_enum() {
        let today = date("2024-03-12");
        assert_eq!(TransactionFilter::All.apply(&mixed(), today).len(), 5);
        assert_eq!(TransactionFilter::Income.apply(&mixed(), today).len(), 2);
        assert_eq!(TransactionFilter::LastDays(7).apply(&mixed(), today).len(), 3);

        let mut filter = TransactionFilter::All;
        for _ in 0..4 {
            filter = filter.cycle(7);
        }
        assert_eq!(filter, TransactionFilter::All);
        assert_eq!(TransactionFilter::All.cycle(14), TransactionFilter::LastDays(14));
    }

    #[test]
    fn test_filter_parse_and_label() {
        assert_eq!("recent".parse::<TransactionFilter>().unwrap(), TransactionFilter::LastDays(7));
        assert_eq!("Expenses".parse::<TransactionFilter>().unwrap(), TransactionFilter::Expenses);
        assert!("transfers".parse::<TransactionFilter>().is_err());

        assert_eq!(TransactionFilter::LastDays(7).to_string(), "Last 7 Days");
        assert_eq!(TransactionFilter::Income.to_string(), "Only Income");
        assert_eq!(TransactionFilter::LastDays(7).with_days(30), TransactionFilter::LastDays(30));
        assert_eq!(TransactionFilter::All.with_days(30), TransactionFilter::All);
    }
}
