//! Transaction display formatting
//!
//! Plain-text renderings used by the CLI and the terminal menu. The
//! dashboard builds its own styled widgets from the same data.

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Money, Transaction, TransactionType, YearMonth};
use crate::services::MonthlyTotals;

/// Render an amount with the configured currency prefix
pub fn format_amount(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category/Source")]
    label: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl RegisterRow {
    fn new(txn: &Transaction, symbol: &str) -> Self {
        let amount = format_amount(txn.amount, symbol);
        Self {
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.to_string(),
            amount: match txn.kind {
                TransactionType::Expense => format!("- {}", amount),
                TransactionType::Income => format!("+ {}", amount),
            },
            label: txn.category_or_source.clone(),
            description: txn.description.clone(),
        }
    }
}

/// Format a list of transactions as a table
pub fn format_transaction_table(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions recorded yet.\n".to_string();
    }

    let rows: Vec<RegisterRow> = transactions
        .iter()
        .map(|txn| RegisterRow::new(txn, symbol))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&format!("{} transaction(s)\n", transactions.len()));
    output
}

/// Confirmation printed after a successful add
pub fn format_created(txn: &Transaction, symbol: &str) -> String {
    let mut output = String::from("Transaction added successfully!\n");
    output.push_str(&format!("  Date:     {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("  Type:     {}\n", txn.kind));
    output.push_str(&format!("  Amount:   {}\n", format_amount(txn.amount, symbol)));
    output.push_str(&format!(
        "  {:<9} {}\n",
        format!("{}:", txn.kind.label_field_name()),
        txn.category_or_source
    ));
    if !txn.description.is_empty() {
        output.push_str(&format!("  Memo:     {}\n", txn.description));
    }
    output
}

/// Monthly balance block
pub fn format_monthly_summary(month: YearMonth, totals: &MonthlyTotals, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Monthly Balance for {}\n", month));
    output.push_str(&"-".repeat(32));
    output.push('\n');
    output.push_str(&format!(
        "{:<16}{:>16}\n",
        "Total Income",
        format_amount(totals.total_income, symbol)
    ));
    output.push_str(&format!(
        "{:<16}{:>16}\n",
        "Total Expenses",
        format_amount(totals.total_expenses, symbol)
    ));
    output.push_str(&format!(
        "{:<16}{:>16}\n",
        "Current Balance",
        format_amount(totals.balance, symbol)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn lunch() -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            TransactionType::Expense,
            Money::from_minor(1250),
            "Food",
            "Lunch",
        )
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[], "Rs "), "No transactions recorded yet.\n");
    }

    #[test]
    fn test_table_contains_fields() {
        let output = format_transaction_table(&[lunch()], "Rs ");
        assert!(output.contains("Category/Source"));
        assert!(output.contains("2024-03-01"));
        assert!(output.contains("- Rs 12.50"));
        assert!(output.contains("Lunch"));
        assert!(output.contains("1 transaction(s)"));
    }

    #[test]
    fn test_monthly_summary() {
        let totals = MonthlyTotals::new(Money::from_minor(500000), Money::from_minor(1250));
        let output = format_monthly_summary("2024-03".parse().unwrap(), &totals, "Rs ");
        assert!(output.starts_with("Monthly Balance for 2024-03"));
        assert!(output.contains("Rs 5000.00"));
        assert!(output.contains("Rs 12.50"));
        assert!(output.contains("Rs 4987.50"));
    }

    #[test]
    fn test_created_message() {
        let output = format_created(&lunch(), "$");
        assert!(output.contains("Transaction added successfully!"));
        assert!(output.contains("Category: Food"));
        assert!(output.contains("$12.50"));
    }
}
