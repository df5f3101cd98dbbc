//! Interactive terminal menu
//!
//! Numbered menus read from any `BufRead`. The top level offers "Manage
//! Transactions", "Manage Budgets" and "Exit". End of input behaves like Exit.

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::config::settings::Settings;
use crate::display::{format_created, format_monthly_summary, format_transaction_table};
use crate::models::{TransactionType, YearMonth};
use crate::services::{monthly_totals, CreateTransactionInput, TransactionFilter, TransactionService};
use crate::storage::Storage;

const MAIN_CHOICES: &[&str] = &["Manage Transactions", "Manage Budgets", "Exit"];
const TRANSACTION_CHOICES: &[&str] = &[
    "Add Transaction",
    "View Transactions",
    "Monthly Balance",
    "Back",
];

/// Whether the menu loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// The terminal menu with its input and output streams
pub struct Menu<'a, R, W> {
    storage: &'a Storage,
    settings: &'a Settings,
    today: NaiveDate,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(storage: &'a Storage, settings: &'a Settings, today: NaiveDate, input: R, output: W) -> Self {
        Self {
            storage,
            settings,
            today,
            input,
            output,
        }
    }

    /// Run until the user picks Exit or input ends
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", banner("Welcome", "Personal Finance Tracker CLI"))?;

        loop {
            let choice = self.select("What would you like to do?", MAIN_CHOICES)?;
            debug!(?choice, "main menu selection");

            let flow = match choice {
                Some(0) => self.manage_transactions()?,
                Some(1) => {
                    writeln!(self.output, "Budget management features are under development.")?;
                    Flow::Continue
                }
                _ => Flow::Exit,
            };

            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(
            self.output,
            "{}",
            banner("Goodbye", "Thank you for using the Finance Tracker!")
        )?;
        Ok(())
    }

    fn manage_transactions(&mut self) -> Result<Flow> {
        loop {
            match self.select("Transactions", TRANSACTION_CHOICES)? {
                Some(0) => {
                    if self.add_transaction()? == Flow::Exit {
                        return Ok(Flow::Exit);
                    }
                }
                Some(1) => {
                    if self.view_transactions()? == Flow::Exit {
                        return Ok(Flow::Exit);
                    }
                }
                Some(2) => self.monthly_balance()?,
                Some(_) => return Ok(Flow::Continue),
                None => return Ok(Flow::Exit),
            }
        }
    }

    fn add_transaction(&mut self) -> Result<Flow> {
        let Some(kind) = self.select("Select Type", &["Expense", "Income"])? else {
            return Ok(Flow::Exit);
        };
        let kind = if kind == 0 {
            TransactionType::Expense
        } else {
            TransactionType::Income
        };

        let Some(amount) = self.prompt("Amount (e.g., 12.50): ")? else {
            return Ok(Flow::Exit);
        };

        let title = match kind {
            TransactionType::Expense => "Select Category",
            TransactionType::Income => "Select Income Source",
        };
        let labels = kind.default_labels();
        let Some(label) = self.select(title, labels)? else {
            return Ok(Flow::Exit);
        };

        let Some(description) = self.prompt("Description: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(date) = self.prompt(&format!("Date [{}]: ", self.today.format("%Y-%m-%d")))? else {
            return Ok(Flow::Exit);
        };

        let input = CreateTransactionInput {
            kind,
            amount,
            category_or_source: labels[label].to_string(),
            description,
            date: Some(date),
        };

        match TransactionService::new(self.storage).create(input, self.today) {
            Ok(txn) => write!(
                self.output,
                "{}",
                format_created(&txn, &self.settings.currency_symbol)
            )?,
            Err(e) if e.is_validation() => writeln!(self.output, "Error: {}", e)?,
            Err(e) => return Err(e.into()),
        }

        Ok(Flow::Continue)
    }

    fn view_transactions(&mut self) -> Result<Flow> {
        let filters = TransactionFilter::choices(self.settings.recent_days);
        let labels: Vec<String> = filters.iter().map(|f| f.to_string()).collect();
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();

        let Some(index) = self.select("Filter Transactions", &labels)? else {
            return Ok(Flow::Exit);
        };

        let transactions = TransactionService::new(self.storage).list(filters[index], self.today)?;
        write!(
            self.output,
            "{}",
            format_transaction_table(&transactions, &self.settings.currency_symbol)
        )?;
        Ok(Flow::Continue)
    }

    fn monthly_balance(&mut self) -> Result<()> {
        let records = TransactionService::new(self.storage).list_all()?;
        if records.is_empty() {
            writeln!(self.output, "No transactions for the current month yet.")?;
            return Ok(());
        }

        let month = YearMonth::of(self.today);
        let totals = monthly_totals(&records, month);
        write!(
            self.output,
            "{}",
            format_monthly_summary(month, &totals, &self.settings.currency_symbol)
        )?;
        Ok(())
    }

    /// Ask for one of `choices` by number; `None` on end of input
    fn select(&mut self, title: &str, choices: &[&str]) -> Result<Option<usize>> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", title)?;
            for (i, choice) in choices.iter().enumerate() {
                writeln!(self.output, "  {}) {}", i + 1, choice)?;
            }

            let Some(answer) = self.prompt("> ")? else {
                return Ok(None);
            };

            match answer.trim().parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => writeln!(
                    self.output,
                    "Please enter a number between 1 and {}.",
                    choices.len()
                )?,
            }
        }
    }

    /// Print `message` and read one line; `None` on end of input
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// A titled box around one centered line of text
fn banner(title: &str, text: &str) -> String {
    let inner = text.chars().count().max(title.chars().count() + 2) + 4;
    let title_part = format!(" {} ", title);
    let left = (inner - title_part.chars().count()) / 2;
    let right = inner - title_part.chars().count() - left;

    let pad = inner - text.chars().count();
    let text_left = pad / 2;

    format!(
        "╭{}{}{}╮\n│{}{}{}│\n╰{}╯",
        "─".repeat(left),
        title_part,
        "─".repeat(right),
        " ".repeat(text_left),
        text,
        " ".repeat(pad - text_left),
        "─".repeat(inner),
    )
}
