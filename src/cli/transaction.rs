//! Transaction CLI commands
//!
//! Non-interactive `add`, `list` and `summary` commands.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_created, format_monthly_summary, format_transaction_table};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{TransactionType, YearMonth};
use crate::services::{CreateTransactionInput, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Amount in major units, e.g. "12.50"
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// expense or income
        #[arg(short = 't', long = "type", default_value = "expense", value_parser = parse_transaction_type)]
        kind: TransactionType,
        /// Category (expenses) or source (income)
        #[arg(short, long, default_value = "Other")]
        category: String,
        /// Free-text description
        #[arg(short = 'm', long, alias = "memo", default_value = "")]
        description: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// all, recent, expenses or income
        #[arg(short, long, default_value = "all")]
        filter: TransactionFilter,
        /// Window for the recent filter (defaults to the configured value)
        #[arg(long)]
        days: Option<u32>,
        /// Show at most this many transactions
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show income, expenses and balance for a month
    Summary {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
}

fn parse_transaction_type(s: &str) -> Result<TransactionType, String> {
    TransactionType::parse_loose(s)
        .ok_or_else(|| format!("unknown type '{}'. Use expense or income", s))
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
    today: NaiveDate,
) -> TrackerResult<()> {
    let service = TransactionService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            amount,
            kind,
            category,
            description,
            date,
        } => {
            let input = CreateTransactionInput {
                kind,
                amount,
                category_or_source: category,
                description,
                date,
            };
            let txn = service.create(input, today)?;
            print!("{}", format_created(&txn, symbol));
        }

        TransactionCommands::List {
            filter,
            days,
            limit,
            json,
        } => {
            let filter = filter.with_days(days.unwrap_or(settings.recent_days));
            let mut transactions = service.list(filter, today)?;
            if let Some(limit) = limit {
                transactions.truncate(limit);
            }

            if json {
                let json = serde_json::to_string_pretty(&transactions)
                    .map_err(TrackerError::from)?;
                println!("{}", json);
            } else {
                println!("Filter: {}", filter);
                print!("{}", format_transaction_table(&transactions, symbol));
            }
        }

        TransactionCommands::Summary { month } => {
            let month = month.unwrap_or_else(|| YearMonth::of(today));
            let totals = service.monthly_summary(month)?;
            print!("{}", format_monthly_summary(month, &totals, symbol));
        }
    }

    Ok(())
}
