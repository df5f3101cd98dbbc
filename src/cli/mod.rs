//! CLI command handlers
//!
//! This module bridges clap argument parsing and the interactive menu with
//! the service layer.

pub mod menu;
pub mod transaction;

pub use menu::Menu;
pub use transaction::{handle_transaction_command, TransactionCommands};
