//! Terminal dashboard
//!
//! A ratatui dashboard over the same store the CLI and menu use. A sidebar
//! switches between the Transactions page (add form, filtered table,
//! monthly summary) and placeholder Budgets and Analytics pages.

pub mod app;
pub mod event;
pub mod form;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_dashboard;
