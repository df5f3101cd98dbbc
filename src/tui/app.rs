//! Application state for the dashboard
//!
//! The App struct holds all state needed for rendering and handling events.

use chrono::NaiveDate;
use tracing::warn;

use crate::config::settings::Settings;
use crate::models::{Transaction, YearMonth};
use crate::services::{MonthlyTotals, TransactionFilter, TransactionService};
use crate::storage::Storage;

use super::form::TransactionFormState;

/// Sidebar pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Transactions,
    Budgets,
    Analytics,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Transactions => "Transactions",
            Self::Budgets => "Budgets",
            Self::Analytics => "Analytics",
        }
    }
}

/// Tabs on the Transactions page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionTab {
    #[default]
    Add,
    View,
    Monthly,
}

impl TransactionTab {
    pub const ALL: [Self; 3] = [Self::Add, Self::View, Self::Monthly];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Add => "Add Transaction",
            Self::View => "View Transactions",
            Self::Monthly => "Monthly Summary",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Add => 0,
            Self::View => 1,
            Self::Monthly => 2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Add => Self::View,
            Self::View => Self::Monthly,
            Self::Monthly => Self::Add,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Add => Self::Monthly,
            Self::View => Self::Add,
            Self::Monthly => Self::View,
        }
    }
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Keys go to the add form
    Editing,
}

/// Main application state
pub struct App<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,

    /// Date used for defaults, the recent window and the monthly summary
    pub today: NaiveDate,

    pub should_quit: bool,
    pub page: Page,
    pub tab: TransactionTab,
    pub input_mode: InputMode,

    /// Filter for the View tab
    pub filter: TransactionFilter,

    /// All transactions, newest first, as of the last refresh
    pub records: Vec<Transaction>,

    /// Selected row in the View tab
    pub selected_row: usize,

    pub status_message: Option<String>,
    pub form: TransactionFormState,
}

impl<'a> App<'a> {
    /// Create a new App and load the store once
    pub fn new(storage: &'a Storage, settings: &'a Settings, today: NaiveDate) -> Self {
        let mut app = Self {
            storage,
            settings,
            today,
            should_quit: false,
            page: Page::default(),
            tab: TransactionTab::default(),
            input_mode: InputMode::default(),
            filter: TransactionFilter::All,
            records: Vec::new(),
            selected_row: 0,
            status_message: None,
            form: TransactionFormState::new(today),
        };
        app.refresh();
        app
    }

    /// Re-read the store
    pub fn refresh(&mut self) {
        match TransactionService::new(self.storage).list_all() {
            Ok(records) => self.records = records,
            Err(e) => {
                warn!(error = %e, "failed to reload transactions");
                self.set_status(format!("Failed to load transactions: {}", e));
            }
        }
        self.clamp_selection();
    }

    /// Rows shown in the View tab
    pub fn visible_records(&self) -> Vec<Transaction> {
        self.filter.apply(&self.records, self.today)
    }

    pub fn current_month(&self) -> YearMonth {
        YearMonth::of(self.today)
    }

    pub fn monthly_totals(&self) -> MonthlyTotals {
        crate::services::monthly_totals(&self.records, self.current_month())
    }

    /// Whether any transaction falls in the current month
    pub fn has_current_month_records(&self) -> bool {
        let month = self.current_month();
        self.records.iter().any(|t| month.contains(t.date))
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn switch_page(&mut self, page: Page) {
        self.page = page;
        self.input_mode = InputMode::Normal;
    }

    pub fn switch_tab(&mut self, tab: TransactionTab) {
        self.tab = tab;
        self.input_mode = InputMode::Normal;
        self.selected_row = 0;
    }

    /// Advance the View tab filter
    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.cycle(self.settings.recent_days);
        self.selected_row = 0;
    }

    pub fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let max = self.visible_records().len();
        if self.selected_row < max.saturating_sub(1) {
            self.selected_row += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let max = self.visible_records().len();
        if self.selected_row >= max {
            self.selected_row = max.saturating_sub(1);
        }
    }
}
