//! Add-transaction form
//!
//! Form state for the first tab of the Transactions page: type, amount,
//! category/source, description and date, with tab navigation. Validation
//! happens in the service layer on submit.

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::transaction::DATE_FORMAT;
use crate::models::TransactionType;
use crate::services::CreateTransactionInput;
use crate::tui::app::{App, InputMode};
use crate::tui::widgets::input::TextInput;

/// Which field is currently focused in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Type,
    Amount,
    Category,
    Description,
    Date,
}

impl FormField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Type => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::Description,
            Self::Description => Self::Date,
            Self::Date => Self::Type,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Type => Self::Date,
            Self::Amount => Self::Type,
            Self::Category => Self::Amount,
            Self::Description => Self::Category,
            Self::Date => Self::Description,
        }
    }
}

/// State for the add-transaction form
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    pub focused_field: FormField,
    pub kind: TransactionType,
    pub amount_input: TextInput,
    /// Free text, pre-filled from the default labels for `kind`
    pub category_input: TextInput,
    /// Position in the default labels, cycled with Up/Down
    pub category_index: usize,
    pub description_input: TextInput,
    pub date_input: TextInput,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl TransactionFormState {
    /// A blank form dated `today`
    pub fn new(today: NaiveDate) -> Self {
        let kind = TransactionType::Expense;
        let mut state = Self {
            focused_field: FormField::Type,
            kind,
            amount_input: TextInput::new()
                .label("Amount")
                .placeholder("e.g., 12.50"),
            category_input: TextInput::new()
                .label(kind.label_field_name())
                .content(kind.default_labels()[0]),
            category_index: 0,
            description_input: TextInput::new()
                .label("Description")
                .placeholder("Optional note"),
            date_input: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD")
                .content(today.format(DATE_FORMAT).to_string()),
            error_message: None,
            success_message: None,
        };
        state.update_focus();
        state
    }

    /// Clear the form after a successful submit, keeping the chosen type
    pub fn reset(&mut self, today: NaiveDate) {
        let kind = self.kind;
        let success = self.success_message.take();
        *self = Self::new(today);
        self.set_kind(kind);
        self.success_message = success;
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.update_focus();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.amount_input.focused = self.focused_field == FormField::Amount;
        self.category_input.focused = self.focused_field == FormField::Category;
        self.description_input.focused = self.focused_field == FormField::Description;
        self.date_input.focused = self.focused_field == FormField::Date;
    }

    /// The text input behind the focused field; the type field has none
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            FormField::Type => None,
            FormField::Amount => Some(&mut self.amount_input),
            FormField::Category => Some(&mut self.category_input),
            FormField::Description => Some(&mut self.description_input),
            FormField::Date => Some(&mut self.date_input),
        }
    }

    /// Switch type; the category field follows with the new type's labels
    pub fn set_kind(&mut self, kind: TransactionType) {
        self.kind = kind;
        self.category_index = 0;
        self.category_input.label = kind.label_field_name().to_string();
        self.category_input.set_content(kind.default_labels()[0]);
    }

    pub fn toggle_kind(&mut self) {
        self.set_kind(self.kind.toggled());
    }

    /// Step through the default labels for the current type
    pub fn cycle_category(&mut self, forward: bool) {
        let labels = self.kind.default_labels();
        self.category_index = if forward {
            (self.category_index + 1) % labels.len()
        } else {
            (self.category_index + labels.len() - 1) % labels.len()
        };
        self.category_input.set_content(labels[self.category_index]);
    }

    /// Raw input for the service layer
    pub fn to_input(&self) -> CreateTransactionInput {
        CreateTransactionInput {
            kind: self.kind,
            amount: self.amount_input.value().to_string(),
            category_or_source: self.category_input.value().to_string(),
            description: self.description_input.value().to_string(),
            date: Some(self.date_input.value().to_string()),
        }
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.success_message = None;
        self.error_message = Some(msg.into());
    }

    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.error_message = None;
        self.success_message = Some(msg.into());
    }
}

/// Render the form into the tab content area
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(" Add New Transaction ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Type
            Constraint::Length(2), // Amount
            Constraint::Length(2), // Category
            Constraint::Length(2), // Description
            Constraint::Length(2), // Date
            Constraint::Length(2), // Message
            Constraint::Min(1),    // Hints
        ])
        .split(inner);

    render_type_selector(frame, form, editing, rows[0]);
    frame.render_widget(&form.amount_input, rows[1]);
    frame.render_widget(&form.category_input, rows[2]);
    frame.render_widget(&form.description_input, rows[3]);
    frame.render_widget(&form.date_input, rows[4]);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            rows[5],
        );
    } else if let Some(ref success) = form.success_message {
        frame.render_widget(
            Paragraph::new(success.as_str()).style(Style::default().fg(Color::Green)),
            rows[5],
        );
    }

    let hints = if editing {
        "Tab/Shift+Tab: field  ↑/↓: change type or category  Enter: add  Esc: stop editing"
    } else {
        "Enter or a: start editing"
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        rows[6],
    );
}

fn render_type_selector(frame: &mut Frame, form: &TransactionFormState, editing: bool, area: Rect) {
    let focused = editing && form.focused_field == FormField::Type;

    let option = |kind: TransactionType| {
        let selected = form.kind == kind;
        let marker = if selected { "(•) " } else { "( ) " };
        let mut style = Style::default().fg(if selected { Color::White } else { Color::DarkGray });
        if selected && focused {
            style = style.bg(Color::Cyan).fg(Color::Black);
        }
        Span::styled(format!("{}{}", marker, kind), style)
    };

    let line = Line::from(vec![
        Span::styled("Type", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(": "),
        option(TransactionType::Expense),
        Span::raw("  "),
        option(TransactionType::Income),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
    }

    #[test]
    fn test_new_form_defaults() {
        let form = TransactionFormState::new(today());
        assert_eq!(form.kind, TransactionType::Expense);
        assert_eq!(form.category_input.value(), "Food");
        assert_eq!(form.date_input.value(), "2024-03-12");
        assert_eq!(form.focused_field, FormField::Type);
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = TransactionFormState::new(today());
        form.prev_field();
        assert_eq!(form.focused_field, FormField::Date);
        assert!(form.date_input.focused);

        for _ in 0..5 {
            form.next_field();
        }
        assert_eq!(form.focused_field, FormField::Date);
        assert!(form.focused_input().is_some());

        form.next_field();
        assert!(form.focused_input().is_none());
    }

    #[test]
    fn test_toggle_kind_switches_labels() {
        let mut form = TransactionFormState::new(today());
        form.toggle_kind();
        assert_eq!(form.kind, TransactionType::Income);
        assert_eq!(form.category_input.value(), "Salary");
        assert_eq!(form.category_input.label, "Source");

        form.cycle_category(false);
        assert_eq!(form.category_input.value(), "Other");
        form.cycle_category(true);
        assert_eq!(form.category_input.value(), "Salary");
    }

    #[test]
    fn test_to_input_and_reset() {
        let mut form = TransactionFormState::new(today());
        form.toggle_kind();
        form.amount_input.set_content("50");
        form.description_input.set_content("Gift from aunt");

        let input = form.to_input();
        assert_eq!(input.kind, TransactionType::Income);
        assert_eq!(input.amount, "50");
        assert_eq!(input.category_or_source, "Salary");
        assert_eq!(input.date.as_deref(), Some("2024-03-12"));

        form.set_success("Transaction added successfully!");
        form.reset(today());
        assert_eq!(form.amount_input.value(), "");
        assert_eq!(form.kind, TransactionType::Income);
        assert!(form.success_message.is_some());
    }
}
