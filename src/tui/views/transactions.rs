//! Transactions page
//!
//! Tab bar plus the Add form, the filtered table and the monthly summary

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

use crate::display::format_amount;
use crate::models::{Money, TransactionType};
use crate::tui::app::{App, TransactionTab};
use crate::tui::form;
use crate::tui::layout::{MainPanelLayout, SummaryLayout};

/// Render the Transactions page
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = MainPanelLayout::new(area);

    render_tabs(frame, app, layout.header);

    match app.tab {
        TransactionTab::Add => form::render(frame, app, layout.content),
        TransactionTab::View => render_table(frame, app, layout.content),
        TransactionTab::Monthly => render_summary(frame, app, layout.content),
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TransactionTab::ALL
        .iter()
        .map(|tab| Line::from(tab.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Transactions ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(app.tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Filter: {} (f to change) ", app.filter))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let records = app.visible_records();
    if records.is_empty() {
        let message = if app.records.is_empty() {
            "No transactions recorded yet."
        } else {
            "No transactions match this filter."
        };
        let text = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Length(9),  // Type
        Constraint::Length(16), // Amount
        Constraint::Length(16), // Category/Source
        Constraint::Min(10),    // Description
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Date").style(bold),
        Cell::from("Type").style(bold),
        Cell::from("Amount").style(bold),
        Cell::from("Category/Source").style(bold),
        Cell::from("Description").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let symbol = app.settings.currency_symbol.as_str();
    let rows: Vec<Row> = records
        .iter()
        .map(|txn| {
            let color = match txn.kind {
                TransactionType::Expense => Color::Red,
                TransactionType::Income => Color::Green,
            };

            Row::new(vec![
                Cell::from(txn.date.format("%Y-%m-%d").to_string()),
                Cell::from(txn.kind.to_string()),
                Cell::from(format_amount(txn.amount, symbol)),
                Cell::from(truncate_string(&txn.category_or_source, 16)),
                Cell::from(truncate_string(&txn.description, 40)),
            ])
            .style(Style::default().fg(color))
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_row));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Monthly Balance for {} ", app.current_month()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = SummaryLayout::new(inner);
    let totals = app.monthly_totals();
    let balance_color = if totals.is_overspent() {
        Color::Red
    } else {
        Color::Green
    };

    let symbol = app.settings.currency_symbol.as_str();
    metric_box(frame, layout.boxes[0], "Total Income", totals.total_income, symbol, Color::Green);
    metric_box(frame, layout.boxes[1], "Total Expenses", totals.total_expenses, symbol, Color::Red);
    metric_box(frame, layout.boxes[2], "Current Balance", totals.balance, symbol, balance_color);

    if !app.has_current_month_records() {
        let text = Paragraph::new("No transactions for the current month yet.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, layout.message);
    }
}

fn metric_box(frame: &mut Frame, area: Rect, title: &str, amount: Money, symbol: &str, color: Color) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let value = Paragraph::new(Line::from(Span::styled(
        format_amount(amount, symbol),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(value, area);
}

/// Truncate to `max_len` characters
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
