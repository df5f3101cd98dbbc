//! Dashboard views
//!
//! The sidebar, the Transactions page with its three tabs, the placeholder
//! pages and the status bar.

pub mod sidebar;
pub mod status_bar;
pub mod transactions;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Page};
use super::layout::{centered_rect, AppLayout};

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    sidebar::render(frame, app, layout.sidebar);

    match app.page {
        Page::Transactions => transactions::render(frame, app, layout.main),
        Page::Budgets => render_placeholder(
            frame,
            layout.main,
            "Budgets",
            "Budget management features are under development.",
        ),
        Page::Analytics => render_placeholder(
            frame,
            layout.main,
            "Analytics",
            "Financial analytics features are under development.",
        ),
    }

    status_bar::render(frame, app, layout.status_bar);
}

/// Render a page that only carries a notice
fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, notice: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(block, area);

    let text = Paragraph::new(notice)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(text, centered_rect(80, 20, area));
}
