//! Sidebar view
//!
//! Shows the app title and the page switcher

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::tui::app::{App, Page};
use crate::tui::layout::SidebarLayout;

/// Render the sidebar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = SidebarLayout::new(area);

    render_header(frame, layout.header);
    render_pages(frame, app, layout.pages);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Finance Tracker ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let version = Paragraph::new(concat!("v", env!("CARGO_PKG_VERSION")))
        .block(block)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(version, area);
}

fn render_pages(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Navigation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let pages = [
        ("1", Page::Transactions),
        ("2", Page::Budgets),
        ("3", Page::Analytics),
    ];

    let items: Vec<ListItem> = pages
        .iter()
        .map(|(key, page)| {
            let active = app.page == *page;
            let style = if active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let indicator = if active { "▶" } else { " " };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", indicator), style),
                Span::styled(format!("[{}] ", key), Style::default().fg(Color::Yellow)),
                Span::styled(page.title(), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
