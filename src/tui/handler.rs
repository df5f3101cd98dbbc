//! Event handler for the dashboard
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! page, tab and input mode.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error};

use super::app::{App, InputMode, Page, TransactionTab};
use super::event::Event;
use super::form::FormField;
use crate::services::TransactionService;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => Ok(()),
        Event::Resize(_, _) => Ok(()),
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_editing_key(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Global keys
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('1') => {
            app.switch_page(Page::Transactions);
            return Ok(());
        }
        KeyCode::Char('2') => {
            app.switch_page(Page::Budgets);
            return Ok(());
        }
        KeyCode::Char('3') => {
            app.switch_page(Page::Analytics);
            return Ok(());
        }
        _ => {}
    }

    if app.page != Page::Transactions {
        return Ok(());
    }

    match key.code {
        KeyCode::Tab | KeyCode::Right => {
            app.switch_tab(app.tab.next());
            return Ok(());
        }
        KeyCode::BackTab | KeyCode::Left => {
            app.switch_tab(app.tab.prev());
            return Ok(());
        }
        KeyCode::Char('r') => {
            app.refresh();
            app.set_status("Reloaded transactions");
            return Ok(());
        }
        _ => {}
    }

    match app.tab {
        TransactionTab::Add => handle_add_tab_key(app, key),
        TransactionTab::View => handle_view_tab_key(app, key),
        TransactionTab::Monthly => Ok(()),
    }
}

fn handle_add_tab_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('a') | KeyCode::Char('i') => {
            app.input_mode = InputMode::Editing;
            app.clear_status();
        }
        KeyCode::Char('t') => app.form.toggle_kind(),
        _ => {}
    }
    Ok(())
}

fn handle_view_tab_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('f') => app.cycle_filter(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Home | KeyCode::Char('g') => app.selected_row = 0,
        _ => {}
    }
    Ok(())
}

/// Handle keys while the add form has focus
fn handle_editing_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            return Ok(());
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.form.prev_field();
            } else {
                app.form.next_field();
            }
            return Ok(());
        }
        KeyCode::BackTab => {
            app.form.prev_field();
            return Ok(());
        }
        KeyCode::Enter => {
            submit_form(app);
            return Ok(());
        }
        _ => {}
    }

    let form = &mut app.form;
    match form.focused_field {
        FormField::Type => {
            if matches!(
                key.code,
                KeyCode::Left
                    | KeyCode::Right
                    | KeyCode::Up
                    | KeyCode::Down
                    | KeyCode::Char(' ')
                    | KeyCode::Char('t')
            ) {
                form.toggle_kind();
            }
        }
        FormField::Category if matches!(key.code, KeyCode::Up | KeyCode::Down) => {
            form.cycle_category(key.code == KeyCode::Down);
        }
        _ => {
            if let Some(input) = form.focused_input() {
                match key.code {
                    KeyCode::Char(c) => input.insert(c),
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Delete => input.delete(),
                    KeyCode::Left => input.move_left(),
                    KeyCode::Right => input.move_right(),
                    KeyCode::Home => input.move_start(),
                    KeyCode::End => input.move_end(),
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

/// Validate and append the form's transaction
fn submit_form(app: &mut App) {
    let service = TransactionService::new(app.storage);
    match service.create(app.form.to_input(), app.today) {
        Ok(txn) => {
            app.form.set_success("Transaction added successfully!");
            app.form.reset(app.today);
            app.refresh();
            app.set_status(format!(
                "Added {} of {}",
                txn.kind,
                txn.amount.format_with_symbol(&app.settings.currency_symbol)
            ));
        }
        Err(e) if e.is_validation() => {
            debug!(error = %e, "rejected form input");
            app.form.set_error(e.to_string());
        }
        Err(e) => {
            error!(error = %e, "failed to save transaction");
            app.form.set_error(format!("Failed to save: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, TrackerPaths};
    use crate::models::{Money, TransactionType};
    use crate::storage::Storage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let storage = Storage::new(paths, &settings).unwrap();
        (temp_dir, storage, settings)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_and_page_keys() {
        let (_temp_dir, storage, settings) = setup();
        let mut app = App::new(&storage, &settings, today());

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.page, Page::Analytics);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.page, Page::Transactions);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, TransactionTab::View);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.tab, TransactionTab::Add);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_submit_form_appends_and_clears() {
        let (_temp_dir, storage, settings) = setup();
        let mut app = App::new(&storage, &settings, today());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Editing);

        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "12.50");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Lunch");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.form.success_message.as_deref(), Some("Transaction added successfully!"));
        assert_eq!(app.form.amount_input.value(), "");
        assert_eq!(app.records.len(), 1);

        let stored = storage.transactions.load_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].kind, TransactionType::Expense);
        assert_eq!(stored[0].amount, Money::from_minor(1250));
        assert_eq!(stored[0].category_or_source, "Food");
        assert_eq!(stored[0].description, "Lunch");
        assert_eq!(stored[0].date, today());
    }

    #[test]
    fn test_invalid_amount_shows_error_without_writing() {
        let (_temp_dir, storage, settings) = setup();
        let mut app = App::new(&storage, &settings, today());

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "-5");
        press(&mut app, KeyCode::Enter);

        assert!(app.form.error_message.is_some());
        assert_eq!(app.form.amount_input.value(), "-5");
        assert!(!storage.transactions.path().exists());
    }

    #[test]
    fn test_type_toggle_and_filter_cycle() {
        let (_temp_dir, storage, settings) = setup();
        let mut app = App::new(&storage, &settings, today());

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.form.kind, TransactionType::Income);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.filter.to_string(), "Last 7 Days");
    }
}
