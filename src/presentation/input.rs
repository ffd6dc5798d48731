use crate::application::{App, AppMode, Screen};
use crate::domain::FilterField;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Picking(_) => Self::handle_picker_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if key == KeyCode::Char('r') {
                app.refresh();
            }
            return;
        }

        match key {
            KeyCode::Char('1') => app.show_screen(Screen::Home),
            KeyCode::Char('2') => app.show_screen(Screen::Questions),
            KeyCode::Tab | KeyCode::BackTab => app.next_screen(),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ if app.screen == Screen::Questions => Self::handle_question_keys(app, key),
            _ => {}
        }
    }

    fn handle_question_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Home => app.selected = 0,
            KeyCode::End => app.selected = app.questions().len().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
            KeyCode::Char('c') => app.open_picker(FilterField::Category),
            KeyCode::Char('s') => app.open_picker(FilterField::SubCategory),
            KeyCode::Char('d') => app.open_picker(FilterField::DifficultyLevel),
            KeyCode::Char('r') => {
                app.refresh();
            }
            _ => {}
        }
    }

    fn handle_picker_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.confirm_picker(),
            KeyCode::Esc => app.cancel_picker(),
            KeyCode::Char('x') | KeyCode::Backspace | KeyCode::Delete => app.clear_picker_field(),
            KeyCode::Up | KeyCode::Char('k') => app.picker_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.picker_next(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
