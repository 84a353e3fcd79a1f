use std::time::SystemTime;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::types::{AppEvent, EventResult};
use crate::app::App;

/// Handle an application event
pub fn handle_event(app: &mut App, event: AppEvent) -> EventResult {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(width, height) => {
            app.resize(width, height);
            EventResult::Continue
        }
        AppEvent::ProcessesLoaded { epoch, processes } => {
            app.apply_processes(epoch, processes, SystemTime::now());
            EventResult::Continue
        }
        AppEvent::FetchFailed { epoch, error } => {
            app.fetch_failed(epoch, error);
            EventResult::Continue
        }
        AppEvent::ProcessKilled { id, kind } => {
            app.process_killed(&id, &kind);
            EventResult::Continue
        }
        AppEvent::KillFailed { id, error } => {
            app.kill_failed(&id, &error);
            EventResult::Continue
        }
        AppEvent::StatusExpired(id) => {
            app.expire_status(id);
            EventResult::Continue
        }
        AppEvent::Quit => EventResult::Exit,
    }
}

/// Handle a key event, returns EventResult
pub fn handle_key(app: &mut App, key: KeyEvent) -> EventResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return EventResult::Exit,
            KeyCode::Char('x') => {
                app.kill_selected();
                return EventResult::Continue;
            }
            _ => {}
        }
    }

    if handle_navigation_key(app, key) {
        return EventResult::Continue;
    }

    if app.table.is_filter_focused() {
        handle_filter_key(app, key);
        return EventResult::Continue;
    }

    match key.code {
        KeyCode::Char('/') => app.table.focus_filter(),
        KeyCode::Char('i') => app.table.increment_interval(),
        KeyCode::Char('d') => app.table.decrement_interval(),
        KeyCode::Esc => app.table.clear_filter(),
        _ => {}
    }
    EventResult::Continue
}

fn handle_navigation_key(app: &mut App, key: KeyEvent) -> bool {
    let page = app.page_rows() as i32;
    match key.code {
        KeyCode::Up => app.table.move_selection(-1),
        KeyCode::Down => app.table.move_selection(1),
        KeyCode::PageUp => app.table.move_selection(-page),
        KeyCode::PageDown => app.table.move_selection(page),
        KeyCode::Home => app.table.select_first(),
        KeyCode::End => app.table.select_last(),
        _ => return false,
    }
    true
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.table.clear_filter(),
        KeyCode::Enter => app.table.blur_filter(),
        KeyCode::Backspace => app.table.pop_filter_char(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.table.push_filter_char(ch);
        }
        _ => {}
    }
}
