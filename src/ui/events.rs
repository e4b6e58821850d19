//! Event handling for the ratatui TUI
//!
//! Maps key presses to state changes, one handler per mode.

use super::state::{AppState, Mode};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Leave the editor
    Exit,
    /// No action taken
    Ignored,
}

/// Handle events in the main list view
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_exit = true;
            EventResult::Exit
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.cursor_up();
            EventResult::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.cursor_down();
            EventResult::Continue
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            state.open_picker();
            EventResult::Continue
        }
        KeyCode::Char('a') => {
            state.append_line();
            EventResult::Continue
        }
        KeyCode::Char('d') => {
            state.begin_discount();
            EventResult::Continue
        }
        KeyCode::Char('t') => {
            state.toggle_discount_type();
            EventResult::Continue
        }
        KeyCode::Char('v') => {
            state.toggle_variants();
            EventResult::Continue
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            state.remove_current();
            EventResult::Continue
        }
        KeyCode::Char('m') => {
            state.begin_grab();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Handle events while a discount value is typed
fn handle_discount_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            state.discount_push(c);
            EventResult::Continue
        }
        KeyCode::Char('t') => {
            state.toggle_discount_type();
            EventResult::Continue
        }
        KeyCode::Backspace => {
            state.discount_backspace();
            EventResult::Continue
        }
        KeyCode::Enter | KeyCode::Esc => {
            state.finish_discount();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Handle events while a row is grabbed
fn handle_grab_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.grab_up();
            EventResult::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.grab_down();
            EventResult::Continue
        }
        KeyCode::Enter | KeyCode::Char('m') => {
            state.drop_grab();
            EventResult::Continue
        }
        KeyCode::Esc => {
            state.cancel_grab();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Handle events in the picker dialog
fn handle_picker_mode(state: &mut AppState, key: KeyEvent, now: Instant) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            state.close_picker();
            EventResult::Continue
        }
        (KeyCode::Enter, _) => {
            state.confirm_picker();
            EventResult::Continue
        }
        (KeyCode::Up, _) => {
            state.picker_up();
            EventResult::Continue
        }
        (KeyCode::Down, _) => {
            state.picker_down();
            EventResult::Continue
        }
        (KeyCode::Tab, _) => {
            state.picker_toggle();
            EventResult::Continue
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            state.query_push(c, now);
            EventResult::Continue
        }
        (KeyCode::Backspace, _) => {
            if state.picker_query.is_empty() {
                EventResult::Ignored
            } else {
                state.query_backspace(now);
                EventResult::Continue
            }
        }
        _ => EventResult::Ignored,
    }
}

/// Route a key press to the handler for the current mode
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) -> EventResult {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.should_exit = true;
        return EventResult::Exit;
    }

    match state.mode {
        Mode::Normal => handle_normal_mode(state, key),
        Mode::EditDiscount(_) => handle_discount_mode(state, key),
        Mode::Grab(_) => handle_grab_mode(state, key),
        Mode::Picker => handle_picker_mode(state, key, now),
    }
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(state: &mut AppState, timeout: Duration) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            handle_key(state, key, Instant::now())
        }
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}
