//! Keyboard event handling.
//!
//! Keys are mapped according to the current screen:
//! - list screens: `Up`/`k`, `Down`/`j`, `Enter` to select, `Esc` to go back
//! - the sequence form: typed characters edit the focused field
//! - the exit confirmation: `Left`/`h`, `Right`/`l`, `y` and `n`
//! - `Ctrl+C` anywhere: back to the main menu, or quit from the main menu

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::model::{AppState, Screen};

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Move selection up
    MoveUp,
    /// Move selection down
    MoveDown,
    /// Toggle a yes/no choice
    Toggle,
    /// Confirm the current screen
    Select,
    /// Leave the current screen
    Back,
    /// Ctrl+C
    Interrupt,
    /// Character typed into a text field or answer
    Char(char),
    /// Delete the last character of the focused field
    Backspace,
    /// Terminal resized
    Resize(u16, u16),
}

/// Polls for keyboard events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action for the current screen.
pub fn handle_event(event: Event, screen: &Screen) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, screen),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

fn handle_key_event(key: KeyEvent, screen: &Screen) -> Action {
    // Windows reports releases too
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Interrupt;
    }

    if screen.accepts_text() {
        return handle_text_input(key);
    }

    match screen {
        Screen::ConfirmExit { .. } => handle_confirm(key),
        _ => handle_list(key),
    }
}

/// Menus and message screens.
fn handle_list(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Enter => Action::Select,
        KeyCode::Esc | KeyCode::Char('q') => Action::Back,
        _ => Action::None,
    }
}

fn handle_text_input(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Select,
        KeyCode::Esc => Action::Back,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::Char(c),
        _ => Action::None,
    }
}

fn handle_confirm(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') | KeyCode::Tab => {
            Action::Toggle
        }
        KeyCode::Char(c @ ('y' | 'Y' | 'n' | 'N')) => Action::Char(c),
        KeyCode::Enter => Action::Select,
        KeyCode::Esc => Action::Back,
        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::None => {}
        Action::MoveUp => {
            state.move_up();
        }
        Action::MoveDown => {
            state.move_down();
        }
        Action::Toggle => {
            state.toggle();
        }
        Action::Select => {
            state.select();
        }
        Action::Back => {
            state.back();
        }
        Action::Interrupt => {
            state.interrupt();
        }
        Action::Char(c) => {
            state.input_char(c);
        }
        Action::Backspace => {
            state.backspace();
        }
        Action::Resize(_, _) => {
            // Redrawn on the next loop iteration
        }
    }

    !state.should_quit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeqForm;

    fn menu() -> Screen {
        Screen::MainMenu { selected: 0 }
    }

    #[test]
    fn test_list_navigation() {
        let screen = menu();

        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &screen), Action::MoveDown);

        let key = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &screen), Action::MoveUp);

        let key = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &screen), Action::MoveDown);

        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &screen), Action::Select);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &screen), Action::Back);
    }

    #[test]
    fn test_form_input() {
        let screen = Screen::Sequence(SeqForm::default());

        // Letters are text here, not navigation
        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &screen), Action::Char('j'));

        let key = KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &screen), Action::Char('/'));

        let key = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &screen), Action::Backspace);

        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &screen), Action::Select);
    }

    #[test]
    fn test_confirm_keys() {
        let screen = Screen::ConfirmExit { yes: true };

        let key = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &screen), Action::Toggle);

        let key = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &screen), Action::Char('n'));

        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &screen), Action::None);
    }

    #[test]
    fn test_ctrl_c_everywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key, &menu()), Action::Interrupt);
        assert_eq!(
            handle_key_event(key, &Screen::Sequence(SeqForm::default())),
            Action::Interrupt
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(key, &menu()), Action::None);
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(handle_event(Event::Resize(80, 24), &menu()), Action::Resize(80, 24));
    }
}
