//! Keyboard Input Handler
//!
//! Maps crossterm key events onto `AppState` actions for the mounted screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use harimu_core::{Direction, View};

use crate::app::AppState;

/// Handles a single key event. Releases and repeats are ignored.
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    state.interaction();

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.quit();
            return;
        }
        KeyCode::Esc => {
            state.quit();
            return;
        }
        KeyCode::F(2) => {
            state.toggle_mute();
            return;
        }
        _ => {}
    }

    match state.view() {
        View::Landing => handle_landing(key, state),
        View::Mood => handle_mood(key, state),
        View::StressRelief => handle_relief(key, state),
        View::Chat => handle_chat(key, state),
        View::Ending => handle_ending(key, state),
    }
}

fn handle_landing(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Enter => state.submit_name(),
        KeyCode::Backspace => state.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => state.type_char(c),
        _ => {}
    }
}

fn handle_mood(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.move_highlight(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => state.move_highlight(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => state.move_highlight(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => state.move_highlight(Direction::Right),
        KeyCode::Enter => state.select_highlighted_mood(),
        KeyCode::Char(c @ '1'..='4') => state.pick_mood(digit_index(c)),
        KeyCode::Char('r') => state.refresh_affirmation(),
        KeyCode::Char('m') => state.toggle_mute(),
        _ => {}
    }
}

fn handle_relief(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char(c @ '1'..='6') => {
            let index = digit_index(c);
            state.pop_balloon(index);
            state.give_treat(index);
        }
        KeyCode::Enter => state.continue_relief(),
        KeyCode::Char('m') => state.toggle_mute(),
        _ => {}
    }
}

fn handle_chat(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char(c @ '1'..='9') => state.choose(digit_index(c)),
        KeyCode::Up | KeyCode::Char('k') => state.move_choice(-1),
        KeyCode::Down | KeyCode::Char('j') => state.move_choice(1),
        KeyCode::Enter => state.confirm_chat(),
        KeyCode::Char('m') => state.toggle_mute(),
        _ => {}
    }
}

fn handle_ending(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('h') => state.send_hug(),
        KeyCode::Char('o') => state.open_profile(),
        KeyCode::Char('r') => state.restart(),
        KeyCode::Char('m') => state.toggle_mute(),
        _ => {}
    }
}

fn digit_index(c: char) -> usize {
    c.to_digit(10).map_or(0, |d| d as usize).saturating_sub(1)
}
