//! Button state read by every mode, and the terminal adapter that produces it.
//!
//! Terminals only report key presses (plus auto-repeat), so the adapter keeps
//! a button "held" for a short window after its last press. With keyboard
//! enhancement enabled, release events end the hold immediately.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// How long a press counts as held without a repeat or release.
pub const KEY_HOLD_WINDOW: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    ToggleMenu,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Confirm,
        Button::ToggleMenu,
    ];
}

/// Snapshot of button states for one tick. The core only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
    pub toggle_menu: bool,
}

impl InputState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn pressed(button: Button) -> Self {
        Self::none().with(button, true)
    }

    pub fn with(mut self, button: Button, down: bool) -> Self {
        match button {
            Button::Up => self.up = down,
            Button::Down => self.down = down,
            Button::Left => self.left = down,
            Button::Right => self.right = down,
            Button::Confirm => self.confirm = down,
            Button::ToggleMenu => self.toggle_menu = down,
        }
        self
    }

    pub fn is_down(&self, button: Button) -> bool {
        match button {
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Confirm => self.confirm,
            Button::ToggleMenu => self.toggle_menu,
        }
    }
}

/// Terminal key mapping: arrows/WASD move, Space/Enter confirm, M/Esc menu.
pub fn button_for_key(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Button::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Button::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Button::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Button::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Button::Confirm),
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => Some(Button::ToggleMenu),
        _ => None,
    }
}

/// True for the keys that end the program.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Turns a stream of key events into held-button snapshots.
#[derive(Debug, Default)]
pub struct KeyHold {
    last_press: [Option<Instant>; 6],
}

impl KeyHold {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(button: Button) -> usize {
        match button {
            Button::Up => 0,
            Button::Down => 1,
            Button::Left => 2,
            Button::Right => 3,
            Button::Confirm => 4,
            Button::ToggleMenu => 5,
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) {
        let Some(button) = button_for_key(key.code) else {
            return;
        };
        let slot = Self::slot(button);
        match key.kind {
            KeyEventKind::Release => self.last_press[slot] = None,
            KeyEventKind::Press | KeyEventKind::Repeat => self.last_press[slot] = Some(now),
        }
    }

    pub fn snapshot(&self, now: Instant) -> InputState {
        Button::ALL.iter().fold(InputState::none(), |state, &button| {
            let held = self.last_press[Self::slot(button)]
                .is_some_and(|at| now.saturating_duration_since(at) < KEY_HOLD_WINDOW);
            state.with(button, held)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_input_state_with_and_is_down() {
        let state = InputState::pressed(Button::Confirm).with(Button::Left, true);
        assert!(state.confirm);
        assert!(state.is_down(Button::Left));
        assert!(!state.is_down(Button::Up));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(button_for_key(KeyCode::Char('w')), Some(Button::Up));
        assert_eq!(button_for_key(KeyCode::Enter), Some(Button::Confirm));
        assert_eq!(button_for_key(KeyCode::Esc), Some(Button::ToggleMenu));
        assert_eq!(button_for_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key(&press(KeyCode::Char('q'))));
        assert!(is_quit_key(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit_key(&press(KeyCode::Char('c'))));
    }

    #[test]
    fn test_hold_window_expires() {
        let start = Instant::now();
        let mut hold = KeyHold::new();
        hold.handle_key(&press(KeyCode::Right), start);
        assert!(hold.snapshot(start).right);
        assert!(hold.snapshot(start + Duration::from_millis(100)).right);
        assert!(!hold.snapshot(start + KEY_HOLD_WINDOW).right);
    }

    #[test]
    fn test_release_ends_hold() {
        let start = Instant::now();
        let mut hold = KeyHold::new();
        hold.handle_key(&press(KeyCode::Up), start);
        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        hold.handle_key(&release, start);
        assert!(!hold.snapshot(start).up);
    }
}
