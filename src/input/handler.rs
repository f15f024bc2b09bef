use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

use crate::game::{Direction, InputPort};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A directional key; the direction is already recorded
    Turn(Direction),
    /// Pause when playing, resume when paused
    TogglePause,
    Quit,
    None,
}

/// Keyboard adapter: turns key presses into directions and control actions
///
/// Keeps only the most recent direction. Nothing is recorded while it is not listening.
#[derive(Debug, Default)]
pub struct InputHandler {
    listening: bool,
    last_direction: Option<Direction>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let direction = match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Direction::Up,
            KeyCode::Char('s') | KeyCode::Char('S') => Direction::Down,
            KeyCode::Char('a') | KeyCode::Char('A') => Direction::Left,
            KeyCode::Char('d') | KeyCode::Char('D') => Direction::Right,

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
                return KeyAction::TogglePause
            }

            _ => return KeyAction::None,
        };

        if !self.listening {
            return KeyAction::None;
        }
        debug!("direction requested: {:?}", direction);
        self.last_direction = Some(direction);
        KeyAction::Turn(direction)
    }
}

impl InputPort for InputHandler {
    fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    fn start_listening(&mut self) {
        self.listening = true;
    }

    fn stop_listening(&mut self) {
        self.listening = false;
    }
}
