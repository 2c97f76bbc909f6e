//! Input processing for the terminal host.
//!
//! The keyboard drives a focus cell that plays the role of the mouse pointer.
//! This module owns the key bindings so the rest of the application only sees
//! pointer-like [`KeyAction`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use game_core::CellIndex;

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Focus moved from one cell to another.
    Hover { from: CellIndex, to: CellIndex },
    /// The focused cell was activated.
    Click(CellIndex),
    NewGame,
    SaveGame,
    LoadGame,
    /// No meaningful command was produced.
    None,
}

#[derive(Clone, Copy, Debug)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Translates `KeyEvent`s into pointer commands over a square board.
pub struct InputHandler {
    size: usize,
    focus: CellIndex,
}

impl InputHandler {
    pub fn new(size: usize) -> Self {
        Self {
            size: size.max(1),
            focus: CellIndex(0),
        }
    }

    pub fn focus(&self) -> CellIndex {
        self.focus
    }

    /// Adopts a new board size, clamping the focus onto the board.
    ///
    /// Returns `true` when the focus had to move.
    pub fn resize(&mut self, size: usize) -> bool {
        self.size = size.max(1);
        let cells = self.size * self.size;
        if self.focus.0 >= cells {
            self.focus = CellIndex(cells - 1);
            return true;
        }
        false
    }

    /// Converts a raw key event into a higher-level command.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }
        match key.code {
            KeyCode::Char(ch) => self.handle_char(ch),
            KeyCode::Left => self.shift(Direction::Left),
            KeyCode::Right => self.shift(Direction::Right),
            KeyCode::Up => self.shift(Direction::Up),
            KeyCode::Down => self.shift(Direction::Down),
            KeyCode::Enter => KeyAction::Click(self.focus),
            KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    fn handle_char(&mut self, raw: char) -> KeyAction {
        match raw.to_ascii_lowercase() {
            'q' => KeyAction::Quit,
            'h' => self.shift(Direction::Left),
            'j' => self.shift(Direction::Down),
            'k' => self.shift(Direction::Up),
            'l' => self.shift(Direction::Right),
            ' ' => KeyAction::Click(self.focus),
            'n' => KeyAction::NewGame,
            's' => KeyAction::SaveGame,
            'o' => KeyAction::LoadGame,
            _ => KeyAction::None,
        }
    }

    fn shift(&mut self, direction: Direction) -> KeyAction {
        let (row, col) = (self.focus.0 / self.size, self.focus.0 % self.size);
        let last = self.size - 1;
        let (row, col) = match direction {
            Direction::Up if row > 0 => (row - 1, col),
            Direction::Down if row < last => (row + 1, col),
            Direction::Left if col > 0 => (row, col - 1),
            Direction::Right if col < last => (row, col + 1),
            _ => return KeyAction::None,
        };

        let from = self.focus;
        self.focus = CellIndex(row * self.size + col);
        KeyAction::Hover {
            from,
            to: self.focus,
        }
    }
}
