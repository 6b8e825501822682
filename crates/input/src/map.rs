//! Key mapping from terminal events to game bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Command;

/// What a physical key means to the game.
///
/// Soft drop is a single binding; its press and release become
/// [`Command::SoftDropStart`] and [`Command::SoftDropEnd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
}

impl Binding {
    /// Command issued when the key goes down.
    pub fn press_command(&self) -> Command {
        match self {
            Binding::MoveLeft => Command::MoveLeft,
            Binding::MoveRight => Command::MoveRight,
            Binding::Rotate => Command::RotateCw,
            Binding::SoftDrop => Command::SoftDropStart,
            Binding::HardDrop => Command::HardDrop,
        }
    }
}

/// Map a key code to its binding.
pub fn key_binding(code: KeyCode) -> Option<Binding> {
    match code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Binding::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Binding::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Binding::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Binding::Rotate),

        KeyCode::Char(' ') => Some(Binding::HardDrop),

        _ => None,
    }
}

/// Binding hit by a key press. Control chords never drive the game.
pub fn press_binding(key: KeyEvent) -> Option<Binding> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    key_binding(key.code)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
