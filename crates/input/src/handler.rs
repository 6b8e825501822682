//! Held-key tracking for terminal environments.
//!
//! The session debounces held directions itself, so this handler only has
//! to know which keys are down and which edges happened since the last frame.
//! Terminals that never emit key-release events are handled with a timeout.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};

use crate::map::{key_binding, press_binding, Binding};
use crate::types::{Command, FrameInput};

/// Which horizontal key is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks held keys and pending edge commands between frames.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: Instant,
    pending: FrameInput,
    key_release_timeout_ms: u32,
}

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: Instant::now(),
            pending: FrameInput::default(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn is_soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Record a key press (or terminal auto-repeat). Returns the binding it hit.
    ///
    /// Held directions are reported by [`InputHandler::frame`]; edge commands
    /// are queued until the next frame.
    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<Binding> {
        let binding = press_binding(key)?;
        match binding {
            Binding::MoveLeft => {
                self.last_key_time = Instant::now();
                self.horizontal = HorizontalDirection::Left;
            }
            Binding::MoveRight => {
                self.last_key_time = Instant::now();
                self.horizontal = HorizontalDirection::Right;
            }
            Binding::SoftDrop => {
                self.last_key_time = Instant::now();
                if !self.down_held {
                    self.down_held = true;
                    self.pending.push(binding.press_command());
                }
            }
            Binding::Rotate | Binding::HardDrop => self.pending.push(binding.press_command()),
        }
        Some(binding)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match key_binding(code) {
            Some(Binding::MoveLeft) if self.horizontal == HorizontalDirection::Left => {
                self.horizontal = HorizontalDirection::None;
            }
            Some(Binding::MoveRight) if self.horizontal == HorizontalDirection::Right => {
                self.horizontal = HorizontalDirection::None;
            }
            Some(Binding::SoftDrop) => self.release_soft_drop(),
            _ => {}
        }
    }

    fn release_soft_drop(&mut self) {
        if self.down_held {
            self.down_held = false;
            self.pending.push(Command::SoftDropEnd);
        }
    }

    /// Input for the frame about to be ticked. Edge commands are drained.
    pub fn frame(&mut self) -> FrameInput {
        // Auto-release when terminal does not emit release events.
        let timeout = Duration::from_millis(u64::from(self.key_release_timeout_ms));
        if self.last_key_time.elapsed() > timeout {
            self.horizontal = HorizontalDirection::None;
            self.release_soft_drop();
        }

        let mut out = std::mem::take(&mut self.pending);
        out.left = self.horizontal == HorizontalDirection::Left;
        out.right = self.horizontal == HorizontalDirection::Right;
        out
    }

    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.last_key_time = Instant::now();
        self.pending = FrameInput::default();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
