//! Terminal input module.
//!
//! Maps `crossterm` key events onto game commands and tracks which keys are
//! held, producing one [`crate::types::FrameInput`] per session tick. Works in
//! terminals that never report key releases.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{key_binding, press_binding, should_quit, Binding};
