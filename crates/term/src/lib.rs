//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and renders into a simple framebuffer that is then
//! flushed to the terminal through crossterm.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Allow precise control over aspect ratio (2 chars wide per cell)
//! - Only rewrite the changed span of each terminal line

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{cell_rgb, AnchorY, GameView, Viewport};
pub use renderer::{encode_changed_lines, encode_full, TerminalGuard, TerminalRenderer};
