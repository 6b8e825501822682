//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule and all game state. It has no
//! dependency on terminal, input or I/O, so the same seed always plays
//! out the same way.
//!
//! # Module Structure
//!
//! - [`geometry`]: points, 4-cell shapes, translation and quarter-turn rotation
//! - [`pieces`]: the seven canonical shapes, their colors and spawn offsets
//! - [`rng`]: seeded uniform piece and spawn-column generation
//! - [`board`]: 10x22 grid, collision, movement, rotation kicks, locking and row clears
//! - [`scoring`]: line clear points and gravity speed-up
//! - [`session`]: gravity timer, level-ups, horizontal repeat, soft and hard drop
//! - [`snapshot`]: read-only view handed to the renderer
//!
//! # Game Rules
//!
//! - Row 0 is the bottom; rows 20 and 21 are a hidden spawn buffer.
//! - Kinds are drawn uniformly at random and spawn at a random legal column.
//! - Rotation is a quarter turn about a fixed pivot, with kicks tried in place,
//!   one column right, one column left, then one row down. O never rotates.
//! - A piece that locks with any cell in the spawn buffer ends the game.
//! - Each cleared row pays 200, plus 200 per extra row in the same lock.
//!
//! # Example
//!
//! ```
//! use blockfall_core::Session;
//! use blockfall_types::FrameInput;
//!
//! let mut session = Session::new(12345);
//! let input = FrameInput {
//!     hard_drop: true,
//!     ..FrameInput::default()
//! };
//! assert!(session.tick(16, &input));
//! assert!(session.score() >= 12);
//! ```

pub mod board;
pub mod geometry;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{ActivePiece, Board, Grid, LockEvent};
pub use geometry::{Point, Shape};
pub use pieces::{canonical_shape, color_of, spawn_max_offset, GHOST_CELL};
pub use rng::Randomizer;
pub use scoring::line_clear_score;
pub use session::{Session, SessionConfig};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
