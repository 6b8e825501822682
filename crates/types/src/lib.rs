//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, so they
//! can be shared by the simulation core, the input adapter and the renderer.
//!
//! # Board Dimensions
//!
//! The playfield is fixed:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 22 rows (indexed 0-21, bottom to top)
//! - **Visible rows**: 0-19; rows 20 and 21 are the hidden spawn buffer
//!
//! # Session Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by the terminal runner (~60 FPS) |
//! | `BASE_GRAVITY_MS` | 800 | Gravity interval at the start of a game |
//! | `GRAVITY_STEP_MS` | 100 | Interval reduction applied at every level-up |
//! | `GRAVITY_FLOOR_MS` | 200 | Gravity never gets faster than this |
//! | `LEVEL_LENGTH_MS` | 60000 | Time between level-ups |
//! | `SOFT_DROP_INTERVAL_MS` | 80 | Gravity interval while soft drop is held |
//! | `FIRST_REPEAT_DELAY_MS` | 500 | Delay after the first step of a held direction |
//! | `REPEAT_DELAY_MS` | 100 | Delay between later steps of a held direction |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, Command, FrameInput, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//!
//! assert_eq!(Cell::PurpleSpecial.base(), Cell::Purple);
//!
//! let mut input = FrameInput::default();
//! input.push(Command::HardDrop);
//! assert!(input.hard_drop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (22 rows, including the 2 hidden spawn rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Number of rows shown to the player. A piece locking at or above this row ends the game.
pub const VISIBLE_HEIGHT: u8 = 20;

/// Row offset applied to a catalog shape when it spawns.
pub const SPAWN_ROW: i8 = 20;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 0.
pub const BASE_GRAVITY_MS: u32 = 800;

/// Amount the gravity interval shrinks on each level-up.
pub const GRAVITY_STEP_MS: u32 = 100;

/// Fastest gravity interval reachable through level-ups.
pub const GRAVITY_FLOOR_MS: u32 = 200;

/// Time spent on one level before gravity speeds up.
pub const LEVEL_LENGTH_MS: u32 = 60_000;

/// Gravity interval while soft drop is held.
pub const SOFT_DROP_INTERVAL_MS: u32 = 80;

/// Delay after the first step of a held direction.
pub const FIRST_REPEAT_DELAY_MS: u32 = 500;

/// Delay between subsequent steps of a held direction.
pub const REPEAT_DELAY_MS: u32 = 100;

/// Points per completed row.
pub const LINE_CLEAR_SCORE: u32 = 200;

/// Extra points per additional row when one lock clears several rows.
pub const COMBO_BONUS: u32 = 200;

/// Points for a piece that locks through ordinary gravity.
pub const GRAVITY_LOCK_BONUS: u32 = 10;

/// Points for each hard drop.
pub const HARD_DROP_BONUS: u32 = 12;


/// The seven tetromino piece kinds, in catalog order
///
/// Each kind is bound to one color in the piece catalog:
/// - **I**: Blue, 4-long bar
/// - **J**: Green
/// - **L**: Cyan
/// - **O**: Pink, 2x2 square (never rotates)
/// - **S**: Red
/// - **T**: Purple
/// - **Z**: Yellow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Look up a kind by catalog index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 7`. Callers only ever hold indices produced from
    /// the catalog itself, so an out-of-range value is a bug, not input.
    pub fn from_index(index: usize) -> Self {
        match Self::ALL.get(index) {
            Some(kind) => *kind,
            None => panic!("invalid piece kind index {index}"),
        }
    }

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// A cell on the game board
///
/// `Empty` marks a free cell; every other variant is a block color.
/// The `*Special` variants complete the sprite palette. Gameplay never
/// produces them and treats each one exactly like its base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Cyan,
    Blue,
    Pink,
    Purple,
    Red,
    Yellow,
    Green,
    Gray,
    CyanSpecial,
    BlueSpecial,
    PinkSpecial,
    PurpleSpecial,
    RedSpecial,
    YellowSpecial,
    GreenSpecial,
    GraySpecial,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Fold a special variant to its base color.
    pub fn base(&self) -> Cell {
        match self {
            Cell::CyanSpecial => Cell::Cyan,
            Cell::BlueSpecial => Cell::Blue,
            Cell::PinkSpecial => Cell::Pink,
            Cell::PurpleSpecial => Cell::Purple,
            Cell::RedSpecial => Cell::Red,
            Cell::YellowSpecial => Cell::Yellow,
            Cell::GreenSpecial => Cell::Green,
            Cell::GraySpecial => Cell::Gray,
            other => *other,
        }
    }

    /// Zero-based slot in a 16-entry sprite palette, `None` for `Empty`.
    pub fn palette_index(&self) -> Option<u8> {
        match self {
            Cell::Empty => None,
            other => Some(*other as u8 - 1),
        }
    }
}

/// Horizontal direction for piece movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta for one step in this direction.
    pub fn delta(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Discrete commands delivered to a session
///
/// `MoveLeft`/`MoveRight` are level-triggered: they mean "held during this
/// frame" and are debounced by the session. The rest are edge-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateCw,
    SoftDropStart,
    SoftDropEnd,
    HardDrop,
}

/// Input observed during a single frame
///
/// Each edge-triggered command is processed at most once per frame, so the
/// flags are plain booleans rather than a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Left held this frame.
    pub left: bool,
    /// Right held this frame.
    pub right: bool,
    pub rotate: bool,
    pub soft_drop_start: bool,
    pub soft_drop_end: bool,
    pub hard_drop: bool,
}

impl FrameInput {
    pub fn push(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.left = true,
            Command::MoveRight => self.right = true,
            Command::RotateCw => self.rotate = true,
            Command::SoftDropStart => self.soft_drop_start = true,
            Command::SoftDropEnd => self.soft_drop_end = true,
            Command::HardDrop => self.hard_drop = true,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}
