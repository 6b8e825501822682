use crate::board::{ActivePiece, Grid};
use crate::geometry::Point;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub cells: [Point; 4],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            cells: *value.shape.points(),
        }
    }
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Settled stack with the active piece composited in, `[row][col]`, row 0 at the bottom.
    pub board: Grid,
    pub active: Option<ActiveSnapshot>,
    /// Where the active piece would lock on a hard drop.
    pub ghost: Option<[Point; 4]>,
    pub next: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub gravity_interval_ms: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost = None;
        self.next = PieceKind::I;
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.gravity_interval_ms = 0;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Cell at (row, col), `None` if out of bounds.
    pub fn cell(&self, row: i8, col: i8) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.board
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            next: PieceKind::I,
            score: 0,
            lines: 0,
            level: 0,
            gravity_interval_ms: 0,
            game_over: false,
        };
        s.clear();
        s
    }
}
