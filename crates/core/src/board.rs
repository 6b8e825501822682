//! Board module - grid state and the falling piece
//!
//! The board is a 10x22 grid; rows 20 and 21 are the hidden spawn buffer.
//! Coordinates: (row, col) where row 0 is the bottom and col 0 is the left wall.
//!
//! Settled cells live in a flat array; the active piece is kept beside it and
//! only written into the array when it locks. Collision checks therefore never
//! see the active piece's own cells.
//!
//! Every player-facing operation is fail-silent: an illegal move, rotation or
//! drop leaves the board untouched and reports `false`.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::geometry::Shape;
use crate::pieces::{color_of, rotates, spawn_max_offset, spawn_shape};
use crate::rng::Randomizer;
use crate::scoring::line_clear_score;
use crate::types::{Cell, Direction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Composited view of the playfield, indexed `[row][col]` with row 0 at the bottom.
pub type Grid = [[Cell; WIDTH]; HEIGHT];

/// The piece under player control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl ActivePiece {
    pub fn color(&self) -> Cell {
        color_of(self.kind)
    }
}

/// What happened when the last piece locked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Distinct rows the piece occupied at lock time, bottom first.
    pub rows: ArrayVec<i8, 4>,
    pub lines_cleared: u32,
    /// Line and combo points credited by this lock.
    pub line_score: u32,
    pub game_over: bool,
}

/// The game board: settled stack, active piece, piece preview and score.
#[derive(Debug, Clone)]
pub struct Board {
    /// Flat array of settled cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
    active: Option<ActivePiece>,
    next: PieceKind,
    randomizer: Randomizer,
    score: u32,
    lines: u32,
    game_over: bool,
    last_lock: Option<LockEvent>,
}

impl Board {
    /// Create an empty board with the first "next" kind already rolled.
    ///
    /// No piece is active until [`Board::spawn`] or [`Board::spawn_at`] is called.
    pub fn new(seed: u64) -> Self {
        let mut randomizer = Randomizer::new(seed);
        let next = randomizer.random_kind();
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
            active: None,
            next,
            randomizer,
            score: 0,
            lines: 0,
            game_over: false,
            last_lock: None,
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if Self::is_out_of_bounds(row, col) {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn is_out_of_bounds(row: i8, col: i8) -> bool {
        row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Settled cell at (row, col), `None` if out of bounds.
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Write a settled cell. Returns false if out of bounds.
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_row_full(&self, row: i8) -> bool {
        if row < 0 || row >= BOARD_HEIGHT as i8 {
            return false;
        }
        let start = row as usize * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|c| !c.is_empty())
    }

    /// Remove a row, shifting every row above it down by one.
    /// The top row becomes empty.
    pub fn delete_row(&mut self, row: i8) {
        if row < 0 || row >= BOARD_HEIGHT as i8 {
            return;
        }
        let start = row as usize * WIDTH;
        self.cells.copy_within(start + WIDTH.., start);
        self.cells[BOARD_SIZE - WIDTH..].fill(Cell::Empty);
    }

    /// True if any point is off the board or on a settled cell.
    pub fn check_collision(&self, shape: &Shape) -> bool {
        shape
            .points()
            .iter()
            .any(|p| !matches!(self.get(p.row, p.col), Some(Cell::Empty)))
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn current_kind(&self) -> Option<PieceKind> {
        self.active.map(|a| a.kind)
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Credit points from outside the board (session bonuses).
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Total rows cleared this game.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn last_lock(&self) -> Option<&LockEvent> {
        self.last_lock.as_ref()
    }

    /// Take and clear the last lock event.
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    /// Spawn the pre-rolled next kind at a random column and roll a new next kind.
    pub fn spawn(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let kind = self.next;
        let offset = self.randomizer.spawn_offset(kind);
        self.spawn_at(kind, offset);
        self.next = self.randomizer.random_kind();
        true
    }

    /// Place `kind` in the spawn rows at column `offset`, replacing any active piece.
    ///
    /// The preview kind is left alone. The spawn is not collision-checked; the
    /// stack only reaches the spawn rows through a lock that ends the game.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is outside `0..=spawn_max_offset(kind)`, since the
    /// piece would hang off the board.
    pub fn spawn_at(&mut self, kind: PieceKind, offset: i8) {
        let max = spawn_max_offset(kind);
        assert!(
            (0..=max).contains(&offset),
            "spawn offset {offset} out of range 0..={max} for {}",
            kind.as_str()
        );
        if self.game_over {
            return;
        }
        let shape = spawn_shape(kind, offset);
        trace!(kind = kind.as_str(), offset, "spawn");
        self.active = Some(ActivePiece { kind, shape });
    }

    /// Shift the active piece one column. No-op if blocked.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.shape.translate(0, direction.delta());
        if self.check_collision(&moved) {
            return false;
        }
        self.active = Some(ActivePiece {
            shape: moved,
            ..active
        });
        true
    }

    /// Turn the active piece a quarter about its pivot, trying the kick ladder:
    /// in place, one column right, one column left, one row down.
    ///
    /// The O piece never rotates. If every candidate collides the piece is unchanged.
    pub fn rotate_piece(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !rotates(active.kind) {
            return false;
        }

        let rotated = active.shape.rotate_cw();
        let candidates = [
            rotated,
            rotated.translate(0, 1),
            rotated.translate(0, -1),
            rotated.down(),
        ];

        match candidates.iter().find(|c| !self.check_collision(c)) {
            Some(&shape) => {
                self.active = Some(ActivePiece { shape, ..active });
                true
            }
            None => false,
        }
    }

    /// Would one more row of gravity collide?
    pub fn is_touching_floor(&self) -> bool {
        match self.active {
            Some(active) => self.check_collision(&active.shape.down()),
            None => false,
        }
    }

    /// Move the active piece down one row, or lock it if it cannot move.
    ///
    /// Returns true when the piece locked this step.
    pub fn apply_gravity(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let lowered = active.shape.down();
        if !self.check_collision(&lowered) {
            self.active = Some(ActivePiece {
                shape: lowered,
                ..active
            });
            return false;
        }

        self.lock(active);
        true
    }

    /// Apply gravity until the piece locks.
    pub fn instant_drop(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        while !self.apply_gravity() {}
        true
    }

    /// Lowest legal resting shape of the active piece.
    ///
    /// This is exactly where [`Board::instant_drop`] would lock it.
    pub fn ghost(&self) -> Option<Shape> {
        let active = self.active?;
        let mut shape = active.shape;
        loop {
            let lowered = shape.down();
            if self.check_collision(&lowered) {
                return Some(shape);
            }
            shape = lowered;
        }
    }

    /// Settled stack with the active piece painted on top.
    pub fn grid(&self) -> Grid {
        let mut grid = [[Cell::Empty; WIDTH]; HEIGHT];
        for (row, cells) in grid.iter_mut().enumerate() {
            let start = row * WIDTH;
            cells.copy_from_slice(&self.cells[start..start + WIDTH]);
        }
        if let Some(active) = self.active {
            let color = active.color();
            for p in active.shape.points() {
                if !Self::is_out_of_bounds(p.row, p.col) {
                    grid[p.row as usize][p.col as usize] = color;
                }
            }
        }
        grid
    }

    /// Settled cells only, row-major with row 0 first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn lock(&mut self, piece: ActivePiece) {
        let color = piece.color();
        for p in piece.shape.points() {
            self.set(p.row, p.col, color);
        }
        self.active = None;

        let game_over = piece.shape.is_above_spawn_limit();
        let cleared = self.clear_completed_rows(&piece.shape);
        let line_score = line_clear_score(cleared);
        self.score = self.score.saturating_add(line_score);
        self.lines += cleared;

        let mut rows: ArrayVec<i8, 4> = ArrayVec::new();
        for p in piece.shape.points() {
            if !rows.contains(&p.row) {
                rows.push(p.row);
            }
        }
        rows.sort_unstable();

        debug!(
            kind = piece.kind.as_str(),
            lines = cleared,
            points = line_score,
            "piece locked"
        );

        self.last_lock = Some(LockEvent {
            kind: piece.kind,
            rows,
            lines_cleared: cleared,
            line_score,
            game_over,
        });

        if game_over {
            self.game_over = true;
            info!(score = self.score, lines = self.lines, "game over");
            return;
        }
        self.spawn();
    }

    /// Delete every full row among the rows the locked shape covered.
    ///
    /// A deletion shifts rows down, so the scan repeats until a pass deletes nothing.
    fn clear_completed_rows(&mut self, shape: &Shape) -> u32 {
        let mut cleared = 0;
        loop {
            let mut deleted = false;
            for p in shape.points() {
                if self.is_row_full(p.row) {
                    self.delete_row(p.row);
                    deleted = true;
                    cleared += 1;
                }
            }
            if !deleted {
                return cleared;
            }
        }
    }

    /// Create from rows given top-first, as they would be drawn.
    ///
    /// Rows not listed are empty; `#` marks a gray settled cell, anything else is empty.
    pub fn from_rows(seed: u64, rows_top_first: &[&str]) -> Self {
        let mut board = Self::new(seed);
        let count = rows_top_first.len();
        for (i, line) in rows_top_first.iter().enumerate() {
            let row = (count - 1 - i) as i8;
            for (col, ch) in line.chars().take(WIDTH).enumerate() {
                if ch == '#' {
                    board.set(row, col as i8, Cell::Gray);
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(1)
    }
}
