//! Session module - real-time pacing on top of the board
//!
//! A [`Session`] owns the board and every timer. The caller feeds it elapsed
//! milliseconds and the [`FrameInput`] seen during that frame; the session
//! decides when gravity fires, when a held direction repeats, and when the
//! game speeds up.

use tracing::info;

use crate::board::Board;
use crate::scoring::next_gravity_interval_ms;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    Direction, FrameInput, PieceKind, BASE_GRAVITY_MS, FIRST_REPEAT_DELAY_MS, GRAVITY_FLOOR_MS,
    GRAVITY_LOCK_BONUS, GRAVITY_STEP_MS, HARD_DROP_BONUS, LEVEL_LENGTH_MS, REPEAT_DELAY_MS,
    SOFT_DROP_INTERVAL_MS,
};

/// Pacing constants for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub base_gravity_ms: u32,
    pub gravity_step_ms: u32,
    pub gravity_floor_ms: u32,
    pub level_length_ms: u32,
    pub soft_drop_interval_ms: u32,
    pub first_repeat_delay_ms: u32,
    pub repeat_delay_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_gravity_ms: BASE_GRAVITY_MS,
            gravity_step_ms: GRAVITY_STEP_MS,
            gravity_floor_ms: GRAVITY_FLOOR_MS,
            level_length_ms: LEVEL_LENGTH_MS,
            soft_drop_interval_ms: SOFT_DROP_INTERVAL_MS,
            first_repeat_delay_ms: FIRST_REPEAT_DELAY_MS,
            repeat_delay_ms: REPEAT_DELAY_MS,
        }
    }
}

/// One game: board plus timers, driven by [`Session::tick`].
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    config: SessionConfig,
    /// Gravity interval outside soft drop; shrinks on level-up.
    base_interval_ms: u32,
    /// Interval currently in effect.
    gravity_interval_ms: u32,
    /// Signed: the floor grace subtracts a second interval.
    gravity_timer_ms: i64,
    level_timer_ms: u32,
    repeat_delay_ms: u32,
    repeat_count: u32,
    soft_dropping: bool,
    level: u32,
}

impl Session {
    /// Start a session with default pacing. The first piece is already spawned.
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SessionConfig::default())
    }

    pub fn with_config(seed: u64, config: SessionConfig) -> Self {
        Self::from_board(Board::new(seed), config)
    }

    /// Wrap an existing board, e.g. one prepared for a test.
    ///
    /// A board without an active piece gets one spawned, unless its game is already over.
    pub fn from_board(mut board: Board, config: SessionConfig) -> Self {
        if board.active().is_none() {
            board.spawn();
        }
        Self {
            board,
            config,
            base_interval_ms: config.base_gravity_ms,
            gravity_interval_ms: config.base_gravity_ms,
            gravity_timer_ms: 0,
            level_timer_ms: 0,
            repeat_delay_ms: 0,
            repeat_count: 0,
            soft_dropping: false,
            level: 1,
        }
    }

    /// Advance the session by `elapsed_ms` with the input seen this frame.
    ///
    /// Returns true if a piece locked during the tick. Does nothing once the game is over.
    pub fn tick(&mut self, elapsed_ms: u32, input: &FrameInput) -> bool {
        if self.board.game_over() {
            return false;
        }

        let mut locked = false;
        self.gravity_timer_ms += i64::from(elapsed_ms);
        self.level_timer_ms = self.level_timer_ms.saturating_add(elapsed_ms);

        let interval = i64::from(self.gravity_interval_ms);
        if self.gravity_timer_ms > interval {
            self.gravity_timer_ms -= interval;
            if self.board.apply_gravity() {
                self.board.add_score(GRAVITY_LOCK_BONUS);
                locked = true;
            } else if self.board.is_touching_floor() {
                self.gravity_timer_ms -= interval;
            }
        }

        if self.board.game_over() {
            return locked;
        }

        self.repeat_delay_ms = self.repeat_delay_ms.saturating_sub(elapsed_ms);

        if self.level_timer_ms >= self.config.level_length_ms {
            self.level_timer_ms = 0;
            self.level_up();
        }

        if input.right && self.repeat_delay_ms == 0 {
            self.step_horizontal(Direction::Right);
        }
        if input.left && self.repeat_delay_ms == 0 {
            self.step_horizontal(Direction::Left);
        }

        if input.soft_drop_start {
            self.soft_dropping = true;
            self.gravity_interval_ms = self.config.soft_drop_interval_ms;
            self.gravity_timer_ms = self
                .gravity_timer_ms
                .min(i64::from(self.config.soft_drop_interval_ms));
        }
        if input.soft_drop_end {
            self.soft_dropping = false;
            self.gravity_interval_ms = self.base_interval_ms;
        }

        if input.rotate {
            self.board.rotate_piece();
            // Grounded pieces get a fresh gravity window after a rotation attempt.
            if self.board.is_touching_floor() {
                self.gravity_timer_ms = 0;
            }
        }

        if input.hard_drop && self.board.instant_drop() {
            self.board.add_score(HARD_DROP_BONUS);
            locked = true;
        }

        if !input.left && !input.right {
            self.repeat_count = 0;
            self.repeat_delay_ms = 0;
        }

        locked
    }

    fn step_horizontal(&mut self, direction: Direction) {
        self.board.move_piece(direction);
        self.repeat_delay_ms = if self.repeat_count > 0 {
            self.config.repeat_delay_ms
        } else {
            self.config.first_repeat_delay_ms
        };
        self.repeat_count += 1;
    }

    fn level_up(&mut self) {
        self.base_interval_ms = next_gravity_interval_ms(
            self.base_interval_ms,
            self.config.gravity_step_ms,
            self.config.gravity_floor_ms,
        );
        self.level += 1;
        if !self.soft_dropping {
            self.gravity_interval_ms = self.base_interval_ms;
        }
        info!(
            level = self.level,
            gravity_ms = self.base_interval_ms,
            "level up"
        );
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    pub fn lines(&self) -> u32 {
        self.board.lines()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn current_kind(&self) -> Option<PieceKind> {
        self.board.current_kind()
    }

    pub fn next_kind(&self) -> PieceKind {
        self.board.next_kind()
    }

    pub fn game_over(&self) -> bool {
        self.board.game_over()
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        self.gravity_interval_ms
    }

    pub fn base_interval_ms(&self) -> u32 {
        self.base_interval_ms
    }

    pub fn gravity_timer_ms(&self) -> i64 {
        self.gravity_timer_ms
    }

    pub fn repeat_delay_ms(&self) -> u32 {
        self.repeat_delay_ms
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = self.board.grid();
        out.active = self.board.active().map(ActiveSnapshot::from);
        out.ghost = self.board.ghost().map(|g| *g.points());
        out.next = self.board.next_kind();
        out.score = self.board.score();
        out.lines = self.board.lines();
        out.level = self.level;
        out.gravity_interval_ms = self.gravity_interval_ms;
        out.game_over = self.board.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
