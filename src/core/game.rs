//! Game module - the engine state machine
//!
//! Ties the core pieces together: board, falling piece, RNG, and scoring.
//! The driver issues intents (move, rotate, tick, start) and reads outcomes
//! back through accessors and the lock event. Placement legality has a
//! single source of truth, `is_valid_position`; movement, rotation, spawn,
//! and the drop preview all route through it with different offsets.
//!
//! Lifecycle: a fresh game is idle until `start`. While running, gravity
//! pulls the piece down one row per interval; a blocked downward move means
//! the piece has landed and runs the lock sequence (lock, clear, score,
//! spawn). A spawn into occupied cells is the sole game-over condition.

use crate::core::board::Board;
use crate::core::piece::Piece;
use crate::core::rng::SimpleRng;
use crate::core::scoring::line_clear_score;
use crate::types::{FAST_DROP_MS, NORMAL_DROP_MS};

/// Outcome of one lock resolution (consumed by the driver)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points_awarded: u32,
    /// True when this resolution pushed `score` past the stored high score
    pub new_high_score: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current: Piece,
    next: Piece,
    running: bool,
    game_over: bool,
    score: u32,
    high_score: u32,
    drop_timer_ms: u32,
    rng: SimpleRng,
    /// Last lock resolution (consumed by the driver via `take_lock_event`)
    last_lock: Option<LockEvent>,
}

impl Game {
    /// Create a new idle game with an empty board and two random pieces
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let current = Piece::random(&mut rng);
        let next = Piece::random(&mut rng);

        Self {
            board: Board::new(),
            current,
            next,
            running: false,
            game_over: false,
            score: 0,
            high_score: 0,
            drop_timer_ms: 0,
            rng,
            last_lock: None,
        }
    }

    /// Carry a previously stored high score into this game
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    /// Replace the board (setup for tests and embedders)
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Replace the active piece (setup for tests and embedders)
    pub fn with_current(mut self, piece: Piece) -> Self {
        self.current = piece;
        self
    }

    /// Enter the running state. Refused once the game is over; a finished
    /// game can only be replaced by a fresh one.
    pub fn start(&mut self) {
        if !self.game_over {
            self.running = true;
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    /// Current RNG state; seeding a successor game with it continues the
    /// piece stream instead of replaying it
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Placement legality for a piece translated by (dx, dy): every filled
    /// cell must land on an open board position. Cells above the top edge
    /// are open; the side and bottom walls and occupied cells are not.
    pub fn is_valid_position(&self, piece: &Piece, dx: i8, dy: i8) -> bool {
        piece.cells().all(|(x, y)| self.board.is_open(x + dx, y + dy))
    }

    /// Try to translate the active piece by (dx, dy).
    ///
    /// Returns true when the piece moved. A blocked downward move means the
    /// piece has landed and triggers the lock sequence; a blocked horizontal
    /// move just fails. Not-running games reject every move.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        if !self.running {
            return false;
        }

        if self.is_valid_position(&self.current, dx, dy) {
            self.current.x += dx;
            self.current.y += dy;
            return true;
        }

        if dy > 0 {
            self.lock_current();
        }
        false
    }

    /// Rotate the active piece 90 degrees clockwise in place. The rotated
    /// candidate is validated where the piece stands; no wall kicks, so a
    /// blocked rotation leaves the piece untouched.
    pub fn rotate_piece(&mut self) {
        if !self.running {
            return;
        }

        let candidate = Piece {
            shape: self.current.shape.rotated(),
            ..self.current
        };
        if self.is_valid_position(&candidate, 0, 0) {
            self.current = candidate;
        }
    }

    /// How many rows the active piece can fall before resting. Pure; the
    /// drop-shadow preview renders at `current.y + drop_distance()`.
    pub fn drop_distance(&self) -> i8 {
        let mut dy: i8 = 0;
        while self.is_valid_position(&self.current, 0, dy + 1) {
            dy += 1;
        }
        dy
    }

    /// Advance game time. Accumulates elapsed milliseconds and applies at
    /// most one gravity step per call once the drop interval is reached
    /// (`FAST_DROP_MS` while soft drop is held, else `NORMAL_DROP_MS`).
    /// Returns true when a gravity step fired, including one that locked.
    pub fn tick(&mut self, elapsed_ms: u32, fast_drop: bool) -> bool {
        if !self.running {
            return false;
        }

        let interval = if fast_drop { FAST_DROP_MS } else { NORMAL_DROP_MS };
        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms < interval {
            return false;
        }

        self.drop_timer_ms = 0;
        self.move_piece(0, 1);
        true
    }

    /// Take and clear the last lock resolution
    pub fn take_lock_event(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    /// Lock the active piece, clear full rows, score, and spawn the next
    /// piece. Cells above the top edge are clipped by the board writer.
    fn lock_current(&mut self) {
        let piece = self.current;
        for (x, y) in piece.cells() {
            self.board.set(x, y, Some(piece.color));
        }

        let cleared = self.board.clear_full_rows();
        let lines = cleared.len() as u32;
        let points = line_clear_score(lines);
        self.score += points;

        let new_high = self.score > self.high_score;
        if new_high {
            self.high_score = self.score;
        }

        self.last_lock = Some(LockEvent {
            lines_cleared: lines,
            points_awarded: points,
            new_high_score: new_high,
        });

        self.spawn_next();
    }

    /// Promote `next` to the active piece and draw a fresh one. A spawn
    /// into an invalid position ends the game.
    fn spawn_next(&mut self) {
        self.current = self.next;
        self.next = Piece::random(&mut self.rng);

        if !self.is_valid_position(&self.current, 0, 0) {
            self.game_over = true;
            self.running = false;
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}
