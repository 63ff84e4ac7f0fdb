//! Core module - pure game logic with no external I/O
//!
//! Everything the rules need and nothing else: the grid, the shapes, the
//! RNG, scoring, and the engine state machine. No terminal, no files, no
//! clocks; the driver feeds in elapsed time and commands.

pub mod board;
pub mod game;
pub mod piece;
pub mod rng;
pub mod scoring;

// Re-export commonly used types
pub use board::Board;
pub use game::{Game, LockEvent};
pub use piece::{Piece, Shape};
pub use rng::SimpleRng;
