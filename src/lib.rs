//! blockfall - a terminal falling-block puzzle game
//!
//! The crate splits into three layers:
//!
//! - [`core`] holds the rules: board, pieces, RNG, scoring, and the
//!   [`core::Game`] engine state machine. Pure logic, deterministic under a
//!   seed, no I/O.
//! - [`input`] decodes terminal key events into game commands and keeps the
//!   held-key auto-repeat timers.
//! - [`term`] renders game state into a character framebuffer and owns the
//!   terminal session (raw mode, alternate screen, diffed drawing).
//!
//! [`store`] persists the high score as a small JSON record; every failure
//! there degrades to defaults instead of interrupting play. The binary in
//! `src/main.rs` wires the layers into a single synchronous driver loop.

pub mod core;
pub mod input;
pub mod store;
pub mod term;
pub mod types;
