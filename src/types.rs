//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Playfield dimensions
pub const COLUMNS: u8 = 10;
pub const ROWS: u8 = 20;

/// Frame timing (milliseconds)
pub const TICK_MS: u32 = 16;

/// Gravity intervals (milliseconds)
pub const NORMAL_DROP_MS: u32 = 500;
pub const FAST_DROP_MS: u32 = 50;

/// Held-key auto-repeat timing (milliseconds)
pub const INITIAL_MOVE_DELAY_MS: u64 = 200;
pub const MOVE_REPEAT_DELAY_MS: u64 = 50;
pub const DEFAULT_RELEASE_TIMEOUT_MS: u64 = 150;

/// The seven canonical piece layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    S,
    Z,
    L,
    J,
    T,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::T,
    ];
}

/// Palette identity carried by a piece. Chosen independently of the shape,
/// so any layout can appear in any of the seven colors. The engine treats
/// it as opaque; the terminal view owns the RGB mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Cyan,
    Yellow,
    Magenta,
    Green,
    Red,
    Blue,
    Orange,
}

impl PieceColor {
    pub const ALL: [PieceColor; 7] = [
        PieceColor::Cyan,
        PieceColor::Yellow,
        PieceColor::Magenta,
        PieceColor::Green,
        PieceColor::Red,
        PieceColor::Blue,
        PieceColor::Orange,
    ];
}

/// Cell on the board (None = empty, Some = filled with a locked color)
pub type Cell = Option<PieceColor>;

/// Discrete commands the driver decodes from raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    Start,
    Restart,
}
