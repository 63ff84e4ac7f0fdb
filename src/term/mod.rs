//! Terminal presentation layer.
//!
//! Rendering happens in two stages: [`GameView`] draws the scene into an
//! in-memory [`Frame`], and [`TerminalScreen`] diffs consecutive frames and
//! writes only the changed spans to the terminal. `core` stays free of any
//! terminal concern, so the whole pipeline is testable without a tty.

pub mod frame;
pub mod screen;
pub mod view;

pub use frame::{Frame, Glyph, Rgb, Style};
pub use screen::TerminalScreen;
pub use view::{GameView, Rect, ViewLayout, Viewport};
