//! Draws a [`Game`] into a [`Frame`]: playfield, side panel, overlays.
//!
//! Layout is a pure function of the viewport size, so the driver can
//! hit-test mouse clicks against the same rectangles the renderer painted.

use crate::core::{Game, Piece};
use crate::term::frame::{Frame, Rgb, Style};
use crate::types::{PieceColor, COLUMNS, ROWS};

/// The preview box is sized to hold any shape matrix.
const PREVIEW_CELLS: u16 = 4;
/// Side panel width in terminal columns.
const PANEL_W: u16 = 20;
/// Gap between the playfield border and the side panel.
const PANEL_GAP: u16 = 2;

const TEXT: Rgb = Rgb::new(220, 220, 220);
const BORDER: Rgb = Rgb::new(90, 90, 90);
const EMPTY_DOT: Rgb = Rgb::new(55, 55, 55);
const OVERLAY_BG: Rgb = Rgb::new(20, 20, 20);
const START_BG: Rgb = Rgb::new(0, 150, 0);
const RESTART_BG: Rgb = Rgb::new(150, 100, 0);

const START_LABEL: &str = "[  START  ]";
const RESTART_LABEL: &str = "[ RESTART ]";

/// Terminal color for each palette entry.
fn color_rgb(color: PieceColor) -> Rgb {
    match color {
        PieceColor::Cyan => Rgb::new(0, 255, 255),
        PieceColor::Yellow => Rgb::new(255, 255, 0),
        PieceColor::Magenta => Rgb::new(255, 0, 255),
        PieceColor::Green => Rgb::new(0, 255, 0),
        PieceColor::Red => Rgb::new(255, 100, 100),
        PieceColor::Blue => Rgb::new(100, 100, 255),
        PieceColor::Orange => Rgb::new(255, 165, 0),
    }
}

/// Screen-space rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// True when the terminal cell (col, row) falls inside the rectangle.
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.w && row >= self.y && row < self.y + self.h
    }
}

/// Terminal dimensions a layout is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// Where everything landed for one viewport size. The driver keeps the
/// button rectangles around for mouse hit-testing.
#[derive(Debug, Clone, Copy)]
pub struct ViewLayout {
    pub field: Rect,
    pub preview: Rect,
    pub start_button: Rect,
    pub restart_button: Rect,
}

/// Renders the game scene. Cell size is fixed at two columns by one row,
/// which comes out roughly square in most terminal fonts.
pub struct GameView {
    cell_w: u16,
    cell_h: u16,
    shadow: bool,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new()
    }
}

impl GameView {
    pub fn new() -> Self {
        Self {
            cell_w: 2,
            cell_h: 1,
            shadow: true,
        }
    }

    /// Disable the landing-position shadow.
    pub fn without_shadow(mut self) -> Self {
        self.shadow = false;
        self
    }

    /// Compute the layout for a viewport. The whole composition is centered;
    /// on tiny terminals rectangles may extend past the edge, which is fine
    /// because [`Frame`] clips writes.
    pub fn layout(&self, vp: Viewport) -> ViewLayout {
        let field_w = COLUMNS as u16 * self.cell_w + 2;
        let field_h = ROWS as u16 * self.cell_h + 2;
        let total_w = field_w + PANEL_GAP + PANEL_W;
        let x = vp.width.saturating_sub(total_w) / 2;
        let y = vp.height.saturating_sub(field_h) / 2;
        let field = Rect::new(x, y, field_w, field_h);
        let panel_x = field.x + field.w + PANEL_GAP;
        let preview = Rect::new(
            panel_x,
            field.y + 1,
            PREVIEW_CELLS * self.cell_w + 2,
            PREVIEW_CELLS * self.cell_h + 2,
        );
        let start_button = Rect::new(panel_x, field.y + 14, START_LABEL.len() as u16, 1);
        let restart_button = Rect::new(panel_x, field.y + 16, RESTART_LABEL.len() as u16, 1);
        ViewLayout {
            field,
            preview,
            start_button,
            restart_button,
        }
    }

    /// Draw the whole scene into `frame`. The frame is cleared first, so the
    /// caller can hand back the previous frame unmodified.
    pub fn render(&self, game: &Game, frame: &mut Frame) {
        frame.clear();
        let layout = self.layout(Viewport {
            width: frame.width(),
            height: frame.height(),
        });
        self.draw_field(game, frame, layout.field);
        if game.running() {
            if self.shadow {
                self.draw_shadow(game, frame, layout.field);
            }
            self.draw_piece(game.current(), frame, layout.field);
        }
        self.draw_panel(game, frame, &layout);
        if game.game_over() {
            self.draw_game_over(game, frame, layout.field);
        }
    }

    /// Top-left frame cell of a grid cell inside the field border.
    fn cell_origin(&self, field: Rect, x: i8, y: i8) -> (u16, u16) {
        (
            field.x + 1 + x as u16 * self.cell_w,
            field.y + 1 + y as u16 * self.cell_h,
        )
    }

    fn draw_field(&self, game: &Game, frame: &mut Frame, field: Rect) {
        draw_border(frame, field, Style::fg(BORDER));
        let dot = Style::fg(EMPTY_DOT);
        for y in 0..ROWS as i8 {
            for x in 0..COLUMNS as i8 {
                let (px, py) = self.cell_origin(field, x, y);
                match game.board().get(x, y).flatten() {
                    Some(color) => {
                        let style = Style::fg(color_rgb(color));
                        frame.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
                    }
                    None => frame.put_char(px, py, '·', dot),
                }
            }
        }
    }

    fn draw_piece(&self, piece: &Piece, frame: &mut Frame, field: Rect) {
        let style = Style::fg(color_rgb(piece.color));
        for (x, y) in piece.cells() {
            // rows above the top edge are not shown
            if y < 0 {
                continue;
            }
            let (px, py) = self.cell_origin(field, x, y);
            frame.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_shadow(&self, game: &Game, frame: &mut Frame, field: Rect) {
        let dist = game.drop_distance();
        if dist == 0 {
            return;
        }
        let piece = game.current();
        let style = Style::fg(color_rgb(piece.color).quartered());
        for (x, y) in piece.cells() {
            let y = y + dist;
            if y < 0 {
                continue;
            }
            let (px, py) = self.cell_origin(field, x, y);
            frame.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_panel(&self, game: &Game, frame: &mut Frame, layout: &ViewLayout) {
        let panel_x = layout.preview.x;
        if panel_x + PANEL_W > frame.width() {
            // not enough room next to the field, skip the panel entirely
            return;
        }
        let label = Style::fg(TEXT).bold();
        let value = Style::fg(TEXT);

        if game.running() {
            frame.put_str(panel_x, layout.field.y, "NEXT", label);
            self.draw_preview(game.next_piece(), frame, layout.preview);
        }

        let score_y = layout.preview.y + layout.preview.h + 1;
        frame.put_str(panel_x, score_y, "SCORE", label);
        frame.put_str(panel_x, score_y + 1, &game.score().to_string(), value);
        frame.put_str(panel_x, score_y + 3, "HIGH SCORE", label);
        frame.put_str(panel_x, score_y + 4, &game.high_score().to_string(), value);

        let start = Style::fg(TEXT).on(START_BG).bold();
        let restart = Style::fg(TEXT).on(RESTART_BG).bold();
        let btn = layout.start_button;
        frame.put_str(btn.x, btn.y, START_LABEL, start);
        let btn = layout.restart_button;
        frame.put_str(btn.x, btn.y, RESTART_LABEL, restart);

        let legend_y = layout.restart_button.y + 2;
        let legend = ["←/→  move", " ↑   rotate", " ↓   soft drop", " q   quit"];
        for (i, line) in legend.iter().enumerate() {
            frame.put_str(panel_x, legend_y + i as u16, line, value);
        }
    }

    fn draw_preview(&self, piece: &Piece, frame: &mut Frame, rect: Rect) {
        draw_border(frame, rect, Style::fg(BORDER));
        let inner_w = rect.w - 2;
        let inner_h = rect.h - 2;
        let shape_w = piece.shape.width() as u16 * self.cell_w;
        let shape_h = piece.shape.height() as u16 * self.cell_h;
        let sx = rect.x + 1 + inner_w.saturating_sub(shape_w) / 2;
        let sy = rect.y + 1 + inner_h.saturating_sub(shape_h) / 2;
        let style = Style::fg(color_rgb(piece.color));
        for (dx, dy) in piece.shape.filled() {
            frame.fill_rect(
                sx + dx as u16 * self.cell_w,
                sy + dy as u16 * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
    }

    fn draw_game_over(&self, game: &Game, frame: &mut Frame, field: Rect) {
        let inner_x = field.x + 1;
        let inner_w = field.w - 2;
        let band_y = field.y + field.h / 2 - 2;
        let plain = Style::fg(TEXT).on(OVERLAY_BG);
        frame.fill_rect(inner_x, band_y, inner_w, 5, ' ', plain);
        put_centered(frame, inner_x, inner_w, band_y + 1, "GAME OVER", plain.bold());
        let score_line = format!("FINAL SCORE {}", game.score());
        put_centered(frame, inner_x, inner_w, band_y + 2, &score_line, plain);
        put_centered(frame, inner_x, inner_w, band_y + 3, "R TO RESTART", plain);
    }
}

fn draw_border(frame: &mut Frame, rect: Rect, style: Style) {
    if rect.w < 2 || rect.h < 2 {
        return;
    }
    let right = rect.x + rect.w - 1;
    let bottom = rect.y + rect.h - 1;
    frame.put_char(rect.x, rect.y, '┌', style);
    frame.put_char(right, rect.y, '┐', style);
    frame.put_char(rect.x, bottom, '└', style);
    frame.put_char(right, bottom, '┘', style);
    for x in rect.x + 1..right {
        frame.put_char(x, rect.y, '─', style);
        frame.put_char(x, bottom, '─', style);
    }
    for y in rect.y + 1..bottom {
        frame.put_char(rect.x, y, '│', style);
        frame.put_char(right, y, '│', style);
    }
}

fn put_centered(frame: &mut Frame, x: u16, w: u16, y: u16, s: &str, style: Style) {
    let len = s.chars().count() as u16;
    frame.put_str(x + w.saturating_sub(len) / 2, y, s, style);
}
