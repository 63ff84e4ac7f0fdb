//! TerminalScreen: owns the terminal session and flushes frames to it.
//!
//! Drawing diffs each frame against the previous one and rewrites only the
//! changed spans, moving the cursor once per span. Styles are applied lazily
//! when they change between printed glyphs.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::term::frame::{Frame, Rgb, Style};

pub struct TerminalScreen {
    stdout: io::Stdout,
    last: Option<Frame>,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(terminal::SetTitle("blockfall"))?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.queue(event::EnableMouseCapture)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(event::DisableMouseCapture)?;
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next present to repaint everything (used on resize)
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Present a frame, swapping it into internal state so the caller can
    /// reuse the old buffer next tick without cloning.
    pub fn present(&mut self, frame: &mut Frame) -> Result<()> {
        // A missing previous frame (startup or invalidation) never matches
        // the incoming size, which routes through the full repaint
        let mut prev = self.last.take().unwrap_or_else(|| Frame::new(0, 0));

        if prev.width() != frame.width() || prev.height() != frame.height() {
            self.full_redraw(frame)?;
            prev.resize(frame.width(), frame.height());
        } else {
            self.diff_redraw(frame, &prev)?;
        }

        std::mem::swap(&mut prev, frame);
        self.last = Some(prev);
        Ok(())
    }

    fn full_redraw(&mut self, frame: &Frame) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.queue(cursor::MoveTo(0, 0))?;

        let mut current_style: Option<Style> = None;
        for y in 0..frame.height() {
            self.stdout.queue(cursor::MoveTo(0, y))?;
            for x in 0..frame.width() {
                let glyph = frame.get(x, y).unwrap_or_default();
                if current_style != Some(glyph.style) {
                    self.apply_style(glyph.style)?;
                    current_style = Some(glyph.style);
                }
                self.stdout.queue(Print(glyph.ch))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }

    fn diff_redraw(&mut self, next: &Frame, prev: &Frame) -> Result<()> {
        let mut current_style: Option<Style> = None;
        let (w, h) = (next.width(), next.height());

        for y in 0..h {
            let mut x = 0;
            while x < w {
                if prev.get(x, y) == next.get(x, y) {
                    x += 1;
                    continue;
                }

                // Changed span: one cursor move, then print through the end
                let start = x;
                while x < w && prev.get(x, y) != next.get(x, y) {
                    x += 1;
                }

                self.stdout.queue(cursor::MoveTo(start, y))?;
                for cx in start..x {
                    let glyph = next.get(cx, y).unwrap_or_default();
                    if current_style != Some(glyph.style) {
                        self.apply_style(glyph.style)?;
                        current_style = Some(glyph.style);
                    }
                    self.stdout.queue(Print(glyph.ch))?;
                }
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }

    fn apply_style(&mut self, style: Style) -> Result<()> {
        // Attribute reset clears colors too, so it must precede them
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout
            .queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        self.stdout
            .queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        if style.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
