//! Terminal output: a guard for raw mode and a line-diffing frame writer.
//!
//! Each frame is compared with the previous one line by line, and a changed
//! line is rewritten from its first to its last differing column. The board
//! only changes a few lines per tick, so most frames are a handful of short
//! writes. The first frame and any size change repaint the whole screen.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Glyph, Rgb};

/// Raw mode and the alternate screen, restored when dropped.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        // From here on a failure drops the guard, which undoes raw mode.
        let guard = Self { active: true };
        let mut out = io::stdout();
        out.queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        out.flush().context("enter alternate screen")?;
        Ok(guard)
    }

    /// Restore the terminal now and report any failure.
    pub fn restore(mut self) -> Result<()> {
        self.active = false;
        leave()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = leave();
        }
    }
}

fn leave() -> Result<()> {
    let mut out = io::stdout();
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(terminal::EnableLineWrap)?
        .queue(cursor::Show)?
        .queue(terminal::LeaveAlternateScreen)?;
    out.flush().context("leave alternate screen")?;
    terminal::disable_raw_mode().context("disable raw mode")
}

/// Writes frames to `W`, sending only what changed since the last frame.
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    prev: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            prev: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Repaint everything on the next draw, e.g. after a resize event.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Write `fb` and keep it as the diff base.
    ///
    /// The previous frame is swapped back into `fb`, so one pair of buffers
    /// serves the whole game; the caller repaints `fb` before the next draw.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut base = match self.prev.take() {
            Some(prev) if prev.same_size(fb) => {
                encode_changed_lines(&prev, fb, &mut self.buf)?;
                prev
            }
            _ => {
                encode_full(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };

        self.out
            .write_all(&self.buf)
            .context("write frame to terminal")?;
        self.out.flush().context("flush terminal")?;

        std::mem::swap(&mut base, fb);
        self.prev = Some(base);
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

/// Clear the screen and write every line of `fb`.
pub fn encode_full(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        pen.write(out, fb.line(y))?;
    }
    pen.reset(out)
}

/// Write the changed span of every line that differs from `prev`.
///
/// Both buffers must have the same size.
pub fn encode_changed_lines(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut pen = Pen::default();
    for y in 0..next.height() {
        if let Some(span) = next.changed_span(prev, y) {
            out.queue(cursor::MoveTo(span.start, y))?;
            let line = next.line(y);
            pen.write(out, &line[usize::from(span.start)..usize::from(span.end)])?;
        }
    }
    pen.reset(out)
}

/// Tracks the style last sent so unchanged colors are not re-sent.
#[derive(Default)]
struct Pen {
    current: Option<CellStyle>,
}

impl Pen {
    fn write(&mut self, out: &mut Vec<u8>, glyphs: &[Glyph]) -> Result<()> {
        for glyph in glyphs {
            self.apply(out, glyph.style)?;
            out.queue(Print(glyph.ch))?;
        }
        Ok(())
    }

    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let weight_same = self
            .current
            .is_some_and(|cur| cur.bold == style.bold && cur.dim == style.dim);
        if !weight_same {
            // Attribute reset also drops colors, so both are re-sent below.
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.current = None;
        }
        if self.current.map(|c| c.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(color(style.fg)))?;
        }
        if self.current.map(|c| c.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(color(style.bg)))?;
        }
        self.current = Some(style);
        Ok(())
    }

    fn reset(&mut self, out: &mut Vec<u8>) -> Result<()> {
        if self.current.take().is_some() {
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
