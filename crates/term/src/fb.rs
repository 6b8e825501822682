//! Character framebuffer the game view paints into.
//!
//! (0, 0) is the top-left terminal cell. Writes outside the buffer are
//! dropped so callers can clip by simply drawing.

use std::ops::Range;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colors and weight of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub const fn glyph(self, ch: char) -> Glyph {
        Glyph { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A terminal character with its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Glyph {
    fn default() -> Self {
        CellStyle::default().glyph(' ')
    }
}

/// Row-major grid of glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn same_size(&self, other: &FrameBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Change dimensions, reusing the allocation. Content is undefined until cleared.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.glyphs
            .resize(usize::from(width) * usize::from(height), Glyph::default());
    }

    pub fn clear(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Glyphs of terminal line `y`; empty if `y` is past the bottom.
    pub fn line(&self, y: u16) -> &[Glyph] {
        if y >= self.height {
            return &[];
        }
        let start = usize::from(y) * usize::from(self.width);
        &self.glyphs[start..start + usize::from(self.width)]
    }

    fn line_mut(&mut self, y: u16) -> Option<&mut [Glyph]> {
        if y >= self.height {
            return None;
        }
        let start = usize::from(y) * usize::from(self.width);
        Some(&mut self.glyphs[start..start + usize::from(self.width)])
    }

    /// Columns of line `y` between the first and last glyph that differ from `prev`.
    ///
    /// Both buffers must have the same size; `None` means the line is unchanged.
    pub fn changed_span(&self, prev: &FrameBuffer, y: u16) -> Option<Range<u16>> {
        let (now, before) = (self.line(y), prev.line(y));
        let first = now.iter().zip(before).position(|(a, b)| a != b)?;
        let last = now.iter().zip(before).rposition(|(a, b)| a != b)?;
        Some(first as u16..last as u16 + 1)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.line(y).get(usize::from(x)).copied()
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        if let Some(slot) = self
            .line_mut(y)
            .and_then(|line| line.get_mut(usize::from(x)))
        {
            *slot = style.glyph(ch);
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let Some(line) = self.line_mut(y) else {
            return;
        };
        let start = usize::from(x).min(line.len());
        for (slot, ch) in line[start..].iter_mut().zip(s.chars()) {
            *slot = style.glyph(ch);
        }
    }

    /// Write a decimal number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) {
        let mut digits = [0u8; 10];
        let mut n = value;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for (i, d) in digits[..len].iter().rev().enumerate() {
            self.put_char(x.saturating_add(i as u16), y, *d as char, style);
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for line_y in y..y.saturating_add(h) {
            let Some(line) = self.line_mut(line_y) else {
                break;
            };
            let start = usize::from(x).min(line.len());
            let end = usize::from(x.saturating_add(w)).min(line.len());
            line[start..end].fill(style.glyph(ch));
        }
    }

    /// Characters of one line, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        self.line(y).iter().map(|g| g.ch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_u32_writes_digits_left_to_right() {
        let mut fb = FrameBuffer::new(12, 1);
        fb.put_u32(1, 0, 1234, CellStyle::default());
        assert_eq!(fb.row_text(0), " 1234       ");

        fb.put_u32(0, 0, 0, CellStyle::default());
        assert_eq!(fb.get(0, 0).unwrap().ch, '0');

        let mut fb = FrameBuffer::new(10, 1);
        fb.put_u32(0, 0, u32::MAX, CellStyle::default());
        assert_eq!(fb.row_text(0), "4294967295");
    }

    #[test]
    fn writes_outside_are_ignored() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(1, 1, "abcdef", CellStyle::default());
        assert_eq!(fb.row_text(1), " ab");
        fb.put_char(5, 5, 'x', CellStyle::default());
        assert_eq!(fb.get(5, 5), None);
        fb.fill_rect(2, 0, 4, 9, '#', CellStyle::default());
        assert_eq!(fb.row_text(0), "  #");
        assert_eq!(fb.row_text(1), " a#");
    }

    #[test]
    fn changed_span_covers_first_to_last_difference() {
        let prev = FrameBuffer::new(8, 2);
        let mut next = prev.clone();
        next.put_char(2, 1, 'x', CellStyle::default());
        next.put_char(5, 1, 'y', CellStyle::default());

        assert_eq!(next.changed_span(&prev, 0), None);
        assert_eq!(next.changed_span(&prev, 1), Some(2..6));
    }

    #[test]
    fn style_only_change_counts_as_changed() {
        let prev = FrameBuffer::new(4, 1);
        let mut next = prev.clone();
        next.put_char(3, 0, ' ', CellStyle::default().bold());
        assert_eq!(next.changed_span(&prev, 0), Some(3..4));
    }

    #[test]
    fn resize_keeps_default_fill() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(4, 3);
        assert_eq!(fb.line(2).len(), 4);
        assert_eq!(fb.get(3, 2), Some(Glyph::default()));
        assert!(fb.line(3).is_empty());
    }
}
