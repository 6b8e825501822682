//! GameView: paints a `core::GameSnapshot` into a framebuffer.
//!
//! Pure, no terminal I/O. Only the 20 visible rows are drawn, and board row 0
//! is the bottom line of the well, so rows are flipped on the way to the screen.

use crate::core::{canonical_shape, color_of, GameSnapshot, GHOST_CELL};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, PieceKind, BOARD_WIDTH, VISIBLE_HEIGHT};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const PANEL_MIN_WIDTH: u16 = 12;

/// Terminal colors for the eight base palette slots, in `Cell` order.
const PALETTE: [Rgb; 8] = [
    Rgb::new(80, 220, 220),  // cyan
    Rgb::new(80, 120, 220),  // blue
    Rgb::new(240, 130, 190), // pink
    Rgb::new(170, 100, 220), // purple
    Rgb::new(220, 80, 80),   // red
    Rgb::new(240, 220, 80),  // yellow
    Rgb::new(100, 220, 120), // green
    Rgb::new(150, 150, 150), // gray
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Vertical placement of the well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the bordered well sits on screen for one frame.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    /// Outer size, border included.
    w: u16,
    h: u16,
}

impl Layout {
    fn right(&self) -> u16 {
        self.x + self.w - 1
    }

    fn bottom(&self) -> u16 {
        self.y + self.h - 1
    }
}

pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
    /// Terminal lines per board cell.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square in most fonts.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let w = u16::from(BOARD_WIDTH) * self.cell_w + 2;
        let h = u16::from(VISIBLE_HEIGHT) * self.cell_h + 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            x: viewport.width.saturating_sub(w) / 2,
            y,
            w,
            h,
        }
    }

    /// Paint a snapshot, reusing `fb` and resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let layout = self.layout(viewport);
        draw_frame(fb, layout, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));
        self.draw_well(fb, snap, layout);
        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.game_over {
            draw_banner(fb, layout, "GAME OVER");
        }
    }

    /// Paint into a freshly allocated framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Terminal position of the top-left character of a visible board cell,
    /// for a well whose border starts at `(start_x, start_y)`.
    pub fn cell_origin(&self, start_x: u16, start_y: u16, row: i8, col: i8) -> (u16, u16) {
        let line = (VISIBLE_HEIGHT as i8 - 1 - row) as u16;
        (
            start_x + 1 + col as u16 * self.cell_w,
            start_y + 1 + line * self.cell_h,
        )
    }

    fn paint_cell(
        &self,
        fb: &mut FrameBuffer,
        (layout, row, col): (Layout, i8, i8),
        glyph: char,
        style: CellStyle,
    ) {
        let (x, y) = self.cell_origin(layout.x, layout.y, row, col);
        fb.fill_rect(x, y, self.cell_w, self.cell_h, glyph, style);
    }

    fn draw_well(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: Layout) {
        let empty = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        let ghost = cell_rgb(GHOST_CELL).map(|tint| CellStyle::new(tint, WELL_BG).dim());

        for row in 0..VISIBLE_HEIGHT as i8 {
            for col in 0..BOARD_WIDTH as i8 {
                let (glyph, style) = match snap.cell(row, col).and_then(cell_rgb) {
                    Some(fg) => ('█', CellStyle::new(fg, WELL_BG).bold()),
                    None => ('·', empty),
                };
                self.paint_cell(fb, (layout, row, col), glyph, style);
            }
        }

        // The landing preview only shows through empty cells.
        let (Some(points), Some(style)) = (snap.ghost, ghost) else {
            return;
        };
        for p in points {
            if p.row < VISIBLE_HEIGHT as i8 && snap.cell(p.row, p.col) == Some(Cell::Empty) {
                self.paint_cell(fb, (layout, p.row, p.col), '░', style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: Layout,
    ) {
        let x = layout.x.saturating_add(layout.w).saturating_add(2);
        if viewport.width.saturating_sub(x) < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.y;
        for (name, amount) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y.saturating_add(1), amount, value);
            y = y.saturating_add(3);
        }

        fb.put_str(x, y, "NEXT", label);
        self.draw_preview(fb, snap.next, x, y.saturating_add(1));
    }

    /// Draw a kind's canonical shape with its top row at terminal line `y`.
    fn draw_preview(&self, fb: &mut FrameBuffer, kind: PieceKind, x: u16, y: u16) {
        let Some(fg) = cell_rgb(color_of(kind)) else {
            return;
        };
        let style = CellStyle::new(fg, PANEL_BG).bold();
        let shape = canonical_shape(kind);
        let origin = shape.origin();
        let top = shape.height();
        for p in shape.points() {
            let dx = (p.col - origin.col) as u16 * self.cell_w;
            let dy = (top - (p.row - origin.row)) as u16 * self.cell_h;
            fb.fill_rect(x + dx, y + dy, self.cell_w, self.cell_h, '█', style);
        }
    }
}

/// Box-drawing border around the well.
fn draw_frame(fb: &mut FrameBuffer, layout: Layout, style: CellStyle) {
    let Layout { x, y, w, h } = layout;
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (layout.right(), layout.bottom());
    fb.fill_rect(x + 1, y, w - 2, 1, '─', style);
    fb.fill_rect(x + 1, bottom, w - 2, 1, '─', style);
    fb.fill_rect(x, y + 1, 1, h - 2, '│', style);
    fb.fill_rect(right, y + 1, 1, h - 2, '│', style);
    let corners = [(x, y, '┌'), (right, y, '┐'), (x, bottom, '└'), (right, bottom, '┘')];
    for (cx, cy, corner) in corners {
        fb.put_char(cx, cy, corner, style);
    }
}

/// One line of text centered across the middle of the well.
fn draw_banner(fb: &mut FrameBuffer, layout: Layout, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = layout.x.saturating_add(layout.w.saturating_sub(text_w) / 2);
    let y = layout.y.saturating_add(layout.h / 2);
    fb.put_str(x, y, text, CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold());
}

/// Terminal color of a board cell, `None` for empty.
///
/// Special variants share their base color.
pub fn cell_rgb(cell: Cell) -> Option<Rgb> {
    let slot = cell.base().palette_index()?;
    PALETTE.get(usize::from(slot)).copied()
}
