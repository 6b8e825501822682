//! Geometry module - pure functions over 4-cell piece shapes
//!
//! Coordinates are `(row, col)` with row 0 at the bottom of the playfield.
//! Nothing here validates against the board; legality is the board's job.

use crate::types::VISIBLE_HEIGHT;

/// A single cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: i8,
    pub col: i8,
}

impl Point {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

/// Index of the rotation pivot inside a [`Shape`].
pub const PIVOT: usize = 1;

/// Four points forming one tetromino. Element [`PIVOT`] is the rotation center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape(pub [Point; 4]);

impl Shape {
    pub const fn new(points: [Point; 4]) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }

    pub fn pivot(&self) -> Point {
        self.0[PIVOT]
    }

    /// Offset every point by `(d_row, d_col)`.
    pub fn translate(&self, d_row: i8, d_col: i8) -> Shape {
        let mut out = self.0;
        for p in &mut out {
            p.row += d_row;
            p.col += d_col;
        }
        Shape(out)
    }

    /// One row toward the floor.
    pub fn down(&self) -> Shape {
        self.translate(-1, 0)
    }

    /// Quarter turn about the pivot.
    ///
    /// With `(d_row, d_col)` measured from a point to the pivot, the point
    /// lands at `pivot + (-d_col, d_row)`. The pivot itself never moves.
    pub fn rotate_cw(&self) -> Shape {
        let pivot = self.pivot();
        let mut out = self.0;
        for (i, p) in out.iter_mut().enumerate() {
            if i == PIVOT {
                continue;
            }
            let d_row = pivot.row - p.row;
            let d_col = pivot.col - p.col;
            p.row = pivot.row - d_col;
            p.col = pivot.col + d_row;
        }
        Shape(out)
    }

    /// Column span of the bounding box (rightmost minus leftmost column).
    ///
    /// A horizontal I piece has width 3; the number of occupied columns is `width() + 1`.
    pub fn width(&self) -> i8 {
        let (min, max) = span(self.0.iter().map(|p| p.col));
        max - min
    }

    /// Row span of the bounding box (top minus bottom row).
    pub fn height(&self) -> i8 {
        let (min, max) = span(self.0.iter().map(|p| p.row));
        max - min
    }

    /// Lowest and leftmost corner of the bounding box.
    pub fn origin(&self) -> Point {
        let (row, _) = span(self.0.iter().map(|p| p.row));
        let (col, _) = span(self.0.iter().map(|p| p.col));
        Point { row, col }
    }

    /// True if any point sits in the hidden spawn rows.
    pub fn is_above_spawn_limit(&self) -> bool {
        self.0.iter().any(|p| p.row >= VISIBLE_HEIGHT as i8)
    }

    /// Points sorted so two shapes covering the same cells compare equal.
    pub fn normalized(&self) -> [Point; 4] {
        let mut pts = self.0;
        pts.sort();
        pts
    }
}

fn span(values: impl Iterator<Item = i8>) -> (i8, i8) {
    values.fold((i8::MAX, i8::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
