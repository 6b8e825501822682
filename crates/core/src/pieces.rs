//! Pieces module - the piece catalog
//!
//! Every kind has one canonical shape drawn in the bottom two rows of a
//! piece-local frame, and one color. Rotation always happens about point
//! index 1 of the current shape; see [`Shape::rotate_cw`].

use crate::geometry::{Point, Shape};
use crate::types::{Cell, PieceKind, BOARD_WIDTH, SPAWN_ROW};

const fn p(row: i8, col: i8) -> Point {
    Point::new(row, col)
}

const I_SHAPE: Shape = Shape::new([p(1, 0), p(1, 1), p(1, 2), p(1, 3)]);
const J_SHAPE: Shape = Shape::new([p(1, 0), p(0, 1), p(0, 0), p(0, 2)]);
const L_SHAPE: Shape = Shape::new([p(1, 0), p(1, 1), p(1, 2), p(0, 0)]);
const O_SHAPE: Shape = Shape::new([p(1, 0), p(1, 1), p(0, 0), p(0, 1)]);
const S_SHAPE: Shape = Shape::new([p(0, 0), p(0, 1), p(1, 1), p(1, 2)]);
const T_SHAPE: Shape = Shape::new([p(1, 0), p(1, 1), p(1, 2), p(0, 1)]);
const Z_SHAPE: Shape = Shape::new([p(1, 0), p(1, 1), p(0, 1), p(0, 2)]);

/// Canonical spawn orientation of a piece kind, in piece-local coordinates.
pub fn canonical_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Block color a piece kind paints onto the board.
pub fn color_of(kind: PieceKind) -> Cell {
    match kind {
        PieceKind::I => Cell::Blue,
        PieceKind::J => Cell::Green,
        PieceKind::L => Cell::Cyan,
        PieceKind::O => Cell::Pink,
        PieceKind::S => Cell::Red,
        PieceKind::T => Cell::Purple,
        PieceKind::Z => Cell::Yellow,
    }
}

/// Color used for the landing preview.
pub const GHOST_CELL: Cell = Cell::Gray;

/// Largest horizontal spawn offset that keeps the whole piece on the board.
///
/// Offsets are drawn from `0..=spawn_max_offset(kind)`: 6 for I, 8 for O, 7 otherwise.
pub fn spawn_max_offset(kind: PieceKind) -> i8 {
    BOARD_WIDTH as i8 - (canonical_shape(kind).width() + 1)
}

/// Canonical shape moved into the spawn rows at the given column offset.
pub fn spawn_shape(kind: PieceKind, offset: i8) -> Shape {
    canonical_shape(kind).translate(SPAWN_ROW, offset)
}

/// Whether the kind takes part in rotation at all.
pub fn rotates(kind: PieceKind) -> bool {
    kind != PieceKind::O
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn colors_are_distinct() {
        let colors: HashSet<Cell> = PieceKind::ALL.iter().map(|k| color_of(*k)).collect();
        assert_eq!(colors.len(), 7);
        assert!(!colors.contains(&Cell::Empty));
        assert!(!colors.contains(&GHOST_CELL));
    }

    #[test]
    fn canonical_shapes_fit_two_rows() {
        for kind in PieceKind::ALL {
            let shape = canonical_shape(kind);
            assert!(shape.points().iter().all(|p| (0..=1).contains(&p.row)));
            assert_eq!(shape.origin(), Point::new(0, 0), "{kind:?}");
        }
    }

    #[test]
    fn spawn_offsets_by_width() {
        assert_eq!(spawn_max_offset(PieceKind::I), 6);
        assert_eq!(spawn_max_offset(PieceKind::O), 8);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(spawn_max_offset(kind), 7);
        }
    }

    #[test]
    fn spawn_shape_touches_right_wall_at_max_offset() {
        for kind in PieceKind::ALL {
            let shape = spawn_shape(kind, spawn_max_offset(kind));
            let right = shape.points().iter().map(|p| p.col).max().unwrap();
            assert_eq!(right, BOARD_WIDTH as i8 - 1);
            assert!(shape.points().iter().all(|p| p.row >= SPAWN_ROW));
        }
    }

    #[test]
    fn only_o_skips_rotation() {
        assert!(!rotates(PieceKind::O));
        assert!(rotates(PieceKind::T));
    }
}
