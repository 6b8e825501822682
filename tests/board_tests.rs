//! Board tests - collision, movement, rotation kicks, locking and row clears

use blockfall::core::pieces::spawn_max_offset;
use blockfall::core::{Board, Point, Shape};
use blockfall::types::{Cell, Direction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn points(shape: &Shape) -> Vec<(i8, i8)> {
    shape.normalized().iter().map(|p| (p.row, p.col)).collect()
}

fn active_shape(board: &Board) -> Shape {
    board.active().expect("active piece").shape
}

fn fill_row_except(board: &mut Board, row: i8, holes: &[i8]) {
    for col in 0..BOARD_WIDTH as i8 {
        if !holes.contains(&col) {
            board.set(row, col, Cell::Gray);
        }
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(1);
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert!(board.active().is_none());
    assert!(!board.game_over());
    assert_eq!(board.score(), 0);

    for row in 0..BOARD_HEIGHT as i8 {
        for col in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(row, col), Some(Cell::Empty));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(1);

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_HEIGHT as i8, 0), None);
    assert_eq!(board.get(0, BOARD_WIDTH as i8), None);
}

#[test]
fn test_collision_bounds_and_occupancy() {
    let mut board = Board::new(1);
    let at = |row, col| Shape::new([Point::new(row, col); 4]);

    assert!(!board.check_collision(&at(0, 0)));
    assert!(!board.check_collision(&at(21, 9)));
    assert!(board.check_collision(&at(-1, 0)));
    assert!(board.check_collision(&at(22, 0)));
    assert!(board.check_collision(&at(0, -1)));
    assert!(board.check_collision(&at(0, 10)));

    board.set(7, 4, Cell::Red);
    assert!(board.check_collision(&at(7, 4)));
    assert!(!board.check_collision(&at(7, 5)));
}

#[test]
fn test_spawn_uses_preview_and_rerolls_it() {
    let mut board = Board::new(5);
    let next = board.next_kind();
    assert!(board.spawn());
    assert_eq!(board.current_kind(), Some(next));

    let shape = active_shape(&board);
    assert!(shape.points().iter().all(|p| p.row >= 20));
    assert!(!board.check_collision(&shape));
}

#[test]
fn test_spawn_at_keeps_preview() {
    let mut board = Board::new(5);
    let next = board.next_kind();
    board.spawn_at(PieceKind::T, 3);
    assert_eq!(board.next_kind(), next);
    assert_eq!(board.current_kind(), Some(PieceKind::T));
}

#[test]
fn test_o_piece_stops_at_right_wall() {
    let mut board = Board::new(1);
    board.spawn_at(PieceKind::O, 4);
    assert_eq!(
        points(&active_shape(&board)),
        vec![(20, 4), (20, 5), (21, 4), (21, 5)]
    );

    // Left column goes 4 -> 8; the right column then sits on col 9.
    let mut moves = 0;
    while board.move_piece(Direction::Right) {
        moves += 1;
    }
    assert_eq!(moves, 4);

    let before = active_shape(&board);
    assert_eq!(
        points(&before),
        vec![(20, 8), (20, 9), (21, 8), (21, 9)]
    );
    assert!(!board.move_piece(Direction::Right));
    assert_eq!(active_shape(&board), before);
}

#[test]
fn test_move_blocked_by_stack() {
    let mut board = Board::new(1);
    board.spawn_at(PieceKind::O, 4);
    board.set(21, 3, Cell::Gray);

    assert!(!board.move_piece(Direction::Left));
    assert!(board.move_piece(Direction::Right));
}

#[test]
fn test_o_piece_never_rotates() {
    let mut board = Board::new(1);
    board.spawn_at(PieceKind::O, 2);
    let before = active_shape(&board);
    assert!(!board.rotate_piece());
    assert_eq!(active_shape(&board), before);
}

#[test]
fn test_i_rotation_uses_down_kick_below_spawn_row() {
    let mut board = Board::new(1);
    board.spawn_at(PieceKind::I, 2);

    // On row 21 even the down kick leaves the bar poking out of the top.
    let before = active_shape(&board);
    assert!(!board.rotate_piece());
    assert_eq!(active_shape(&board), before);

    // One row lower, in place and sideways still reach row 22; the down kick fits.
    assert!(!board.apply_gravity());
    assert!(board.rotate_piece());
    assert_eq!(
        points(&active_shape(&board)),
        vec![(18, 3), (19, 3), (20, 3), (21, 3)]
    );
}

#[test]
#[should_panic(expected = "spawn offset")]
fn test_spawn_at_rejects_offset_past_right_wall() {
    let mut board = Board::new(1);
    board.spawn_at(PieceKind::I, 7);
}

#[test]
#[should_panic(expected = "spawn offset")]
fn test_spawn_at_rejects_negative_offset() {
    let mut board = Board::new(1);
    board.spawn_at(PieceKind::T, -1);
}

#[test]
fn test_spawn_at_accepts_full_offset_range() {
    for kind in PieceKind::ALL {
        for offset in 0..=spawn_max_offset(kind) {
            let mut board = Board::new(1);
            board.spawn_at(kind, offset);
            assert!(!board.check_collision(&active_shape(&board)), "{kind:?} at {offset}");
        }
    }
}

/// T piece standing with its bar on col 9 and its stem on col 8.
fn t_against_right_wall() -> Board {
    let mut board = Board::new(1);
    board.spawn_at(PieceKind::T, 7);
    for _ in 0..5 {
        assert!(!board.apply_gravity());
    }
    // Three in-place turns bring the stem round to the left of the bar.
    for _ in 0..3 {
        assert!(board.rotate_piece());
    }
    assert!(board.move_piece(Direction::Right));
    assert_eq!(
        points(&active_shape(&board)),
        vec![(15, 9), (16, 8), (16, 9), (17, 9)]
    );
    board
}

#[test]
fn test_rotation_against_right_wall_kicks_left() {
    let mut board = t_against_right_wall();

    assert!(board.rotate_piece());
    let shape = active_shape(&board);
    assert_eq!(points(&shape), vec![(15, 8), (16, 7), (16, 8), (16, 9)]);
    assert!(shape.points().iter().all(|p| p.col <= 9));
}

#[test]
fn test_rotation_with_every_kick_blocked_is_noop() {
    let mut board = t_against_right_wall();
    board.set(16, 7, Cell::Gray);

    let before = active_shape(&board);
    assert!(!board.rotate_piece());
    assert_eq!(active_shape(&board), before);
}

#[test]
fn test_gravity_moves_then_locks() {
    let mut board = Board::new(1);
    board.spawn_at(PieceKind::O, 0);

    for _ in 0..20 {
        assert!(!board.apply_gravity());
    }
    assert!(board.is_touching_floor());
    assert!(board.apply_gravity());

    assert_eq!(board.get(0, 0), Some(Cell::Pink));
    assert_eq!(board.get(1, 1), Some(Cell::Pink));
    // A fresh piece took its place.
    assert!(board.active().is_some());
    assert!(!board.game_over());
}

#[test]
fn test_vertical_i_completes_row_five() {
    let mut board = Board::new(1);
    fill_row_except(&mut board, 5, &[3]);
    board.set(4, 3, Cell::Gray);
    board.set(10, 0, Cell::Red);

    board.spawn_at(PieceKind::I, 2);
    assert!(!board.apply_gravity());
    assert!(board.rotate_piece());
    assert!(board.instant_drop());

    let lock = board.take_last_lock().expect("lock event");
    assert_eq!(lock.rows.as_slice(), &[5, 6, 7, 8]);
    assert_eq!(lock.lines_cleared, 1);
    assert_eq!(board.score(), 200);
    assert_eq!(board.lines(), 1);

    // Rows 6..21 moved down into 5..20.
    for col in 0..BOARD_WIDTH as i8 {
        let expected = if col == 3 { Cell::Blue } else { Cell::Empty };
        assert_eq!(board.get(5, col), Some(expected), "row 5 col {col}");
    }
    assert_eq!(board.get(6, 3), Some(Cell::Blue));
    assert_eq!(board.get(7, 3), Some(Cell::Blue));
    assert_eq!(board.get(8, 3), Some(Cell::Empty));
    assert_eq!(board.get(9, 0), Some(Cell::Red));
    assert_eq!(board.get(10, 0), Some(Cell::Empty));
    assert_eq!(board.get(4, 3), Some(Cell::Gray));
}

#[test]
fn test_horizontal_i_clears_bottom_row() {
    let mut board = Board::new(1);
    fill_row_except(&mut board, 0, &[0, 1, 2, 3]);

    board.spawn_at(PieceKind::I, 0);
    assert!(board.instant_drop());

    assert_eq!(board.score(), 200);
    assert!(board.cells().iter().all(|c| c.is_empty()));
}

#[test]
fn test_two_rows_pay_combo_bonus() {
    let mut board = Board::new(1);
    fill_row_except(&mut board, 0, &[8, 9]);
    fill_row_except(&mut board, 1, &[8, 9]);

    board.spawn_at(PieceKind::O, 8);
    assert!(board.instant_drop());

    assert_eq!(board.lines(), 2);
    assert_eq!(board.score(), 200 * 2 + 200);
    assert!(board.cells().iter().all(|c| c.is_empty()));
}

/// Turn a fresh I upright, push it to column 0 and report its point rows in order.
fn vertical_i_in_column_zero(board: &mut Board, turns: usize) -> Vec<i8> {
    board.spawn_at(PieceKind::I, 0);
    assert!(!board.apply_gravity());
    for _ in 0..turns {
        assert!(board.rotate_piece());
    }
    while board.move_piece(Direction::Left) {}
    let shape = active_shape(board);
    assert!(shape.points().iter().all(|p| p.col == 0));
    shape.points().iter().map(|p| p.row).collect()
}

#[test]
fn test_four_rows_with_vertical_i() {
    let mut board = Board::new(1);
    for row in 0..4 {
        fill_row_except(&mut board, row, &[0]);
    }
    board.set(4, 5, Cell::Green);

    // Top point first: each delete pulls the next full row under a later point.
    let rows = vertical_i_in_column_zero(&mut board, 3);
    assert!(rows.windows(2).all(|w| w[0] > w[1]), "{rows:?}");
    assert!(board.instant_drop());

    assert_eq!(board.lines(), 4);
    assert_eq!(board.score(), 200 * 4 + 200 * 3);
    assert_eq!(board.get(0, 5), Some(Cell::Green));
    assert_eq!(board.get(4, 5), Some(Cell::Empty));
}

#[test]
fn test_bottom_first_i_clears_all_rows_over_several_passes() {
    let mut board = Board::new(1);
    for row in 0..4 {
        fill_row_except(&mut board, row, &[0]);
    }

    // Bottom point first: deleting row 0 shifts the remaining full rows
    // below points that were already checked, so later passes must find them.
    let rows = vertical_i_in_column_zero(&mut board, 1);
    assert!(rows.windows(2).all(|w| w[0] < w[1]), "{rows:?}");
    assert!(board.instant_drop());

    let lock = board.take_last_lock().expect("lock event");
    assert_eq!(lock.lines_cleared, 4);
    assert_eq!(board.lines(), 4);
    assert_eq!(board.score(), 1400);
    assert!(board.cells().iter().all(|c| c.is_empty()));
}

#[test]
fn test_rows_outside_the_locked_piece_are_not_cleared() {
    let mut board = Board::new(1);
    fill_row_except(&mut board, 0, &[]);

    board.spawn_at(PieceKind::O, 0);
    assert!(board.instant_drop());

    assert_eq!(board.lines(), 0);
    assert_eq!(board.get(0, 9), Some(Cell::Gray));
}

#[test]
fn test_ghost_matches_instant_drop() {
    let mut board = Board::from_rows(
        9,
        &[
            "......#...",
            "...####...",
            "#########.",
        ],
    );
    board.spawn_at(PieceKind::L, 3);

    let ghost = board.ghost().expect("ghost");
    let before = board.clone();

    let mut dropped = board.clone();
    dropped.instant_drop();
    for p in ghost.points() {
        assert_eq!(dropped.get(p.row, p.col), Some(Cell::Cyan));
    }

    // Computing the ghost never changes the board.
    assert_eq!(board.cells(), before.cells());
    assert_eq!(board.active(), before.active());
}

#[test]
fn test_instant_drop_equals_repeated_gravity() {
    let mut a = Board::from_rows(4, &["..##......", "#.###..#.#"]);
    a.spawn_at(PieceKind::S, 5);
    let mut b = a.clone();

    assert!(a.instant_drop());
    while !b.apply_gravity() {}

    assert_eq!(a.cells(), b.cells());
    assert_eq!(a.score(), b.score());
    assert_eq!(a.active(), b.active());
    assert_eq!(a.next_kind(), b.next_kind());
}

#[test]
fn test_game_over_when_lock_reaches_spawn_rows() {
    let mut board = Board::new(1);

    // Ten O pieces stack cols 0-1 up to row 19.
    for _ in 0..10 {
        board.spawn_at(PieceKind::O, 0);
        assert!(board.instant_drop());
        assert!(!board.game_over());
    }

    board.spawn_at(PieceKind::O, 0);
    assert!(board.instant_drop());
    assert!(board.game_over());
    assert!(board.take_last_lock().unwrap().game_over);
    assert!(board.active().is_none());

    // Nothing mutates once the game is over.
    let score = board.score();
    assert!(!board.spawn());
    board.spawn_at(PieceKind::T, 3);
    assert!(board.active().is_none());
    assert!(!board.apply_gravity());
    assert!(!board.instant_drop());
    assert!(!board.move_piece(Direction::Left));
    assert!(!board.rotate_piece());
    assert_eq!(board.score(), score);
    assert!(board.game_over());
}

#[test]
fn test_grid_composites_stack_and_piece() {
    let mut board = Board::from_rows(1, &["#........."]);
    board.spawn_at(PieceKind::T, 3);

    let grid = board.grid();
    assert_eq!(grid[0][0], Cell::Gray);
    assert_eq!(grid[21][3], Cell::Purple);
    assert_eq!(grid[20][4], Cell::Purple);
    let filled = grid.iter().flatten().filter(|c| !c.is_empty()).count();
    assert_eq!(filled, 5);
}
