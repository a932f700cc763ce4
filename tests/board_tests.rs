//! Board tests - grid access, placement and gated row clearing

use frostfall::core::{get_shape, Board, RowGate};
use frostfall::types::{BlockColor, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const T: BlockColor = BlockColor::Piece(PieceKind::T);
const I: BlockColor = BlockColor::Piece(PieceKind::I);

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(T)));
    assert_eq!(board.get(5, 10), Some(Some(T)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Some(T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(T)));
}

#[test]
fn test_can_place_walls_floor_and_blocks() {
    let mut board = Board::new();
    let o = get_shape(PieceKind::O);

    assert!(board.can_place(&o, 0, 0));
    assert!(board.can_place(&o, 8, 18));
    assert!(!board.can_place(&o, -1, 0));
    assert!(!board.can_place(&o, 9, 0));
    assert!(!board.can_place(&o, 0, 19));

    // Rows above the board are open.
    assert!(board.can_place(&o, 4, -1));

    board.set(5, 11, Some(T));
    assert!(!board.can_place(&o, 4, 10));
    assert!(board.can_place(&o, 6, 10));
}

#[test]
fn test_lock_writes_color() {
    let mut board = Board::new();
    let t = get_shape(PieceKind::T);

    assert_eq!(board.lock(&t, 3, 18, BlockColor::Mystery), 4);
    for (x, y) in [(3, 18), (4, 18), (5, 18), (4, 19)] {
        assert_eq!(board.get(x, y), Some(Some(BlockColor::Mystery)));
    }
    assert_eq!(board.get(3, 19), Some(None));
}

#[test]
fn test_lock_clips_outside_cells() {
    let mut board = Board::new();
    let i = get_shape(PieceKind::I);
    assert_eq!(board.lock(&i, 8, 0, I), 2);
    assert!(board.is_occupied(8, 0));
    assert!(board.is_occupied(9, 0));
}

#[test]
fn test_remove_row_shifts_down() {
    let mut board = Board::new();
    board.fill_row(5, T);
    board.set(0, 3, Some(I));
    board.set(1, 4, Some(I));

    assert!(board.remove_row(5));
    assert_eq!(board.get(1, 5), Some(Some(I)));
    assert_eq!(board.get(0, 4), Some(Some(I)));
    assert_eq!(board.get(0, 3), Some(None));
    assert!(!board.remove_row(BOARD_HEIGHT as usize));
}

#[test]
fn test_clear_full_rows_without_gate() {
    let mut board = Board::new();
    board.fill_row(18, I);
    board.fill_row(19, T);
    board.set(0, 17, Some(T));

    let cleared = board.clear_full_rows(&mut |_: usize| true);
    assert_eq!(cleared.as_slice(), &[19, 19]);
    assert_eq!(board.get(0, 19), Some(Some(T)));
    assert!(!board.is_row_full(19));
}

#[test]
fn test_clear_skips_blocked_rows() {
    let mut board = Board::new();
    board.fill_row(17, I);
    board.fill_row(18, I);
    board.fill_row(19, I);

    let cleared = board.clear_full_rows(&mut |row: usize| row != 18);
    // 19 goes, then 18 slides to 19 and is asked about as row 19.
    assert_eq!(cleared.len(), 3);
    assert!(board.cells().iter().all(|c| c.is_none()));

    board.fill_row(19, I);
    board.fill_row(18, I);
    let cleared = board.clear_full_rows(&mut |row: usize| row == 18);
    assert_eq!(cleared.as_slice(), &[18]);
    assert!(board.is_row_full(19));
}

#[test]
fn test_second_clear_pass_is_a_no_op() {
    let mut board = Board::new();
    board.fill_row(17, I);
    board.fill_row(18, I);
    board.fill_row(19, I);
    board.set(0, 16, Some(T));
    board.set(3, 15, Some(T));

    // The bottom row stays blocked; 18 and 17 clear into its place above it.
    let mut gate = |row: usize| row != 19;
    let cleared = board.clear_full_rows(&mut gate);
    assert_eq!(cleared.as_slice(), &[18, 18]);
    assert!(board.is_row_full(19));
    assert_eq!(board.get(0, 18), Some(Some(T)));

    let before = board.clone();
    let cleared = board.clear_full_rows(&mut gate);
    assert!(cleared.is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_gate_hears_removals() {
    struct Log(Vec<usize>);
    impl RowGate for Log {
        fn is_clearable(&mut self, _row: usize) -> bool {
            true
        }
        fn row_removed(&mut self, row: usize) {
            self.0.push(row);
        }
    }

    let mut board = Board::new();
    board.fill_row(10, T);
    board.fill_row(12, T);
    let mut log = Log(Vec::new());
    board.clear_full_rows(&mut log);
    assert_eq!(log.0, vec![12, 11]);
}

#[test]
fn test_write_grid_matches_cells() {
    let mut board = Board::new();
    board.set(2, 7, Some(BlockColor::Frozen));
    let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    board.write_grid(&mut grid);
    assert_eq!(grid[7][2], Some(BlockColor::Frozen));
    assert_eq!(grid.iter().flatten().filter(|c| c.is_some()).count(), 1);
}
