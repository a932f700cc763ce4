//! Row lock tests - freezes, expiry and re-keying through real clears

use frostfall::core::{Board, RowLockTracker};
use frostfall::types::{BlockColor, PieceKind, ROW_FREEZE_MS};

const FILL: BlockColor = BlockColor::Piece(PieceKind::L);

#[test]
fn test_default_duration() {
    assert_eq!(RowLockTracker::default().duration_ms(), ROW_FREEZE_MS);
}

#[test]
fn test_frozen_row_survives_until_expiry() {
    let mut board = Board::new();
    let mut locks = RowLockTracker::new(5000);
    board.fill_row(19, FILL);
    locks.freeze_row(19, 1000);

    assert!(board.clear_full_rows(&mut locks.gate(1000)).is_empty());
    assert!(board.clear_full_rows(&mut locks.gate(5999)).is_empty());
    assert!(board.is_row_full(19));

    let cleared = board.clear_full_rows(&mut locks.gate(6000));
    assert_eq!(cleared.as_slice(), &[19]);
    assert!(locks.is_empty());
}

#[test]
fn test_lock_follows_its_row_down() {
    let mut board = Board::new();
    let mut locks = RowLockTracker::new(5000);

    // Row 15 is full and frozen; row 19 is full and clears.
    board.fill_row(15, FILL);
    board.fill_row(19, FILL);
    locks.freeze_row(15, 0);

    let cleared = board.clear_full_rows(&mut locks.gate(100));
    assert_eq!(cleared.as_slice(), &[19]);

    // The frozen row is now row 16 and still refuses to clear.
    assert!(board.is_row_full(16));
    let mask = locks.frozen_mask(100);
    assert!(mask[16]);
    assert!(!mask[15]);
    assert!(board.clear_full_rows(&mut locks.gate(100)).is_empty());
}

#[test]
fn test_mixed_frozen_and_free_rows() {
    let mut board = Board::new();
    let mut locks = RowLockTracker::new(5000);
    for y in 16..20 {
        board.fill_row(y, FILL);
    }
    locks.freeze_row(17, 0);
    locks.freeze_row(19, 0);

    let cleared = board.clear_full_rows(&mut locks.gate(10));
    assert_eq!(cleared.len(), 2);
    // Two frozen full rows remain at the bottom.
    assert!(board.is_row_full(19));
    assert!(board.is_row_full(18));
    assert!(!board.is_row_full(17));
    let active: Vec<u8> = locks.active(10).map(|l| l.row).collect();
    assert_eq!(active.len(), 2);
    assert!(active.contains(&18) && active.contains(&19));
}

#[test]
fn test_repeat_pass_with_frozen_row_clears_nothing() {
    let mut board = Board::new();
    let mut locks = RowLockTracker::new(5000);
    board.fill_row(19, FILL);
    board.fill_row(18, FILL);
    board.set(2, 17, Some(FILL));
    locks.freeze_row(19, 0);

    let cleared = board.clear_full_rows(&mut locks.gate(100));
    assert_eq!(cleared.as_slice(), &[18]);

    let before = board.clone();
    assert!(board.clear_full_rows(&mut locks.gate(200)).is_empty());
    assert_eq!(board, before);
    assert!(locks.frozen_mask(200)[19]);
}
