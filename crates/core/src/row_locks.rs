//! Row lock tracker - time-limited freezes that keep full rows from clearing
//!
//! A frozen piece freezes every row it lands on for a fixed wall-clock
//! duration. Expired locks are pruned lazily whenever clearability is
//! queried. When a row below or at a lock is removed, the locks above it are
//! re-keyed one row down so they keep following their physical row.

use serde::Serialize;

use crate::board::RowGate;
use crate::types::{BOARD_HEIGHT, ROW_FREEZE_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowLock {
    pub row: u8,
    pub expires_at_ms: u64,
}

#[derive(Debug, Clone)]
pub struct RowLockTracker {
    locks: Vec<RowLock>,
    duration_ms: u64,
}

impl RowLockTracker {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            locks: Vec::with_capacity(BOARD_HEIGHT as usize),
            duration_ms,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Freeze `row` until `now_ms + duration`
    ///
    /// Does nothing if the row already holds an active lock, so a freeze is
    /// never extended. Returns true if a lock was added.
    pub fn freeze_row(&mut self, row: usize, now_ms: u64) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        self.prune(now_ms);
        if self.locks.iter().any(|l| l.row as usize == row) {
            return false;
        }
        self.locks.push(RowLock {
            row: row as u8,
            expires_at_ms: now_ms.saturating_add(self.duration_ms),
        });
        true
    }

    /// Whether `row` may be cleared at `now_ms`
    pub fn is_clearable(&mut self, row: usize, now_ms: u64) -> bool {
        self.prune(now_ms);
        !self.locks.iter().any(|l| l.row as usize == row)
    }

    /// Drop every lock whose expiry has been reached
    pub fn prune(&mut self, now_ms: u64) {
        self.locks.retain(|l| l.expires_at_ms > now_ms);
    }

    /// Follow a board row removal: the removed row's lock goes away and
    /// locks above it move one row down.
    pub fn row_removed(&mut self, removed: usize) {
        self.locks.retain(|l| l.row as usize != removed);
        for lock in &mut self.locks {
            if (lock.row as usize) < removed {
                lock.row += 1;
            }
        }
    }

    /// Locks still active at `now_ms`, without pruning
    pub fn active(&self, now_ms: u64) -> impl Iterator<Item = &RowLock> + '_ {
        self.locks.iter().filter(move |l| l.expires_at_ms > now_ms)
    }

    /// Per-row frozen flags at `now_ms`
    pub fn frozen_mask(&self, now_ms: u64) -> [bool; BOARD_HEIGHT as usize] {
        let mut mask = [false; BOARD_HEIGHT as usize];
        for lock in self.active(now_ms) {
            mask[lock.row as usize] = true;
        }
        mask
    }

    /// Number of stored locks, including expired ones not yet pruned
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    pub fn clear(&mut self) {
        self.locks.clear();
    }

    /// Gate for [`crate::Board::clear_full_rows`] evaluated at `now_ms`
    pub fn gate(&mut self, now_ms: u64) -> FrozenRowGate<'_> {
        FrozenRowGate {
            tracker: self,
            now_ms,
        }
    }
}

impl Default for RowLockTracker {
    fn default() -> Self {
        Self::new(ROW_FREEZE_MS)
    }
}

/// Row gate backed by a [`RowLockTracker`] at a fixed instant
pub struct FrozenRowGate<'a> {
    tracker: &'a mut RowLockTracker,
    now_ms: u64,
}

impl RowGate for FrozenRowGate<'_> {
    fn is_clearable(&mut self, row: usize) -> bool {
        self.tracker.is_clearable(row, self.now_ms)
    }

    fn row_removed(&mut self, row: usize) {
        self.tracker.row_removed(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freeze_is_idempotent_per_row() {
        let mut t = RowLockTracker::new(5000);
        assert!(t.freeze_row(19, 0));
        assert!(!t.freeze_row(19, 1000));
        assert_eq!(t.len(), 1);

        // Original expiry stands.
        assert!(!t.is_clearable(19, 4999));
        assert!(t.is_clearable(19, 5000));
    }

    #[test]
    fn row_can_refreeze_after_expiry() {
        let mut t = RowLockTracker::new(5000);
        t.freeze_row(10, 0);
        assert!(t.freeze_row(10, 6000));
        assert!(!t.is_clearable(10, 10_999));
        assert!(t.is_clearable(10, 11_000));
    }

    #[test]
    fn out_of_range_rows_are_ignored() {
        let mut t = RowLockTracker::new(5000);
        assert!(!t.freeze_row(20, 0));
        assert!(t.is_empty());
    }

    #[test]
    fn removal_rekeys_locks_above() {
        let mut t = RowLockTracker::new(5000);
        t.freeze_row(15, 0);
        t.freeze_row(19, 0);

        t.row_removed(17);
        let rows: Vec<u8> = t.active(0).map(|l| l.row).collect();
        assert_eq!(rows, vec![16, 19]);
        assert!(t.is_clearable(15, 0));
        assert!(!t.is_clearable(16, 0));
    }

    #[test]
    fn removal_drops_lock_on_removed_row() {
        let mut t = RowLockTracker::new(5000);
        t.freeze_row(12, 0);
        t.row_removed(12);
        assert!(t.is_empty());
    }

    #[test]
    fn frozen_mask_reflects_active_locks() {
        let mut t = RowLockTracker::new(100);
        t.freeze_row(3, 0);
        t.freeze_row(4, 50);
        let mask = t.frozen_mask(120);
        assert!(!mask[3]);
        assert!(mask[4]);
    }
}
