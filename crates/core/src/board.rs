//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color
//! token of a locked block. Uses a flat array for cache locality and
//! zero-allocation line clears.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Rows above the board (y < 0) are open space.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{BlockColor, Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Rows removed by one clear pass, in removal order
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// Decides whether a full row may be removed, and hears about removals
///
/// Any `FnMut(usize) -> bool` works as a gate that ignores removals.
pub trait RowGate {
    fn is_clearable(&mut self, row: usize) -> bool;

    /// Called after `row` was removed and everything above shifted down
    fn row_removed(&mut self, _row: usize) {}
}

impl<F: FnMut(usize) -> bool> RowGate for F {
    fn is_clearable(&mut self, row: usize) -> bool {
        self(row)
    }
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Whether `shape` fits with its top-left corner at (x, y)
    ///
    /// Fails on side walls, the floor, or a locked cell. Cells above the
    /// board (negative rows) always fit.
    pub fn can_place(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.cells().all(|(row, col)| {
            let px = x as i16 + col as i16;
            let py = y as i16 + row as i16;
            if px < 0 || px >= BOARD_WIDTH as i16 || py >= BOARD_HEIGHT as i16 {
                return false;
            }
            py < 0 || !self.is_occupied(px as i8, py as i8)
        })
    }

    /// Write `color` into every cell `shape` covers at (x, y)
    ///
    /// Cells outside the board are skipped. Returns the number of cells written.
    pub fn lock(&mut self, shape: &Shape, x: i8, y: i8, color: BlockColor) -> usize {
        let mut written = 0;
        for (row, col) in shape.cells() {
            let px = x.checked_add(col);
            let py = y.checked_add(row);
            if let (Some(px), Some(py)) = (px, py) {
                if self.set(px, py, Some(color)) {
                    written += 1;
                }
            }
        }
        written
    }

    /// Remove row `y` and shift all rows above it down by one
    /// Returns false if `y` is out of range
    pub fn remove_row(&mut self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }

        let width = BOARD_WIDTH as usize;
        // copy_within handles overlapping ranges safely
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);
        true
    }

    /// Clear every full row the gate allows, scanning bottom to top
    ///
    /// After a removal the same index is examined again, since the row above
    /// has shifted into it. Returned indices are as seen at removal time.
    pub fn clear_full_rows<G: RowGate + ?Sized>(&mut self, gate: &mut G) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = BOARD_HEIGHT as usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) && gate.is_clearable(row) {
                self.remove_row(row);
                gate.row_removed(row);
                // Every removal consumes a full row and inserts an empty one,
                // so a single pass can never exceed the board height.
                if cleared.try_push(row as u8).is_err() {
                    break;
                }
                continue;
            }
            y -= 1;
        }

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy cells into a row-major 2D grid
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill an entire row with `color`
    pub fn fill_row(&mut self, y: i8, color: BlockColor) {
        for x in 0..BOARD_WIDTH as i8 {
            self.set(x, y, Some(color));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
