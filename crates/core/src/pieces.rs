//! Pieces module - shape catalog and matrix rotation
//!
//! Shapes are small boolean matrices (at most 4x4) anchored at their top-left
//! cell. Rotation is a plain clockwise matrix rotation (transpose, then
//! reverse each row); there are no kick tables.

use serde::Serialize;

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest row/column count of any shape
pub const MAX_SHAPE_DIM: usize = 4;

/// One orientation of a piece as an occupancy matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from a row-major 0/1 matrix
    pub const fn from_matrix<const R: usize, const C: usize>(matrix: [[u8; C]; R]) -> Self {
        assert!(R <= MAX_SHAPE_DIM && C <= MAX_SHAPE_DIM);
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                cells[r][c] = matrix[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether (row, col) is occupied; false outside the matrix
    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.cells[row as usize][col as usize]
    }

    /// Occupied cells as (row, col) offsets from the top-left corner
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.cells[r as usize][c as usize])
                .map(move |c| (r as i8, c as i8))
        })
    }

    /// Row offsets that contain at least one occupied cell
    pub fn occupied_rows(&self) -> impl Iterator<Item = i8> + '_ {
        (0..self.rows)
            .filter(move |&r| self.cells[r as usize].iter().any(|&filled| filled))
            .map(|r| r as i8)
    }

    /// 90° clockwise rotation: `rotated[i][j] = self[rows - 1 - j][i]`
    pub fn rotate_cw(&self) -> Shape {
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let rows = self.rows as usize;
        for (i, out_row) in cells.iter_mut().enumerate().take(self.cols as usize) {
            for (j, out) in out_row.iter_mut().enumerate().take(rows) {
                *out = self.cells[rows - 1 - j][i];
            }
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

const I_SHAPE: Shape = Shape::from_matrix([[1, 1, 1, 1]]);
const L_SHAPE: Shape = Shape::from_matrix([[1, 0], [1, 0], [1, 1]]);
const J_SHAPE: Shape = Shape::from_matrix([[0, 1], [0, 1], [1, 1]]);
const O_SHAPE: Shape = Shape::from_matrix([[1, 1], [1, 1]]);
const Z_SHAPE: Shape = Shape::from_matrix([[1, 1, 0], [0, 1, 1]]);
const S_SHAPE: Shape = Shape::from_matrix([[0, 1, 1], [1, 1, 0]]);
const T_SHAPE: Shape = Shape::from_matrix([[1, 1, 1], [0, 1, 0]]);

/// Catalog (spawn) shape of a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
    }
}

/// Spawn column that centers a shape horizontally
pub fn spawn_x(shape: &Shape) -> i8 {
    ((BOARD_WIDTH - shape.cols().min(BOARD_WIDTH)) / 2) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(shape: &Shape) -> Vec<(i8, i8)> {
        shape.cells().collect()
    }

    #[test]
    fn test_catalog_dimensions() {
        assert_eq!((get_shape(PieceKind::I).rows(), get_shape(PieceKind::I).cols()), (1, 4));
        assert_eq!((get_shape(PieceKind::L).rows(), get_shape(PieceKind::L).cols()), (3, 2));
        assert_eq!((get_shape(PieceKind::O).rows(), get_shape(PieceKind::O).cols()), (2, 2));
        assert_eq!((get_shape(PieceKind::T).rows(), get_shape(PieceKind::T).cols()), (2, 3));
        for kind in PieceKind::ALL {
            assert_eq!(get_shape(kind).cells().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotate_t() {
        // [1,1,1]      [0,1]
        // [0,1,0]  ->  [1,1]
        //              [0,1]
        let rotated = get_shape(PieceKind::T).rotate_cw();
        assert_eq!((rotated.rows(), rotated.cols()), (3, 2));
        assert_eq!(filled(&rotated), vec![(0, 1), (1, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_rotate_i_is_vertical() {
        let rotated = get_shape(PieceKind::I).rotate_cw();
        assert_eq!((rotated.rows(), rotated.cols()), (4, 1));
        assert_eq!(filled(&rotated), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            let back = shape.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
            assert_eq!(back, shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotation_leaves_catalog_alone() {
        let _ = get_shape(PieceKind::L).rotate_cw();
        assert_eq!(get_shape(PieceKind::L), L_SHAPE);
    }

    #[test]
    fn test_spawn_x_centers() {
        assert_eq!(spawn_x(&get_shape(PieceKind::I)), 3);
        assert_eq!(spawn_x(&get_shape(PieceKind::O)), 4);
        assert_eq!(spawn_x(&get_shape(PieceKind::T)), 3);
        assert_eq!(spawn_x(&get_shape(PieceKind::L)), 4);
    }

    #[test]
    fn test_occupied_rows() {
        let rows: Vec<i8> = get_shape(PieceKind::J).occupied_rows().collect();
        assert_eq!(rows, vec![0, 1, 2]);
    }
}
