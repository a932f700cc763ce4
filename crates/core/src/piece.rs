//! Active piece - the single falling piece owned by the engine

use crate::pieces::{get_shape, spawn_x, Shape};
use crate::timers::TimerHandle;
use crate::types::{BlockColor, PieceKind, PieceVariant};

/// Falling piece
///
/// `kind` is the kind the current shape came from; for a mystery piece it
/// changes every time the shape morphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub variant: PieceVariant,
    pub shape: Shape,
    pub color: BlockColor,
    pub x: i8,
    pub y: i8,
    /// Mutation timer, only for mystery pieces
    pub morph_timer: Option<TimerHandle>,
}

impl ActivePiece {
    /// Create a piece at its spawn position (centered, top row)
    pub fn spawn(kind: PieceKind, variant: PieceVariant) -> Self {
        let shape = get_shape(kind);
        let color = match variant {
            PieceVariant::Normal => kind.color(),
            PieceVariant::Frozen => BlockColor::Frozen,
            PieceVariant::Mystery => BlockColor::Mystery,
        };
        Self {
            kind,
            variant,
            shape,
            color,
            x: spawn_x(&shape),
            y: 0,
            morph_timer: None,
        }
    }

    /// Candidate shape for a clockwise rotation; the piece is unchanged
    pub fn rotated_shape(&self) -> Shape {
        self.shape.rotate_cw()
    }

    /// Replace the shape with `kind`'s catalog shape, keeping position and color
    pub fn morph_into(&mut self, kind: PieceKind) {
        self.kind = kind;
        self.shape = get_shape(kind);
    }

    /// Board rows covered by the shape at the current position
    pub fn board_rows(&self) -> impl Iterator<Item = i16> + '_ {
        self.shape
            .occupied_rows()
            .map(move |r| self.y as i16 + r as i16)
    }

    /// Absolute (x, y) of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(r, c)| (self.x + c, self.y + r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_colors_follow_variant() {
        let normal = ActivePiece::spawn(PieceKind::S, PieceVariant::Normal);
        assert_eq!(normal.color, BlockColor::Piece(PieceKind::S));

        let frozen = ActivePiece::spawn(PieceKind::S, PieceVariant::Frozen);
        assert_eq!(frozen.color, BlockColor::Frozen);

        let mystery = ActivePiece::spawn(PieceKind::S, PieceVariant::Mystery);
        assert_eq!(mystery.color, BlockColor::Mystery);
    }

    #[test]
    fn spawn_position_is_centered() {
        let o = ActivePiece::spawn(PieceKind::O, PieceVariant::Normal);
        assert_eq!((o.x, o.y), (4, 0));
        let i = ActivePiece::spawn(PieceKind::I, PieceVariant::Normal);
        assert_eq!((i.x, i.y), (3, 0));
    }

    #[test]
    fn morph_keeps_position_and_color() {
        let mut p = ActivePiece::spawn(PieceKind::O, PieceVariant::Mystery);
        p.y = 7;
        p.morph_into(PieceKind::I);
        assert_eq!(p.kind, PieceKind::I);
        assert_eq!(p.shape, get_shape(PieceKind::I));
        assert_eq!((p.x, p.y), (4, 7));
        assert_eq!(p.color, BlockColor::Mystery);
    }

    #[test]
    fn cells_are_absolute() {
        let mut p = ActivePiece::spawn(PieceKind::O, PieceVariant::Normal);
        p.y = 3;
        let cells: Vec<_> = p.cells().collect();
        assert_eq!(cells, vec![(4, 3), (5, 3), (4, 4), (5, 4)]);
        let rows: Vec<_> = p.board_rows().collect();
        assert_eq!(rows, vec![3, 4]);
    }
}
