use serde::Serialize;

use crate::piece::ActivePiece;
use crate::pieces::Shape;
use crate::types::{BlockColor, Cell, PieceKind, PieceVariant, RunState, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub variant: PieceVariant,
    pub color: BlockColor,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            variant: value.variant,
            color: value.color,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub frozen_rows: [bool; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub state: RunState,
    pub piece_id: u32,
    pub seed: u32,
    pub score: u32,
    pub level: u32,
    pub fall_interval_ms: u32,
    /// Fraction of the way to the next gravity step, in [0, 1]
    pub fall_progress: f32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            frozen_rows: [false; BOARD_HEIGHT as usize],
            active: None,
            state: RunState::Idle,
            piece_id: 0,
            seed: 0,
            score: 0,
            level: 1,
            fall_interval_ms: crate::types::BASE_FALL_INTERVAL_MS,
            fall_progress: 0.0,
        }
    }
}
