//! Core types module - shared data structures and constants
//!
//! Everything here is plain data: board dimensions, timing constants, the
//! seven piece kinds, the three piece variants and the color tokens written
//! into board cells. The engine, the terminal view and the headless runner
//! all speak in these types.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_FALL_INTERVAL_MS` | 1000 | Gravity at level 1 |
//! | `FALL_INTERVAL_STEP_MS` | 100 | Gravity speed-up per level |
//! | `FALL_INTERVAL_MIN_MS` | 100 | Fastest gravity |
//! | `ROW_FREEZE_MS` | 5000 | How long a frozen row refuses to clear |
//! | `MYSTERY_MORPH_MS` | 500 | Mystery piece shape change cadence |
//!
//! # Examples
//!
//! ```
//! use frostfall_types::{BlockColor, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color(), BlockColor::Piece(PieceKind::T));
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity at level 1 (one row per second)
pub const BASE_FALL_INTERVAL_MS: u32 = 1000;

/// Gravity gets this much faster per level
pub const FALL_INTERVAL_STEP_MS: u32 = 100;

/// Fall interval floor
pub const FALL_INTERVAL_MIN_MS: u32 = 100;

/// Score needed per level
pub const POINTS_PER_LEVEL: u32 = 1000;

/// Points for clearing 0..=4 rows in a single landing
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per row descended during a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 1;

/// Wall-clock duration of a row freeze
pub const ROW_FREEZE_MS: u64 = 5000;

/// Wall-clock cadence of mystery piece shape changes
pub const MYSTERY_MORPH_MS: u64 = 500;

/// Default variant weights (out of 100)
pub const NORMAL_WEIGHT: u32 = 80;
pub const FROZEN_WEIGHT: u32 = 10;
pub const MYSTERY_WEIGHT: u32 = 10;

/// Suggested host frame interval (~60 FPS)
pub const FRAME_MS: u32 = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_pacing_constants() {
        // 10 levels take gravity from 1s down to the 0.1s floor.
        assert_eq!(
            BASE_FALL_INTERVAL_MS - 9 * FALL_INTERVAL_STEP_MS,
            FALL_INTERVAL_MIN_MS
        );
        assert_eq!(NORMAL_WEIGHT + FROZEN_WEIGHT + MYSTERY_WEIGHT, 100);
    }

    #[test]
    fn piece_kind_str_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PieceKind::from_str("x"), None);
    }

    #[test]
    fn special_colors_are_distinct_from_catalog() {
        for kind in PieceKind::ALL {
            assert_ne!(kind.color().rgb(), BlockColor::Frozen.rgb());
            assert_ne!(kind.color().rgb(), BlockColor::Mystery.rgb());
        }
    }
}

/// The seven piece kinds
///
/// `ALL` keeps the catalog order (I, L, J, O, Z, S, T); random kind rolls
/// index into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    L,
    J,
    O,
    Z,
    S,
    T,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "o" => Some(PieceKind::O),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::O => "o",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::T => "t",
        }
    }

    /// Catalog color of a normal piece of this kind
    pub fn color(self) -> BlockColor {
        BlockColor::Piece(self)
    }
}

/// Behavior variant of a falling piece
///
/// - **Normal**: plain piece in its catalog color
/// - **Frozen**: rows it lands on refuse to clear for `ROW_FREEZE_MS`
/// - **Mystery**: changes shape every `MYSTERY_MORPH_MS` while falling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceVariant {
    Normal,
    Frozen,
    Mystery,
}

impl PieceVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceVariant::Normal => "normal",
            PieceVariant::Frozen => "frozen",
            PieceVariant::Mystery => "mystery",
        }
    }
}

/// Color token stored in a locked board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockColor {
    Piece(PieceKind),
    Frozen,
    Mystery,
}

impl BlockColor {
    /// 24-bit RGB value of this token
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            BlockColor::Piece(PieceKind::I) => (0x00, 0xf0, 0xf0),
            BlockColor::Piece(PieceKind::L) => (0xf0, 0xa0, 0x00),
            BlockColor::Piece(PieceKind::J) => (0x00, 0x00, 0xf0),
            BlockColor::Piece(PieceKind::O) => (0xf0, 0xf0, 0x00),
            BlockColor::Piece(PieceKind::Z) => (0xf0, 0x00, 0x00),
            BlockColor::Piece(PieceKind::S) => (0x00, 0xf0, 0x00),
            BlockColor::Piece(PieceKind::T) => (0xa0, 0x00, 0xf0),
            BlockColor::Frozen => (0xad, 0xd8, 0xe6),
            BlockColor::Mystery => (0x80, 0x00, 0x80),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(color)`: Locked block
pub type Cell = Option<BlockColor>;

/// Engine lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::GameOver => "gameOver",
        }
    }
}

/// Commands a host can send to the engine
///
/// Piece commands are ignored unless the game is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down, landing it if blocked
    SoftDrop,
    /// Drop piece to the lowest valid position and land it
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Pause when running, resume when paused
    TogglePause,
    /// Start a new game from idle or game over
    Start,
    /// Abandon the game and return to idle
    Reset,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use frostfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            "start" => Some(GameAction::Start),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::TogglePause => "togglePause",
            GameAction::Start => "start",
            GameAction::Reset => "reset",
        }
    }
}

/// Event recorded every time a piece locks into the board
///
/// Hosts consume it through `GameState::take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub piece_id: u32,
    pub kind: PieceKind,
    pub variant: PieceVariant,
    /// Color actually written into the board cells
    pub color: BlockColor,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    /// New row freezes created by a frozen piece
    pub rows_frozen: u32,
}

/// Final numbers delivered when the game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOverReport {
    pub final_score: u32,
    pub final_level: u32,
}
