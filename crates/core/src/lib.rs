//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to simulate a session of the falling-block game with
//! frozen and mystery pieces. Nothing here touches the terminal or any other
//! I/O; time comes from a [`Clock`] and randomness from a [`RandomSource`],
//! so a game driven by [`ManualClock`] and a seeded [`SimpleRng`] replays
//! identically.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, collision tests, gated row clearing
//! - [`pieces`]: shape catalog and clockwise rotation
//! - [`piece`]: the active falling piece
//! - [`row_locks`]: time-limited row freezes left by frozen pieces
//! - [`timers`]: repeating timers with cancellable handles
//! - [`scoring`]: line points, level and fall interval
//! - [`rng`]: random sources and weighted kind/variant rolls
//! - [`game_state`]: the engine and its run state machine
//! - [`snapshot`]: copyable view of the game for renderers
//!
//! # Example
//!
//! ```
//! use frostfall_core::{EngineConfig, GameState, ManualClock};
//! use frostfall_core::types::{GameAction, RunState};
//!
//! let clock = ManualClock::new();
//! let mut game = GameState::with_clock(EngineConfig::default().with_seed(7), clock.clone());
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::HardDrop);
//! assert!(game.score() > 0);
//!
//! clock.advance(1000);
//! game.tick(1000);
//! assert_eq!(game.state(), RunState::Running);
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod row_locks;
pub mod scoring;
pub mod snapshot;
pub mod timers;

pub use frostfall_types as types;

pub use board::{Board, ClearedRows, RowGate};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EngineConfig, VariantWeights};
pub use game_state::GameState;
pub use piece::ActivePiece;
pub use pieces::{get_shape, Shape};
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use row_locks::{RowLock, RowLockTracker};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use timers::{TimerHandle, TimerQueue};
