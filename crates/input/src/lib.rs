//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. The engine
//! itself never sees key codes, so any other host can drive it with the same
//! actions.

pub mod map;

pub use frostfall_types as types;

pub use map::{handle_key_event, should_quit, KeyOutcome};
