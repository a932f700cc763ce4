//! Frostfall (workspace facade crate).
//!
//! Re-exports the engine, input, and terminal crates under one name and
//! holds the host pieces shared by the binary and the integration tests:
//! environment configuration and the headless runner.

pub use frostfall_core as core;
pub use frostfall_input as input;
pub use frostfall_term as term;
pub use frostfall_types as types;

pub mod config;
pub mod headless;
pub mod logging;
