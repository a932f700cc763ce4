//! Stderr logging for the headless runner, backed by `env_logger`.
//!
//! The terminal UI never installs it: anything written to stderr while the
//! alternate screen is active would tear the frame.

use anyhow::{anyhow, Result};
use log::LevelFilter;

/// Install the logger at `level`; fails if another logger is already set
pub fn init(level: LevelFilter) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init()
        .map_err(|e| anyhow!("logger: {}", e))
}
