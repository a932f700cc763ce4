//! Host configuration from environment variables.
//!
//! | Variable                   | Meaning                        | Default |
//! |----------------------------|--------------------------------|---------|
//! | `FROSTFALL_SEED`           | RNG seed                       | 1       |
//! | `FROSTFALL_ROW_FREEZE_MS`  | frozen row duration            | 5000    |
//! | `FROSTFALL_MYSTERY_MS`     | mystery shape change period    | 500     |
//! | `FROSTFALL_FROZEN_WEIGHT`  | frozen variant weight          | 10      |
//! | `FROSTFALL_MYSTERY_WEIGHT` | mystery variant weight         | 10      |
//! | `FROSTFALL_LOG`            | headless log level             | info    |
//!
//! The normal weight is always 80; the frozen and mystery weights are
//! relative to it.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use log::LevelFilter;

use crate::core::{EngineConfig, VariantWeights};

pub const SEED_VAR: &str = "FROSTFALL_SEED";
pub const ROW_FREEZE_VAR: &str = "FROSTFALL_ROW_FREEZE_MS";
pub const MYSTERY_VAR: &str = "FROSTFALL_MYSTERY_MS";
pub const FROZEN_WEIGHT_VAR: &str = "FROSTFALL_FROZEN_WEIGHT";
pub const MYSTERY_WEIGHT_VAR: &str = "FROSTFALL_MYSTERY_WEIGHT";
pub const LOG_VAR: &str = "FROSTFALL_LOG";

/// Engine configuration with environment overrides applied
pub fn engine_config_from_env() -> Result<EngineConfig> {
    engine_config_from_lookup(|name| env::var(name).ok())
}

/// Same as [`engine_config_from_env`] with an explicit variable source
pub fn engine_config_from_lookup<F>(lookup: F) -> Result<EngineConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = EngineConfig::default();

    if let Some(seed) = parse_var(&lookup, SEED_VAR)? {
        config.seed = seed;
    }
    if let Some(ms) = parse_var::<u64, _>(&lookup, ROW_FREEZE_VAR)? {
        config.row_freeze_ms = ms;
    }
    if let Some(ms) = parse_var::<u64, _>(&lookup, MYSTERY_VAR)? {
        if ms == 0 {
            return Err(anyhow!("{}: period must be positive", MYSTERY_VAR));
        }
        config.mystery_morph_ms = ms;
    }

    let mut weights = VariantWeights::default();
    if let Some(w) = parse_var(&lookup, FROZEN_WEIGHT_VAR)? {
        weights.frozen = w;
    }
    if let Some(w) = parse_var(&lookup, MYSTERY_WEIGHT_VAR)? {
        weights.mystery = w;
    }
    Ok(config.with_variant_weights(weights))
}

/// Log level for the headless runner; defaults to `info`
pub fn log_level_from_env() -> Result<LevelFilter> {
    match env::var(LOG_VAR) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("{}: invalid log level: {}", LOG_VAR, v)),
        _ => Ok(LevelFilter::Info),
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| anyhow!("{}: invalid value: {}", name, raw))
}
