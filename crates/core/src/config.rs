//! Engine configuration
//!
//! Defaults reproduce the standard ruleset; hosts may override individual
//! fields (the `frostfall` binary reads them from the environment).

use crate::types::{
    FROZEN_WEIGHT, MYSTERY_MORPH_MS, MYSTERY_WEIGHT, NORMAL_WEIGHT, ROW_FREEZE_MS,
};

/// Relative odds of each piece variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantWeights {
    pub normal: u32,
    pub frozen: u32,
    pub mystery: u32,
}

impl VariantWeights {
    pub fn total(&self) -> u32 {
        self.normal
            .saturating_add(self.frozen)
            .saturating_add(self.mystery)
    }

    /// Only normal pieces
    pub fn normal_only() -> Self {
        Self {
            normal: 1,
            frozen: 0,
            mystery: 0,
        }
    }
}

impl Default for VariantWeights {
    fn default() -> Self {
        Self {
            normal: NORMAL_WEIGHT,
            frozen: FROZEN_WEIGHT,
            mystery: MYSTERY_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the built-in LCG
    pub seed: u32,
    /// How long a frozen row refuses to clear
    pub row_freeze_ms: u64,
    /// Mystery piece shape change cadence
    pub mystery_morph_ms: u64,
    pub variant_weights: VariantWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            row_freeze_ms: ROW_FREEZE_MS,
            mystery_morph_ms: MYSTERY_MORPH_MS,
            variant_weights: VariantWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_variant_weights(mut self, weights: VariantWeights) -> Self {
        self.variant_weights = weights;
        self
    }
}
