//! RNG module - piece kind and variant rolls
//!
//! Kinds are drawn uniformly from the seven-piece catalog (no bag, no
//! fairness guarantees). Variants are drawn with [`weighted_choice`], which
//! works on any roll value so it stays independent of the random source.
//!
//! Also provides a simple LCG for deterministic games and a sequence source
//! for scripted tests.

use crate::config::VariantWeights;
use crate::types::{PieceKind, PieceVariant};

/// Source of raw random numbers for the engine
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Random value in range [0, max); `max` must be non-zero
    fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
    seed: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state, seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low bits of a power-of-two LCG have short periods.
        self.state >> 8
    }
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u32>,
    pos: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<u32>) -> Self {
        let values = if values.is_empty() { vec![0] } else { values };
        Self { values, pos: 0 }
    }
}

impl RandomSource for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        let v = self.values[self.pos];
        self.pos = (self.pos + 1) % self.values.len();
        v
    }
}

/// Pick the outcome whose cumulative weight bracket contains `roll`
///
/// `roll` is expected in `[0, total_weight)`; larger values saturate to the
/// last non-zero outcome. Returns `None` only when every weight is zero.
pub fn weighted_choice<T: Copy>(table: &[(T, u32)], roll: u32) -> Option<T> {
    let mut upper = 0u32;
    let mut last = None;
    for &(outcome, weight) in table {
        if weight == 0 {
            continue;
        }
        upper = upper.saturating_add(weight);
        last = Some(outcome);
        if roll < upper {
            return Some(outcome);
        }
    }
    last
}

/// Uniformly random piece kind
pub fn roll_kind(rng: &mut dyn RandomSource) -> PieceKind {
    PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
}

/// Weighted piece variant; frozen first, then mystery, then normal
pub fn roll_variant(rng: &mut dyn RandomSource, weights: &VariantWeights) -> PieceVariant {
    let table = [
        (PieceVariant::Frozen, weights.frozen),
        (PieceVariant::Mystery, weights.mystery),
        (PieceVariant::Normal, weights.normal),
    ];
    let total = weights.total();
    if total == 0 {
        return PieceVariant::Normal;
    }
    weighted_choice(&table, rng.next_range(total)).unwrap_or(PieceVariant::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
        assert_eq!(rng.seed(), 0);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_roll_kind_covers_catalog() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let kind = roll_kind(&mut rng);
            let idx = PieceKind::ALL.iter().position(|&k| k == kind).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_weighted_choice_brackets() {
        let table = [('f', 10), ('m', 10), ('n', 80)];
        assert_eq!(weighted_choice(&table, 0), Some('f'));
        assert_eq!(weighted_choice(&table, 9), Some('f'));
        assert_eq!(weighted_choice(&table, 10), Some('m'));
        assert_eq!(weighted_choice(&table, 19), Some('m'));
        assert_eq!(weighted_choice(&table, 20), Some('n'));
        assert_eq!(weighted_choice(&table, 99), Some('n'));
        assert_eq!(weighted_choice(&table, 500), Some('n'));
    }

    #[test]
    fn test_weighted_choice_skips_zero_weights() {
        let table = [('a', 0), ('b', 5), ('c', 0)];
        assert_eq!(weighted_choice(&table, 0), Some('b'));
        assert_eq!(weighted_choice(&table, 4), Some('b'));
        assert_eq!(weighted_choice::<char>(&[('a', 0)], 0), None);
    }

    #[test]
    fn test_roll_variant_uses_default_split() {
        let weights = VariantWeights::default();
        let mut rng = SequenceRng::new(vec![5, 15, 50]);
        assert_eq!(roll_variant(&mut rng, &weights), PieceVariant::Frozen);
        assert_eq!(roll_variant(&mut rng, &weights), PieceVariant::Mystery);
        assert_eq!(roll_variant(&mut rng, &weights), PieceVariant::Normal);
    }

    #[test]
    fn test_roll_variant_distribution() {
        let weights = VariantWeights::default();
        let mut rng = SimpleRng::new(2024);
        let mut specials = 0;
        for _ in 0..10_000 {
            if roll_variant(&mut rng, &weights) != PieceVariant::Normal {
                specials += 1;
            }
        }
        // Roughly 20% specials.
        assert!((1500..2500).contains(&specials), "specials = {}", specials);
    }

    #[test]
    fn test_sequence_rng_cycles() {
        let mut rng = SequenceRng::new(vec![1, 2]);
        assert_eq!(rng.next_u32(), 1);
        assert_eq!(rng.next_u32(), 2);
        assert_eq!(rng.next_u32(), 1);
    }
}
